//! GraphQL schema definition with queries and mutations

use async_graphql::extensions::Tracing;
use async_graphql::{EmptySubscription, MergedObject, Schema};

use crate::db::Database;

use super::helpers::EditPolicy;
use super::mutations::{AuthorMutations, BookMutations};
use super::queries::{AuthorQueries, BookQueries};

/// The GraphQL schema type
pub type BookshelfSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the GraphQL schema with all resolvers
pub fn build_schema(db: Database, policy: EditPolicy) -> BookshelfSchema {
    Schema::build(QueryRoot::default(), MutationRoot::default(), EmptySubscription)
        .data(db)
        .data(policy)
        .extension(Tracing)
        .finish()
}

/// SDL of the schema, which does not depend on any runtime data
pub fn schema_sdl() -> String {
    Schema::build(QueryRoot::default(), MutationRoot::default(), EmptySubscription)
        .finish()
        .sdl()
}

#[derive(MergedObject, Default)]
#[graphql(name = "RootQueryType")]
pub struct QueryRoot(BookQueries, AuthorQueries);

#[derive(MergedObject, Default)]
#[graphql(name = "Mutation")]
pub struct MutationRoot(AuthorMutations, BookMutations);
