//! GraphQL type definitions
//!
//! These types mirror the database records but are decorated with
//! async-graphql attributes. Relations between the two entities are resolved
//! lazily, one query per parent object.

use async_graphql::{ComplexObject, Context, ID, SimpleObject};

use crate::db::{AuthorRecord, BookRecord, Database};

use super::helpers::{OrFieldError, parse_id};

/// A writer whose books are found through `Book.authorId`
#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct Author {
    pub id: ID,
    pub name: Option<String>,
    pub age: Option<i32>,
    pub nationality: Option<String>,
    pub birthplace: Option<String>,
}

#[ComplexObject]
impl Author {
    /// Books whose `authorId` equals this author's id
    async fn books(&self, ctx: &Context<'_>) -> Option<Vec<Book>> {
        let db = ctx.data_unchecked::<Database>();

        let records = db
            .books()
            .list_by_author(self.id.as_str())
            .await
            .or_field_error(ctx)?;

        Some(records.into_iter().map(Book::from).collect())
    }

    /// Alias of `books`
    async fn works(&self, ctx: &Context<'_>) -> Option<Vec<Book>> {
        self.books(ctx).await.ok().flatten()
    }
}

impl From<AuthorRecord> for Author {
    fn from(r: AuthorRecord) -> Self {
        Self {
            id: ID(r.id.to_string()),
            name: r.name,
            age: r.age,
            nationality: r.nationality,
            birthplace: r.birthplace,
        }
    }
}

/// A book. `authorId` is a plain reference and may dangle.
#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct Book {
    pub id: ID,
    pub name: Option<String>,
    pub genre: Option<String>,
    pub time: Option<String>,
    pub size: Option<String>,
    pub author_id: Option<ID>,
}

#[ComplexObject]
impl Book {
    /// The author referenced by `authorId`, or null if there is none
    async fn author(&self, ctx: &Context<'_>) -> Option<Author> {
        let db = ctx.data_unchecked::<Database>();
        let author_id = parse_id("author", self.author_id.as_ref()?).or_field_error(ctx)?;

        db.authors()
            .get_by_id(author_id)
            .await
            .or_field_error(ctx)?
            .map(Author::from)
    }
}

impl From<BookRecord> for Book {
    fn from(r: BookRecord) -> Self {
        Self {
            id: ID(r.id.to_string()),
            name: r.name,
            genre: r.genre,
            time: r.time,
            size: r.size,
            author_id: r.author_id.map(ID),
        }
    }
}
