use super::prelude::*;

#[derive(Default)]
pub struct AuthorMutations;

#[Object]
impl AuthorMutations {
    /// Create an author
    async fn add_author(
        &self,
        ctx: &Context<'_>,
        name: String,
        age: i32,
        nationality: Option<String>,
        birthplace: Option<String>,
    ) -> Option<Author> {
        let db = ctx.data_unchecked::<Database>();

        let record = db
            .authors()
            .create(CreateAuthor {
                name,
                age,
                nationality,
                birthplace,
            })
            .await
            .or_field_error(ctx)?;

        tracing::debug!(author_id = %record.id, "Author created");
        Some(Author::from(record))
    }

    /// Update an author. Unknown ids are inserted when upserts are enabled,
    /// otherwise the result is null.
    async fn edit_author(
        &self,
        ctx: &Context<'_>,
        id: ID,
        name: Option<String>,
        age: Option<i32>,
        nationality: Option<String>,
        birthplace: Option<String>,
    ) -> Option<Author> {
        let db = ctx.data_unchecked::<Database>();
        let policy = ctx.data_opt::<EditPolicy>().copied().unwrap_or_default();
        let author_id = parse_id("author", &id).or_field_error(ctx)?;

        let record = db
            .authors()
            .update(
                author_id,
                UpdateAuthor {
                    name,
                    age,
                    nationality,
                    birthplace,
                },
                policy.upsert,
            )
            .await
            .or_field_error(ctx)?;

        match &record {
            Some(_) => tracing::info!(author_id = %author_id, upsert = policy.upsert, "Author saved"),
            None => tracing::debug!(author_id = %author_id, "Edit skipped, author not found"),
        }

        record.map(Author::from)
    }

    /// Delete an author. Their books are kept.
    async fn del_author(&self, ctx: &Context<'_>, id: ID) -> Option<Author> {
        let db = ctx.data_unchecked::<Database>();
        let author_id = parse_id("author", &id).or_field_error(ctx)?;

        let record = db.authors().delete(author_id).await.or_field_error(ctx)??;

        tracing::info!(author_id = %author_id, "Author deleted");
        Some(Author::from(record))
    }
}
