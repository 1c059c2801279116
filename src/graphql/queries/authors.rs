use super::prelude::*;

#[derive(Default)]
pub struct AuthorQueries;

#[Object]
impl AuthorQueries {
    /// Get an author by ID. Returns null when the id is omitted or unknown.
    async fn author(&self, ctx: &Context<'_>, id: Option<ID>) -> Option<Author> {
        let db = ctx.data_unchecked::<Database>();
        let author_id = parse_id("author", &id?).or_field_error(ctx)?;

        db.authors()
            .get_by_id(author_id)
            .await
            .or_field_error(ctx)?
            .map(Author::from)
    }

    /// Get all authors
    async fn authors(&self, ctx: &Context<'_>) -> Option<Vec<Author>> {
        let db = ctx.data_unchecked::<Database>();

        let records = db.authors().list_all().await.or_field_error(ctx)?;

        Some(records.into_iter().map(Author::from).collect())
    }
}
