use super::prelude::*;

#[derive(Default)]
pub struct BookQueries;

#[Object]
impl BookQueries {
    /// Get a book by ID. Returns null when the id is omitted or unknown.
    async fn book(&self, ctx: &Context<'_>, id: Option<ID>) -> Option<Book> {
        let db = ctx.data_unchecked::<Database>();
        let book_id = parse_id("book", &id?).or_field_error(ctx)?;

        db.books()
            .get_by_id(book_id)
            .await
            .or_field_error(ctx)?
            .map(Book::from)
    }

    /// Get all books
    async fn books(&self, ctx: &Context<'_>) -> Option<Vec<Book>> {
        let db = ctx.data_unchecked::<Database>();

        let records = db.books().list_all().await.or_field_error(ctx)?;

        Some(records.into_iter().map(Book::from).collect())
    }
}
