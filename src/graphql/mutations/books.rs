use super::prelude::*;

#[derive(Default)]
pub struct BookMutations;

#[Object]
impl BookMutations {
    /// Create a book. `authorId` is stored without checking that the author exists.
    async fn add_book(
        &self,
        ctx: &Context<'_>,
        name: String,
        genre: String,
        author_id: ID,
        time: Option<String>,
        size: Option<String>,
    ) -> Option<Book> {
        let db = ctx.data_unchecked::<Database>();

        let record = db
            .books()
            .create(CreateBook {
                name,
                genre,
                author_id: author_id.0,
                time,
                size,
            })
            .await
            .or_field_error(ctx)?;

        tracing::debug!(book_id = %record.id, "Book created");
        Some(Book::from(record))
    }

    /// Update a book. Unknown ids are inserted when upserts are enabled,
    /// otherwise the result is null.
    #[allow(clippy::too_many_arguments)]
    async fn edit_book(
        &self,
        ctx: &Context<'_>,
        id: ID,
        name: Option<String>,
        genre: Option<String>,
        time: Option<String>,
        size: Option<String>,
        author_id: Option<ID>,
    ) -> Option<Book> {
        let db = ctx.data_unchecked::<Database>();
        let policy = ctx.data_opt::<EditPolicy>().copied().unwrap_or_default();
        let book_id = parse_id("book", &id).or_field_error(ctx)?;

        let record = db
            .books()
            .update(
                book_id,
                UpdateBook {
                    name,
                    genre,
                    time,
                    size,
                    author_id: author_id.map(|id| id.0),
                },
                policy.upsert,
            )
            .await
            .or_field_error(ctx)?;

        match &record {
            Some(_) => tracing::info!(book_id = %book_id, upsert = policy.upsert, "Book saved"),
            None => tracing::debug!(book_id = %book_id, "Edit skipped, book not found"),
        }

        record.map(Book::from)
    }

    /// Delete a book
    async fn del_book(&self, ctx: &Context<'_>, id: ID) -> Option<Book> {
        let db = ctx.data_unchecked::<Database>();
        let book_id = parse_id("book", &id).or_field_error(ctx)?;

        let record = db.books().delete(book_id).await.or_field_error(ctx)??;

        tracing::info!(book_id = %book_id, "Book deleted");
        Some(Book::from(record))
    }
}
