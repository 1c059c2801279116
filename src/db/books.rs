//! Books database repository
//!
//! `author_id` is stored as given. It is never checked against the authors
//! table, so a book may point at an author that does not (or no longer)
//! exist.

use anyhow::Result;
use uuid::Uuid;

#[cfg(feature = "sqlite")]
use sqlx::SqlitePool;

#[cfg(feature = "sqlite")]
use crate::db::sqlite_helpers::{decode_id, uuid_to_str};

#[cfg(feature = "sqlite")]
type DbPool = SqlitePool;

const BOOK_COLUMNS: &str = "id, name, genre, time, size, author_id";

/// Book record from database
#[derive(Debug, Clone, PartialEq)]
pub struct BookRecord {
    pub id: Uuid,
    pub name: Option<String>,
    pub genre: Option<String>,
    pub time: Option<String>,
    pub size: Option<String>,
    pub author_id: Option<String>,
}

#[cfg(feature = "sqlite")]
impl sqlx::FromRow<'_, sqlx::sqlite::SqliteRow> for BookRecord {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> sqlx::Result<Self> {
        use sqlx::Row;

        Ok(Self {
            id: decode_id(row)?,
            name: row.try_get("name")?,
            genre: row.try_get("genre")?,
            time: row.try_get("time")?,
            size: row.try_get("size")?,
            author_id: row.try_get("author_id")?,
        })
    }
}

/// Input for creating a book
#[derive(Debug)]
pub struct CreateBook {
    pub name: String,
    pub genre: String,
    pub author_id: String,
    pub time: Option<String>,
    pub size: Option<String>,
}

/// Input for updating a book. `None` keeps the stored value.
#[derive(Debug, Default)]
pub struct UpdateBook {
    pub name: Option<String>,
    pub genre: Option<String>,
    pub time: Option<String>,
    pub size: Option<String>,
    pub author_id: Option<String>,
}

/// Book repository
pub struct BookRepository {
    pool: DbPool,
}

impl BookRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// List every book in insertion order
    pub async fn list_all(&self) -> Result<Vec<BookRecord>> {
        let records = sqlx::query_as::<_, BookRecord>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books ORDER BY rowid"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// List the books whose stored author reference equals `author_id`
    pub async fn list_by_author(&self, author_id: &str) -> Result<Vec<BookRecord>> {
        let records = sqlx::query_as::<_, BookRecord>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE author_id = ?1 ORDER BY rowid"
        ))
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Number of stored books
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Get a book by ID
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<BookRecord>> {
        let record = sqlx::query_as::<_, BookRecord>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE id = ?1"
        ))
        .bind(uuid_to_str(id))
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Create a book with a freshly generated id
    pub async fn create(&self, input: CreateBook) -> Result<BookRecord> {
        let id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO books (id, name, genre, time, size, author_id)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(uuid_to_str(id))
        .bind(&input.name)
        .bind(&input.genre)
        .bind(&input.time)
        .bind(&input.size)
        .bind(&input.author_id)
        .execute(&self.pool)
        .await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Failed to retrieve book after insert"))
    }

    /// Update a book in place, inserting it under `id` when `upsert` is set
    /// and no row matches.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateBook,
        upsert: bool,
    ) -> Result<Option<BookRecord>> {
        let id_str = uuid_to_str(id);

        if upsert {
            sqlx::query(
                r#"
                INSERT INTO books (id, name, genre, time, size, author_id)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                ON CONFLICT(id) DO UPDATE SET
                    name = COALESCE(excluded.name, books.name),
                    genre = COALESCE(excluded.genre, books.genre),
                    time = COALESCE(excluded.time, books.time),
                    size = COALESCE(excluded.size, books.size),
                    author_id = COALESCE(excluded.author_id, books.author_id)
                "#,
            )
            .bind(&id_str)
            .bind(&input.name)
            .bind(&input.genre)
            .bind(&input.time)
            .bind(&input.size)
            .bind(&input.author_id)
            .execute(&self.pool)
            .await?;

            return self.get_by_id(id).await;
        }

        let result = sqlx::query(
            r#"
            UPDATE books SET
                name = COALESCE(?2, name),
                genre = COALESCE(?3, genre),
                time = COALESCE(?4, time),
                size = COALESCE(?5, size),
                author_id = COALESCE(?6, author_id)
            WHERE id = ?1
            "#,
        )
        .bind(&id_str)
        .bind(&input.name)
        .bind(&input.genre)
        .bind(&input.time)
        .bind(&input.size)
        .bind(&input.author_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() > 0 {
            self.get_by_id(id).await
        } else {
            Ok(None)
        }
    }

    /// Delete a book, returning the removed record
    pub async fn delete(&self, id: Uuid) -> Result<Option<BookRecord>> {
        let record = sqlx::query_as::<_, BookRecord>(&format!(
            "DELETE FROM books WHERE id = ?1 RETURNING {BOOK_COLUMNS}"
        ))
        .bind(uuid_to_str(id))
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::db::{CreateAuthor, Database};

    fn book(name: &str, author_id: &str) -> CreateBook {
        CreateBook {
            name: name.to_string(),
            genre: "Novel".to_string(),
            author_id: author_id.to_string(),
            time: Some("1869".to_string()),
            size: None,
        }
    }

    #[tokio::test]
    async fn test_list_by_author_filters_exactly() {
        let db = Database::in_memory().await.unwrap();
        let author = db
            .authors()
            .create(CreateAuthor {
                name: "Leo Tolstoy".to_string(),
                age: 82,
                nationality: None,
                birthplace: None,
            })
            .await
            .unwrap();
        let author_id = author.id.to_string();

        let war = db.books().create(book("War and Peace", &author_id)).await.unwrap();
        let anna = db.books().create(book("Anna Karenina", &author_id)).await.unwrap();
        db.books()
            .create(book("Call to Arms", &Uuid::new_v4().to_string()))
            .await
            .unwrap();

        let books = db.books().list_by_author(&author_id).await.unwrap();
        assert_eq!(books, vec![war, anna]);
    }

    #[tokio::test]
    async fn test_author_reference_is_not_checked() {
        let db = Database::in_memory().await.unwrap();
        let created = db.books().create(book("Orphan", "nobody")).await.unwrap();
        assert_eq!(created.author_id.as_deref(), Some("nobody"));
    }

    #[tokio::test]
    async fn test_delete_removes_from_list() {
        let db = Database::in_memory().await.unwrap();
        let keep = db.books().create(book("Keep", "a")).await.unwrap();
        let gone = db.books().create(book("Gone", "a")).await.unwrap();

        let deleted = db.books().delete(gone.id).await.unwrap();
        assert_eq!(deleted.map(|b| b.id), Some(gone.id));
        assert_eq!(db.books().list_all().await.unwrap(), vec![keep]);
    }

    #[tokio::test]
    async fn test_count_ignores_author_reference() {
        let db = Database::in_memory().await.unwrap();
        db.books().create(book("One", "a")).await.unwrap();
        db.books().create(book("Two", "b")).await.unwrap();

        assert_eq!(db.books().count().await.unwrap(), 2);
        assert_eq!(db.authors().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_upsert_creates_missing_book() {
        let db = Database::in_memory().await.unwrap();
        let id = Uuid::new_v4();

        let record = db
            .books()
            .update(
                id,
                UpdateBook {
                    genre: Some("Poetry".to_string()),
                    ..Default::default()
                },
                true,
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(record.id, id);
        assert_eq!(record.genre.as_deref(), Some("Poetry"));
        assert_eq!(record.name, None);
    }

    #[tokio::test]
    async fn test_update_can_move_book_to_other_author() {
        let db = Database::in_memory().await.unwrap();
        let created = db.books().create(book("Moved", "first")).await.unwrap();

        db.books()
            .update(
                created.id,
                UpdateBook {
                    author_id: Some("second".to_string()),
                    ..Default::default()
                },
                false,
            )
            .await
            .unwrap();

        assert!(db.books().list_by_author("first").await.unwrap().is_empty());
        assert_eq!(db.books().list_by_author("second").await.unwrap().len(), 1);
    }
}
