//! Database connection and operations

pub mod authors;
pub mod books;
pub mod sqlite_helpers;

use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub use authors::{AuthorRecord, AuthorRepository, CreateAuthor, UpdateAuthor};
pub use books::{BookRecord, BookRepository, CreateBook, UpdateBook};

/// Tables backing the two entities. Ids are TEXT UUIDs; every attribute is
/// nullable because upserts may create sparse rows.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS authors (
        id TEXT PRIMARY KEY NOT NULL,
        name TEXT,
        age INTEGER,
        nationality TEXT,
        birthplace TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS books (
        id TEXT PRIMARY KEY NOT NULL,
        name TEXT,
        genre TEXT,
        time TEXT,
        size TEXT,
        author_id TEXT
    )
    "#,
];

/// Database wrapper providing connection pool access
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open a connection pool at `location` and make sure both tables exist.
    ///
    /// `location` may be a `sqlite:` URL, `:memory:`, or a plain file path.
    /// Parent directories of a plain path are created on demand.
    pub async fn connect(location: &str, max_connections: u32) -> Result<Self> {
        if location == ":memory:" || location == "sqlite::memory:" {
            return Self::in_memory().await;
        }

        let options = if location.starts_with("sqlite:") {
            SqliteConnectOptions::from_str(location)
                .with_context(|| format!("Invalid database URL '{}'", location))?
        } else {
            if let Some(parent) = Path::new(location).parent()
                && !parent.as_os_str().is_empty()
            {
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            SqliteConnectOptions::new().filename(location)
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options.create_if_missing(true))
            .await
            .with_context(|| format!("Failed to open database at '{}'", location))?;

        let db = Self { pool };
        db.ensure_schema().await?;
        Ok(db)
    }

    /// An in-memory database on a single pinned connection, so every query
    /// sees the same data for the life of the pool.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(SqliteConnectOptions::from_str("sqlite::memory:")?)
            .await?;

        let db = Self { pool };
        db.ensure_schema().await?;
        Ok(db)
    }

    /// Create the authors and books tables if they are missing
    pub async fn ensure_schema(&self) -> Result<()> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .context("Failed to create tables")?;
        }
        Ok(())
    }

    /// Get the connection pool
    #[cfg(test)]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Get an author repository
    pub fn authors(&self) -> AuthorRepository {
        AuthorRepository::new(self.pool.clone())
    }

    /// Get a book repository
    pub fn books(&self) -> BookRepository {
        BookRepository::new(self.pool.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_creates_file_and_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("bookshelf.db");

        let db = Database::connect(path.to_str().unwrap(), 2).await.unwrap();
        db.authors()
            .create(CreateAuthor {
                name: "Lu Xun".to_string(),
                age: 55,
                nationality: None,
                birthplace: None,
            })
            .await
            .unwrap();

        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_data_survives_reconnect() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("shelf.db").display());

        let db = Database::connect(&url, 2).await.unwrap();
        let created = db
            .books()
            .create(CreateBook {
                name: "Dream of the Red Chamber".to_string(),
                genre: "Novel".to_string(),
                author_id: "cao-xueqin".to_string(),
                time: None,
                size: None,
            })
            .await
            .unwrap();
        db.pool().close().await;

        let reopened = Database::connect(&url, 2).await.unwrap();
        let fetched = reopened.books().get_by_id(created.id).await.unwrap();
        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn test_ensure_schema_is_idempotent() {
        let db = Database::in_memory().await.unwrap();
        tokio_test::assert_ok!(db.ensure_schema().await);
        tokio_test::assert_ok!(db.ensure_schema().await);
    }
}
