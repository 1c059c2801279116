//! Authors database repository

use anyhow::Result;
use uuid::Uuid;

#[cfg(feature = "sqlite")]
use sqlx::SqlitePool;

#[cfg(feature = "sqlite")]
use crate::db::sqlite_helpers::{decode_id, uuid_to_str};

#[cfg(feature = "sqlite")]
type DbPool = SqlitePool;

const AUTHOR_COLUMNS: &str = "id, name, age, nationality, birthplace";

/// Author record from database
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorRecord {
    pub id: Uuid,
    pub name: Option<String>,
    pub age: Option<i32>,
    pub nationality: Option<String>,
    pub birthplace: Option<String>,
}

#[cfg(feature = "sqlite")]
impl sqlx::FromRow<'_, sqlx::sqlite::SqliteRow> for AuthorRecord {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> sqlx::Result<Self> {
        use sqlx::Row;

        Ok(Self {
            id: decode_id(row)?,
            name: row.try_get("name")?,
            age: row.try_get("age")?,
            nationality: row.try_get("nationality")?,
            birthplace: row.try_get("birthplace")?,
        })
    }
}

/// Input for creating an author
#[derive(Debug)]
pub struct CreateAuthor {
    pub name: String,
    pub age: i32,
    pub nationality: Option<String>,
    pub birthplace: Option<String>,
}

/// Input for updating an author. `None` keeps the stored value.
#[derive(Debug, Default)]
pub struct UpdateAuthor {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub nationality: Option<String>,
    pub birthplace: Option<String>,
}

/// Author repository
pub struct AuthorRepository {
    pool: DbPool,
}

impl AuthorRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// List every author in insertion order
    pub async fn list_all(&self) -> Result<Vec<AuthorRecord>> {
        let records = sqlx::query_as::<_, AuthorRecord>(&format!(
            "SELECT {AUTHOR_COLUMNS} FROM authors ORDER BY rowid"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Number of stored authors
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Get an author by ID
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<AuthorRecord>> {
        let record = sqlx::query_as::<_, AuthorRecord>(&format!(
            "SELECT {AUTHOR_COLUMNS} FROM authors WHERE id = ?1"
        ))
        .bind(uuid_to_str(id))
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Create an author with a freshly generated id
    pub async fn create(&self, input: CreateAuthor) -> Result<AuthorRecord> {
        let id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO authors (id, name, age, nationality, birthplace)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(uuid_to_str(id))
        .bind(&input.name)
        .bind(input.age)
        .bind(&input.nationality)
        .bind(&input.birthplace)
        .execute(&self.pool)
        .await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Failed to retrieve author after insert"))
    }

    /// Update an author in place.
    ///
    /// With `upsert` set, a missing id is inserted with the given attributes
    /// and the stored record is always returned. Without it, a missing id
    /// returns `None` and nothing is written.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateAuthor,
        upsert: bool,
    ) -> Result<Option<AuthorRecord>> {
        let id_str = uuid_to_str(id);

        if upsert {
            sqlx::query(
                r#"
                INSERT INTO authors (id, name, age, nationality, birthplace)
                VALUES (?1, ?2, ?3, ?4, ?5)
                ON CONFLICT(id) DO UPDATE SET
                    name = COALESCE(excluded.name, authors.name),
                    age = COALESCE(excluded.age, authors.age),
                    nationality = COALESCE(excluded.nationality, authors.nationality),
                    birthplace = COALESCE(excluded.birthplace, authors.birthplace)
                "#,
            )
            .bind(&id_str)
            .bind(&input.name)
            .bind(input.age)
            .bind(&input.nationality)
            .bind(&input.birthplace)
            .execute(&self.pool)
            .await?;

            return self.get_by_id(id).await;
        }

        let result = sqlx::query(
            r#"
            UPDATE authors SET
                name = COALESCE(?2, name),
                age = COALESCE(?3, age),
                nationality = COALESCE(?4, nationality),
                birthplace = COALESCE(?5, birthplace)
            WHERE id = ?1
            "#,
        )
        .bind(&id_str)
        .bind(&input.name)
        .bind(input.age)
        .bind(&input.nationality)
        .bind(&input.birthplace)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() > 0 {
            self.get_by_id(id).await
        } else {
            Ok(None)
        }
    }

    /// Delete an author, returning the removed record. Books that reference
    /// the author are left untouched.
    pub async fn delete(&self, id: Uuid) -> Result<Option<AuthorRecord>> {
        let record = sqlx::query_as::<_, AuthorRecord>(&format!(
            "DELETE FROM authors WHERE id = ?1 RETURNING {AUTHOR_COLUMNS}"
        ))
        .bind(uuid_to_str(id))
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }
}
