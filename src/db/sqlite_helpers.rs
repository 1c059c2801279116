//! SQLite helper utilities for type conversion
//!
//! SQLite doesn't natively support UUIDs, so ids are stored as TEXT and
//! converted at the row boundary.

use anyhow::{Result, anyhow};
use uuid::Uuid;

/// Convert a UUID to a SQLite-compatible string
#[inline]
pub fn uuid_to_str(id: Uuid) -> String {
    id.to_string()
}

/// Parse a SQLite string back to a UUID
#[inline]
pub fn str_to_uuid(s: &str) -> Result<Uuid> {
    Uuid::parse_str(s).map_err(|e| anyhow!("Invalid UUID '{}': {}", s, e))
}

/// Decode the `id` column of a row, mapping parse failures to a decode error
pub fn decode_id(row: &sqlx::sqlite::SqliteRow) -> sqlx::Result<Uuid> {
    use sqlx::Row;

    let id_str: String = row.try_get("id")?;
    str_to_uuid(&id_str).map_err(|e| sqlx::Error::Decode(e.into()))
}
