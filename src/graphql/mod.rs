//! GraphQL API over authors and books
//!
//! Each root field lives in a domain-specific struct under `queries/` or
//! `mutations/`; `schema.rs` merges them with `#[derive(MergedObject)]`.

pub mod helpers;
pub mod mutations;
pub mod queries;
mod schema;
pub mod types;

pub use helpers::EditPolicy;
pub use schema::{BookshelfSchema, build_schema, schema_sdl};
