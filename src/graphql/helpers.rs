// Helper functions shared across GraphQL query/mutation modules.

use std::fmt::Display;

use async_graphql::{Context, ID};
use thiserror::Error;
use uuid::Uuid;

/// Argument errors detected before touching the database
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("Invalid {kind} ID '{value}'")]
    InvalidId { kind: &'static str, value: String },
}

/// Parse a GraphQL id into the UUID used as primary key
pub(crate) fn parse_id(kind: &'static str, id: &ID) -> Result<Uuid, InputError> {
    Uuid::parse_str(id.as_str()).map_err(|_| InputError::InvalidId {
        kind,
        value: id.to_string(),
    })
}

/// Turns a failed lookup into a null field plus an entry in the response's
/// `errors` array, so sibling fields keep resolving and `data` keeps its shape.
pub(crate) trait OrFieldError<T> {
    fn or_field_error(self, ctx: &Context<'_>) -> Option<T>;
}

impl<T, E: Display> OrFieldError<T> for Result<T, E> {
    fn or_field_error(self, ctx: &Context<'_>) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(e) => {
                let error = async_graphql::Error::new(e.to_string()).into_server_error(ctx.item.pos);
                ctx.add_error(ctx.set_error_path(error));
                None
            }
        }
    }
}

/// Settings that change how edit mutations behave
#[derive(Debug, Clone, Copy)]
pub struct EditPolicy {
    /// Insert a new record when the edited id does not exist
    pub upsert: bool,
}

impl Default for EditPolicy {
    fn default() -> Self {
        Self { upsert: true }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn test_parse_id_accepts_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id("book", &ID(id.to_string())), Ok(id));
    }

    #[test]
    fn test_parse_id_rejects_garbage() {
        let err = parse_id("book", &ID::from("5f2b1c")).unwrap_err();
        assert_matches!(err, InputError::InvalidId { kind: "book", .. });
        assert_eq!(err.to_string(), "Invalid book ID '5f2b1c'");
    }
}
