//! HTTP route definitions
//!
//! The API is GraphQL at /graphql. Health probes sit beside it.

pub mod graphql;
pub mod health;
