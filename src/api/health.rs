//! Liveness and readiness endpoints

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::app::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Readiness report. Counts are only present when the shelf could be read.
#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    pub ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authors: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub books: Option<i64>,
}

async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Ready once both tables answer a count
async fn readyz(State(state): State<AppState>) -> (StatusCode, Json<ReadyResponse>) {
    let authors = state.db.authors();
    let books = state.db.books();

    match tokio::try_join!(authors.count(), books.count()) {
        Ok((authors, books)) => (
            StatusCode::OK,
            Json(ReadyResponse {
                ready: true,
                authors: Some(authors),
                books: Some(books),
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadyResponse {
                    ready: false,
                    authors: None,
                    books: None,
                }),
            )
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_failed_readiness_omits_counts() {
        let body = ReadyResponse {
            ready: false,
            authors: None,
            books: None,
        };
        assert_eq!(serde_json::to_value(&body).unwrap(), json!({ "ready": false }));
    }
}
