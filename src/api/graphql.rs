//! GraphQL HTTP routes: POST executes requests, GET serves the GraphiQL
//! console to browsers and runs read-only queries passed as `?query=`.

use async_graphql::http::GraphiQLSource;
use async_graphql::parser::parse_query;
use async_graphql::parser::types::OperationType;
use async_graphql_axum::rejection::GraphQLRejection;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use serde_json::json;

use crate::app::AppState;

pub const GRAPHQL_PATH: &str = "/graphql";

pub fn router() -> Router<AppState> {
    Router::new().route(GRAPHQL_PATH, get(graphql_get).post(graphql_handler))
}

/// GraphQL query/mutation handler
async fn graphql_handler(State(state): State<AppState>, req: GraphQLRequest) -> GraphQLResponse {
    state.schema.execute(req.into_inner()).await.into()
}

/// GraphiQL for browsers (when enabled), otherwise a query taken from the URL.
async fn graphql_get(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
    req: Result<GraphQLRequest, GraphQLRejection>,
) -> Response {
    let accepts_html = headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("text/html"))
        .unwrap_or(false);

    if accepts_html && state.config.graphiql {
        return Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish()).into_response();
    }

    if uri.query().is_none_or(str::is_empty) {
        return (
            StatusCode::METHOD_NOT_ALLOWED,
            [(header::ALLOW, "POST")],
            Json(json!({
                "errors": [{ "message": "Must provide query string." }]
            })),
        )
            .into_response();
    }

    let request = match req {
        Ok(req) => req.into_inner(),
        Err(rejection) => return rejection.into_response(),
    };

    if selects_mutation(&request) {
        tracing::debug!("Rejected mutation sent over GET");
        return (
            StatusCode::METHOD_NOT_ALLOWED,
            [(header::ALLOW, "POST")],
            Json(json!({
                "errors": [{ "message": "Can only perform a mutation operation from a POST request." }]
            })),
        )
            .into_response();
    }

    GraphQLResponse::from(state.schema.execute(request).await).into_response()
}

/// Whether the operation that would run is a mutation. Documents that fail to
/// parse are left to the executor to report.
fn selects_mutation(request: &async_graphql::Request) -> bool {
    let Ok(document) = parse_query(&request.query) else {
        return false;
    };

    document.operations.iter().any(|(name, operation)| {
        let selected = match (&request.operation_name, name) {
            (Some(wanted), Some(name)) => name.as_str() == wanted,
            _ => true,
        };
        selected && operation.node.ty == OperationType::Mutation
    })
}
