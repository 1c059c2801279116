//! Bookshelf - GraphQL API for authors and their books
//!
//! All operations are exposed via GraphQL at /graphql.

mod api;
mod app;
mod cli;
mod config;
mod db;
mod graphql;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::{AppState, build_app};
use crate::cli::CliOptions;
use crate::config::Config;
use crate::db::Database;
use crate::graphql::EditPolicy;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let options = CliOptions::from_args();
    if options.print_schema {
        println!("{}", graphql::schema_sdl());
        return Ok(());
    }

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookshelf=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    tracing::info!("Starting Bookshelf");

    let config = Arc::new(Config::from_env()?);
    tracing::info!(
        port = config.port,
        graphiql = config.graphiql,
        edit_upsert = config.edit_upsert,
        "Configuration loaded"
    );

    let db = match Database::connect(&config.database_url, config.database_max_connections).await
    {
        Ok(db) => db,
        Err(e) => {
            tracing::error!(error = %e, database = %config.database_url, "connection error");
            return Err(e);
        }
    };
    tracing::info!(database = %config.database_url, "Database connected");

    let schema = graphql::build_schema(
        db.clone(),
        EditPolicy {
            upsert: config.edit_upsert,
        },
    );
    tracing::info!("GraphQL schema built");

    let state = AppState {
        config: config.clone(),
        db,
        schema,
    };
    let app = build_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);
    if config.graphiql {
        tracing::info!("GraphiQL console: {}/graphql", config.public_url());
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
