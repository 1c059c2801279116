//! Application configuration management

use std::env;

use anyhow::{Context, Result, bail};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host (for generating URLs)
    pub host: Option<String>,

    /// Server port
    pub port: u16,

    /// SQLite URL (`sqlite:...`), `:memory:`, or a file path
    pub database_url: String,

    /// Connection pool size
    pub database_max_connections: u32,

    /// Serve the GraphiQL console on GET /graphql
    pub graphiql: bool,

    /// Whether editAuthor/editBook insert a record when the id is unknown
    pub edit_upsert: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: None,
            port: 4000,
            database_url: "./data/bookshelf.db".to_string(),
            database_max_connections: 10,
            graphiql: true,
            edit_upsert: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup, falling back to defaults
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let database_url = lookup("DATABASE_PATH")
            .or_else(|| lookup("DATABASE_URL"))
            .unwrap_or(defaults.database_url);

        Ok(Self {
            host: lookup("HOST"),

            port: match lookup("PORT") {
                Some(v) => v.parse().context("Invalid PORT")?,
                None => defaults.port,
            },

            database_url,

            database_max_connections: match lookup("DATABASE_MAX_CONNECTIONS") {
                Some(v) => v.parse().context("Invalid DATABASE_MAX_CONNECTIONS")?,
                None => defaults.database_max_connections,
            },

            graphiql: match lookup("GRAPHIQL") {
                Some(v) => parse_bool(&v).context("Invalid GRAPHIQL")?,
                None => defaults.graphiql,
            },

            edit_upsert: match lookup("EDIT_UPSERT") {
                Some(v) => parse_bool(&v).context("Invalid EDIT_UPSERT")?,
                None => defaults.edit_upsert,
            },
        })
    }

    /// Base URL used in startup logs
    pub fn public_url(&self) -> String {
        format!(
            "http://{}:{}",
            self.host.as_deref().unwrap_or("localhost"),
            self.port
        )
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => bail!("expected a boolean, got '{}'", other),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.port, 4000);
        assert_eq!(config.database_url, "./data/bookshelf.db");
        assert!(config.graphiql);
        assert!(config.edit_upsert);
        assert_eq!(config.public_url(), "http://localhost:4000");
    }

    #[test]
    fn test_database_path_wins_over_url() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_PATH", "/srv/shelf.db"),
            ("DATABASE_URL", "sqlite::memory:"),
        ]))
        .unwrap();
        assert_eq!(config.database_url, "/srv/shelf.db");
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("HOST", "books.example"),
            ("PORT", "8080"),
            ("GRAPHIQL", "no"),
            ("EDIT_UPSERT", "FALSE"),
            ("DATABASE_MAX_CONNECTIONS", "3"),
        ]))
        .unwrap();
        assert_eq!(config.port, 8080);
        assert!(!config.graphiql);
        assert!(!config.edit_upsert);
        assert_eq!(config.database_max_connections, 3);
        assert_eq!(config.public_url(), "http://books.example:8080");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert_matches!(Config::from_lookup(lookup_from(&[("PORT", "http")])), Err(_));
        assert_matches!(
            Config::from_lookup(lookup_from(&[("EDIT_UPSERT", "maybe")])),
            Err(_)
        );
    }
}
