//! Configuration types.

use std::path::PathBuf;

/// Server configuration, read from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Path to the database file.
    pub db_path: PathBuf,
    /// Port the HTTP server listens on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("./data/todo-web.db"),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// Read configuration from `TODO_WEB_DB_PATH` and `TODO_WEB_PORT`,
    /// falling back to the defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let db_path = std::env::var("TODO_WEB_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.db_path);

        let port = std::env::var("TODO_WEB_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        Self { db_path, port }
    }
}
