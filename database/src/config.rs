use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::DatabaseError;

pub const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";

pub struct DatabaseConfig {
    pub url: String,
    pub pool_size: u32,
}

impl DatabaseConfig {
    pub fn new(url: &str) -> Self {
        let pool_size = if is_in_memory(url) { 1 } else { 5 };
        Self {
            url: url.to_string(),
            pool_size,
        }
    }

    pub fn from_cli_or_env_or_yaml(cli_arg: Option<String>, yaml_config: Option<String>) -> Self {
        let url = if let Some(arg) = cli_arg {
            arg
        } else if let Ok(env) = std::env::var("DATABASE_URL") {
            env
        } else if let Some(yaml) = yaml_config {
            yaml
        } else {
            DEFAULT_DATABASE_URL.to_string()
        };

        Self::new(&url)
    }

    pub fn is_in_memory(&self) -> bool {
        is_in_memory(&self.url)
    }

    /// Opens the pool and checks that one connection can be established.
    /// An in-memory database lives only as long as its connection, so its
    /// pool keeps a single connection alive indefinitely.
    pub async fn create_pool(&self) -> Result<sqlx::SqlitePool, DatabaseError> {
        let options = SqliteConnectOptions::from_str(&self.url)
            .map_err(DatabaseError::connection)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool_options = if self.is_in_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(self.pool_size.max(1))
        };

        tracing::debug!("Connecting to {}", self.url);
        pool_options
            .connect_with(options)
            .await
            .map_err(DatabaseError::connection)
    }
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}
