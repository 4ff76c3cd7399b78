//! Database Connection Pool
//!
//! Postgres pool shared by every repository. The pool is intentionally
//! small: each request borrows a connection only for the duration of a
//! single repository call, and scoped acquisition guarantees release on
//! every exit path.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use tracing::info;

use crate::shared::config::PostgresConfig;

/// Connection pool configuration
#[derive(Debug, Clone)]
pub struct ConnectionPoolConfig {
    /// Maximum number of connections in the pool (default: 10)
    pub max_connections: u32,
    /// Minimum number of connections to maintain (default: 1)
    pub min_connections: u32,
    /// Acquire timeout in seconds (default: 30)
    pub acquire_timeout_secs: u64,
}

impl Default for ConnectionPoolConfig {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 1,
            acquire_timeout_secs: 30,
        }
    }
}

impl ConnectionPoolConfig {
    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max.max(1);
        self
    }

    pub fn with_min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Validates configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_connections < self.min_connections {
            return Err(format!(
                "Max connections ({}) must be >= min connections ({})",
                self.max_connections, self.min_connections
            ));
        }
        Ok(())
    }
}

/// Creates the application's Postgres pool
///
/// # Errors
/// Returns an error when the configuration is invalid or the database is
/// unreachable
pub async fn create_pool(
    postgres: &PostgresConfig,
    config: ConnectionPoolConfig,
) -> Result<Pool<Postgres>, String> {
    config.validate()?;

    info!(
        "Creating connection pool: max={}, min={}, timeout={}s",
        config.max_connections, config.min_connections, config.acquire_timeout_secs
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(&postgres.connection_url())
        .await
        .map_err(|e| format!("Failed to create connection pool: {}", e))?;

    info!("Connection pool created successfully");
    Ok(pool)
}
