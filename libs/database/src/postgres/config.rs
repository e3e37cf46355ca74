use sea_orm::ConnectOptions;
use std::time::Duration;

use core_config::{env_or_default, env_required, ConfigError, FromEnv};

/// PostgreSQL connection-pool configuration.
///
/// Constructed manually or loaded from the environment:
/// `DATABASE_URL` (required), `DATABASE_MAX_CONNECTIONS`,
/// `DATABASE_MIN_CONNECTIONS`.
#[derive(Clone, Debug)]
pub struct PostgresConfig {
    /// Database connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,

    /// Connection acquire timeout in seconds
    pub acquire_timeout_secs: u64,

    /// Enable SQL query logging
    pub sqlx_logging: bool,
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 20,
            min_connections: 2,
            acquire_timeout_secs: 8,
            sqlx_logging: true,
        }
    }

    /// Convert into SeaORM [`ConnectOptions`]
    pub fn into_connect_options(self) -> ConnectOptions {
        let mut options = ConnectOptions::new(self.url);
        options
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
            .sqlx_logging(self.sqlx_logging);
        options
    }
}

impl FromEnv for PostgresConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = env_required("DATABASE_URL")?;
        let max_connections = parse_env("DATABASE_MAX_CONNECTIONS", "20")?;
        let min_connections = parse_env("DATABASE_MIN_CONNECTIONS", "2")?;

        let mut config = Self::new(url);
        config.max_connections = max_connections;
        config.min_connections = min_connections;
        Ok(config)
    }
}

fn parse_env(key: &str, default: &str) -> Result<u32, ConfigError> {
    env_or_default(key, default)
        .parse()
        .map_err(|e| ConfigError::ParseError {
            key: key.to_string(),
            details: format!("{}", e),
        })
}
