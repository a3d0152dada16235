//! Database configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Database configuration
///
/// The database section is optional at the application level; without it
/// the server falls back to the in-memory store.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Minimum connections to maintain
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Maximum connections allowed
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Connection acquire timeout in seconds
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,

    /// Run migrations on startup
    #[serde(default)]
    pub run_migrations: bool,
}

impl DatabaseConfig {
    /// Get acquire timeout as Duration
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    /// Validate database configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.is_empty() {
            return Err(ValidationError::MissingRequired("DATABASE_URL"));
        }
        if !self.url.starts_with("postgres://") && !self.url.starts_with("postgresql://") {
            return Err(ValidationError::InvalidDatabaseUrl);
        }
        if self.min_connections > self.max_connections {
            return Err(ValidationError::InvalidPoolSize);
        }
        if self.max_connections > 100 {
            return Err(ValidationError::PoolSizeTooLarge);
        }
        Ok(())
    }
}

fn default_min_connections() -> u32 {
    1
}

fn default_max_connections() -> u32 {
    10
}

fn default_acquire_timeout() -> u64 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_url(url: &str) -> DatabaseConfig {
        DatabaseConfig {
            url: url.to_string(),
            min_connections: default_min_connections(),
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout(),
            run_migrations: false,
        }
    }

    #[test]
    fn test_valid_postgres_url() {
        assert!(config_with_url("postgres://localhost/game").validate().is_ok());
        assert!(config_with_url("postgresql://localhost/game").validate().is_ok());
    }

    #[test]
    fn test_empty_url_is_rejected() {
        assert!(config_with_url("").validate().is_err());
    }

    #[test]
    fn test_non_postgres_url_is_rejected() {
        assert!(config_with_url("mysql://localhost/game").validate().is_err());
    }

    #[test]
    fn test_inverted_pool_sizes_are_rejected() {
        let mut config = config_with_url("postgres://localhost/game");
        config.min_connections = 20;
        config.max_connections = 10;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_oversized_pool_is_rejected() {
        let mut config = config_with_url("postgres://localhost/game");
        config.max_connections = 500;
        assert!(config.validate().is_err());
    }
}
