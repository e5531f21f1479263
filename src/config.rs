//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Database connection URL
    pub database_url: String,

    /// Maximum database connections in pool
    pub database_max_connections: u32,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,

    /// Deadline for a single storage call
    pub storage_timeout: Duration,

    /// Log output format ("pretty" or "json"; production defaults to json)
    pub log_format: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = match lookup("DATABASE_URL") {
            Some(url) => url,
            None => postgres_url_from_parts(&lookup)?,
        };

        let database_max_connections = lookup("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|| "10".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS"))?;

        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = lookup("PORT")
            .unwrap_or_else(|| "80".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT"))?;

        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string());

        let storage_timeout_secs: u64 = lookup("STORAGE_TIMEOUT_SECS")
            .unwrap_or_else(|| "5".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("STORAGE_TIMEOUT_SECS"))?;
        if storage_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue("STORAGE_TIMEOUT_SECS"));
        }

        let log_format = lookup("LOG_FORMAT").unwrap_or_else(|| {
            if environment == "production" {
                "json".to_string()
            } else {
                "pretty".to_string()
            }
        });

        Ok(Self {
            database_url,
            database_max_connections,
            host,
            port,
            environment,
            storage_timeout: Duration::from_secs(storage_timeout_secs),
            log_format,
        })
    }

    /// Check if logs should be emitted as JSON
    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}

/// Assemble a connection URL from the docker-compose style POSTGRES_* variables
fn postgres_url_from_parts<F>(lookup: &F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let user = lookup("POSTGRES_USER").ok_or(ConfigError::MissingEnv("DATABASE_URL"))?;
    let password = lookup("POSTGRES_PASSWORD").unwrap_or_default();
    let db_name = lookup("POSTGRES_DB").unwrap_or_else(|| user.clone());
    let host = lookup("POSTGRES_HOST").unwrap_or_else(|| "db".to_string());
    let port: u16 = lookup("POSTGRES_PORT")
        .unwrap_or_else(|| "5432".to_string())
        .parse()
        .map_err(|_| ConfigError::InvalidValue("POSTGRES_PORT"))?;

    Ok(format!(
        "postgres://{}:{}@{}:{}/{}?sslmode=disable",
        user, password, host, port, db_name
    ))
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
