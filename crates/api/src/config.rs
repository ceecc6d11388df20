use std::env;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} must be a valid {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server host to bind to.
    pub host: String,
    /// Server port to bind to.
    pub port: u16,
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Maximum database connections in the pool.
    pub db_max_connections: u32,
    /// Minimum database connections in the pool.
    pub db_min_connections: u32,
    /// Directory exports are written to and served from.
    pub export_dir: PathBuf,
    /// Public origin used in download URLs. Falls back to the request host.
    pub public_base_url: Option<String>,
    /// Log level (e.g., "info", "debug", "trace").
    pub log_level: String,
}

impl AppConfig {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_var("PORT", "8000", "u16")?,
            database_url: env::var("DATABASE_URL")
                .map_err(|_| ConfigError::Missing("DATABASE_URL"))?,
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", "20", "u32")?,
            db_min_connections: parse_var("DB_MIN_CONNECTIONS", "1", "u32")?,
            export_dir: env::var("EXPORT_DIR")
                .unwrap_or_else(|_| "exports".to_string())
                .into(),
            public_base_url: env::var("PUBLIC_BASE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Whether download URLs are built from the client's `Host` header.
    /// Only trustworthy behind a proxy that sets it, or in development.
    pub fn uses_request_host(&self) -> bool {
        self.public_base_url.is_none()
    }

    /// Build the socket address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: std::str::FromStr>(
    name: &'static str,
    default: &str,
    expected: &'static str,
) -> Result<T, ConfigError> {
    let value = env::var(name).unwrap_or_else(|_| default.to_string());
    value.parse().map_err(|_| ConfigError::Invalid {
        name,
        expected,
        value,
    })
}
