//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `NILE_DATABASE_URL` - `PostgreSQL` connection string (relational backend
//!   only; falls back to `DATABASE_URL`)
//!
//! ## Optional
//! - `NILE_BACKEND` - Repository backend: `relational` (default) or `in-memory`
//! - `NILE_HOST` - Bind address (default: 127.0.0.1)
//! - `NILE_PORT` - Listen port (default: 8000)
//!
//! Configuration is read once at startup into an immutable value carried by
//! the application state; nothing mutates it afterwards.

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

use crate::repository::RepositoryBackend;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Which repository backend serves requests.
    pub backend: RepositoryBackend,
    /// `PostgreSQL` connection URL (contains password). Present only when
    /// the relational backend is in use.
    pub database_url: Option<SecretString>,
    /// IP address to bind the server to.
    pub host: IpAddr,
    /// Port to listen on.
    pub port: u16,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let backend = get_env_or_default("NILE_BACKEND", RepositoryBackend::Relational.as_str())
            .parse::<RepositoryBackend>()
            .map_err(|e| ConfigError::InvalidEnvVar("NILE_BACKEND".to_owned(), e.to_string()))?;

        let database_url = match backend {
            RepositoryBackend::Relational => Some(get_database_url("NILE_DATABASE_URL")?),
            RepositoryBackend::InMemory => get_optional_database_url("NILE_DATABASE_URL"),
        };

        let host = get_env_or_default("NILE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("NILE_HOST".to_owned(), e.to_string()))?;
        let port = get_env_or_default("NILE_PORT", "8000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("NILE_PORT".to_owned(), e.to_string()))?;

        Ok(Self {
            backend,
            database_url,
            host,
            port,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    get_optional_database_url(primary_key)
        .ok_or_else(|| ConfigError::MissingEnvVar(primary_key.to_owned()))
}

fn get_optional_database_url(primary_key: &str) -> Option<SecretString> {
    if let Ok(value) = std::env::var(primary_key) {
        return Some(SecretString::from(value));
    }
    // Fallback to generic DATABASE_URL
    std::env::var("DATABASE_URL").ok().map(SecretString::from)
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}
