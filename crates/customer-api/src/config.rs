//! Configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CUSTOMER_API_DATABASE_URL` - `PostgreSQL` connection string
//!
//! ## Optional
//! - `CUSTOMER_API_HOST` - Bind address (default: 127.0.0.1)
//! - `CUSTOMER_API_PORT` - Listen port (default: 3002)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::IpAddr;

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3002;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Customer API application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads `.env` first via dotenvy, so local development can keep its
    /// settings out of the shell.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a required variable is missing or a value
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let database_url = SecretString::from(require("CUSTOMER_API_DATABASE_URL")?);
        let host = parse_host(optional("CUSTOMER_API_HOST"))?;
        let port = parse_port(optional("CUSTOMER_API_PORT"))?;
        let sentry_dsn = optional("SENTRY_DSN");

        Ok(Self {
            database_url,
            host,
            port,
            sentry_dsn,
        })
    }
}

fn require(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_owned()))
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn parse_host(raw: Option<String>) -> Result<IpAddr, ConfigError> {
    raw.as_deref()
        .unwrap_or(DEFAULT_HOST)
        .parse()
        .map_err(|e| ConfigError::InvalidEnvVar("CUSTOMER_API_HOST".to_owned(), format!("{e}")))
}

fn parse_port(raw: Option<String>) -> Result<u16, ConfigError> {
    raw.as_deref().map_or(Ok(DEFAULT_PORT), |value| {
        value.parse().map_err(|e| {
            ConfigError::InvalidEnvVar("CUSTOMER_API_PORT".to_owned(), format!("{e}"))
        })
    })
}
