//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! | Variable | Required | Default |
//! |----------|----------|---------|
//! | `STOREFRONT_DATABASE_URL` | yes (falls back to `DATABASE_URL`) | |
//! | `STOREFRONT_HOST` | no | `127.0.0.1` |
//! | `STOREFRONT_PORT` | no | `3000` |
//! | `STOREFRONT_BASE_URL` | no | `http://localhost:3000` |
//! | `ADMIN_BASE_URL` | no | `http://localhost:3001` |
//! | `FOODIA_LOG_JSON` | no | unset (text logs) |
//! | `SENTRY_DSN` | no | |
//! | `SENTRY_ENVIRONMENT` | no | |
//! | `SENTRY_SAMPLE_RATE` | no | `1.0` |
//! | `SENTRY_TRACES_SAMPLE_RATE` | no | `0.1` |

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// `PostgreSQL` connection URL.
    pub database_url: SecretString,
    /// Host address to bind to.
    pub host: IpAddr,
    /// Port to listen on.
    pub port: u16,
    /// Public URL of this site, used for the session cookie `Secure` flag.
    pub base_url: String,
    /// Public URL of the admin binary, linked from the landing page.
    pub admin_base_url: String,
    /// Emit JSON log lines instead of human-readable text.
    pub log_json: bool,
    /// Sentry DSN for error tracking.
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag.
    pub sentry_environment: Option<String>,
    /// Fraction of errors sent to Sentry.
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced.
    pub sentry_traces_sample_rate: f32,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the database URL is missing or a value fails
    /// to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("STOREFRONT_DATABASE_URL")?;
        let host = parse_env("STOREFRONT_HOST", "127.0.0.1")?;
        let port = parse_env("STOREFRONT_PORT", "3000")?;
        let base_url = get_url("STOREFRONT_BASE_URL", "http://localhost:3000")?;
        let admin_base_url = get_url("ADMIN_BASE_URL", "http://localhost:3001")?;

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            admin_base_url,
            log_json: get_optional_env("FOODIA_LOG_JSON").is_some(),
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_env("SENTRY_SAMPLE_RATE", "1.0")?,
            sentry_traces_sample_rate: parse_env("SENTRY_TRACES_SAMPLE_RATE", "0.1")?,
        })
    }

    /// Get the socket address to bind to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` flag.
    #[must_use]
    pub fn is_https(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    std::env::var(primary_key)
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| ConfigError::MissingEnvVar(primary_key.to_string()))
}

fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Read a base URL, validate it, and strip any trailing slash.
fn get_url(key: &str, default: &str) -> Result<String, ConfigError> {
    let raw = get_env_or_default(key, default);
    Url::parse(&raw).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    Ok(raw.trim_end_matches('/').to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> StorefrontConfig {
        StorefrontConfig {
            database_url: SecretString::from("postgres://localhost/test"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: base_url.to_string(),
            admin_base_url: "http://localhost:3001".to_string(),
            log_json: false,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.1,
        }
    }

    #[test]
    fn test_socket_addr() {
        let addr = config("http://localhost:3000").socket_addr();
        assert_eq!(addr.to_string(), "127.0.0.1:3000");
    }

    #[test]
    fn test_is_https() {
        assert!(!config("http://localhost:3000").is_https());
        assert!(config("https://foodia.app").is_https());
    }

    #[test]
    fn test_parse_env_default() {
        let port: u16 = parse_env("FOODIA_TEST_UNSET_PORT", "4000").unwrap();
        assert_eq!(port, 4000);
    }

    #[test]
    fn test_parse_env_invalid() {
        let result: Result<u16, _> = parse_env("FOODIA_TEST_UNSET_PORT", "not-a-port");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_get_url_rejects_garbage() {
        assert!(get_url("FOODIA_TEST_UNSET_URL", "not a url").is_err());
        assert_eq!(
            get_url("FOODIA_TEST_UNSET_URL", "http://localhost:3001/").unwrap(),
            "http://localhost:3001"
        );
    }
}
