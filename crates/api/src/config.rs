//! API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `API_DATABASE_URL` - `PostgreSQL` connection string
//! - `API_JWT_SECRET` - Token signing secret (min 32 chars, no placeholders)
//!
//! ## Optional
//! - `API_HOST` - Bind address (default: 127.0.0.1)
//! - `API_PORT` - Listen port (default: 3000)
//! - `API_TOKEN_TTL_MINUTES` - Access token lifetime (default: 1440)
//! - `API_ENFORCE_ORDER_OWNERSHIP` - Require ownership for single-order
//!   read/update (default: true)

use std::net::{IpAddr, SocketAddr};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_SECRET_LENGTH: usize = 32;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// API application configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Token signing secret
    pub jwt_secret: SecretString,
    /// Access token lifetime in minutes
    pub token_ttl_minutes: i64,
    /// Whether single-order read/update requires ownership (or admin).
    /// Off restores the legacy behavior where any authenticated caller may
    /// fetch or update any order by id.
    pub enforce_order_ownership: bool,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid,
    /// or if the signing secret fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = require_env("API_DATABASE_URL").map(SecretString::from)?;

        let jwt_secret = require_env("API_JWT_SECRET").map(SecretString::from)?;
        validate_secret("API_JWT_SECRET", jwt_secret.expose_secret())?;

        let host = optional_env("API_HOST")
            .map_or(Ok(IpAddr::from([127, 0, 0, 1])), |v| {
                v.parse()
                    .map_err(|_| ConfigError::InvalidEnvVar("API_HOST".into(), v))
            })?;

        let port = optional_env("API_PORT").map_or(Ok(3000), |v| {
            v.parse()
                .map_err(|_| ConfigError::InvalidEnvVar("API_PORT".into(), v))
        })?;

        let token_ttl_minutes = optional_env("API_TOKEN_TTL_MINUTES").map_or(Ok(1440), |v| {
            v.parse()
                .map_err(|_| ConfigError::InvalidEnvVar("API_TOKEN_TTL_MINUTES".into(), v))
        })?;

        let enforce_order_ownership =
            optional_env("API_ENFORCE_ORDER_OWNERSHIP").map_or(Ok(true), |v| {
                parse_bool(&v).ok_or_else(|| {
                    ConfigError::InvalidEnvVar("API_ENFORCE_ORDER_OWNERSHIP".into(), v)
                })
            })?;

        Ok(Self {
            database_url,
            host,
            port,
            jwt_secret,
            token_ttl_minutes,
            enforce_order_ownership,
        })
    }

    /// The socket address to bind the server to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn require_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_owned()))
}

fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Reject secrets that are too short or look like placeholders.
fn validate_secret(name: &str, value: &str) -> Result<(), ConfigError> {
    if value.len() < MIN_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            name.to_owned(),
            format!("must be at least {MIN_SECRET_LENGTH} characters"),
        ));
    }

    let lowered = value.to_ascii_lowercase();
    for pattern in PLACEHOLDER_PATTERNS {
        if lowered.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                name.to_owned(),
                format!("contains placeholder pattern \"{pattern}\""),
            ));
        }
    }

    Ok(())
}
