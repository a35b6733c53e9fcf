//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOCKROOM_JWT_SECRET` - Session token signing secret (min 32 chars, high entropy)
//! - `STOCKROOM_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`; only required when `STOCKROOM_STORAGE=postgres`)
//!
//! ## Optional
//! - `STOCKROOM_STORAGE` - `postgres` (default) or `memory`
//! - `STOCKROOM_HOST` - Bind address (default: 127.0.0.1)
//! - `STOCKROOM_PORT` - Listen port (default: 8080)
//! - `STOCKROOM_CORS_ORIGINS` - Comma-separated allowed origins (default: any)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_TRACES_SAMPLE_RATE` - Fraction of requests traced (default: 0.0)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_SIGNING_SECRET_LENGTH: usize = 32;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Substrings that mark a secret as a copy-pasted placeholder (case-insensitive).
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
    "insert",
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

/// Where products and users are persisted.
#[derive(Debug, Clone)]
pub enum StorageConfig {
    /// `PostgreSQL` via a connection pool.
    Postgres {
        /// Connection URL (contains password).
        database_url: SecretString,
    },
    /// Process-local storage; everything is lost on restart.
    Memory,
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Storage backend
    pub storage: StorageConfig,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Session token signing secret
    pub jwt_secret: SecretString,
    /// Allowed CORS origins; empty means any origin
    pub cors_origins: Vec<String>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Fraction of transactions sent to Sentry
    pub sentry_traces_sample_rate: f32,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the signing secret fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`ServerConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let storage = match env.or_default("STOCKROOM_STORAGE", "postgres").as_str() {
            "postgres" => StorageConfig::Postgres {
                database_url: env
                    .get("STOCKROOM_DATABASE_URL")
                    .or_else(|| env.get("DATABASE_URL"))
                    .map(SecretString::from)
                    .ok_or_else(|| {
                        ConfigError::MissingEnvVar("STOCKROOM_DATABASE_URL".to_string())
                    })?,
            },
            "memory" => StorageConfig::Memory,
            other => {
                return Err(ConfigError::InvalidEnvVar(
                    "STOCKROOM_STORAGE".to_string(),
                    format!("expected 'postgres' or 'memory', got '{other}'"),
                ));
            }
        };

        let host = env.parse_or_default::<IpAddr>("STOCKROOM_HOST", "127.0.0.1")?;
        let port = env.parse_or_default::<u16>("STOCKROOM_PORT", "8080")?;

        let jwt_secret = env
            .get("STOCKROOM_JWT_SECRET")
            .map(SecretString::from)
            .ok_or_else(|| ConfigError::MissingEnvVar("STOCKROOM_JWT_SECRET".to_string()))?;
        validate_signing_secret(&jwt_secret, "STOCKROOM_JWT_SECRET")?;

        let cors_origins = env
            .get("STOCKROOM_CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            storage,
            host,
            port,
            jwt_secret,
            cors_origins,
            sentry_dsn: env.get("SENTRY_DSN"),
            sentry_environment: env.get("SENTRY_ENVIRONMENT"),
            sentry_traces_sample_rate: env
                .parse_or_default::<f32>("SENTRY_TRACES_SAMPLE_RATE", "0.0")?,
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

/// Variable lookup with the parsing helpers used above.
struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    fn or_default(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    fn parse_or_default<T>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.or_default(key, default)
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Reject signing secrets that are short, placeholders, or low entropy.
fn validate_signing_secret(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    let insecure = |reason: String| ConfigError::InsecureSecret(var_name.to_string(), reason);

    if value.len() < MIN_SIGNING_SECRET_LENGTH {
        return Err(insecure(format!(
            "must be at least {MIN_SIGNING_SECRET_LENGTH} characters (got {})",
            value.len()
        )));
    }

    let lower = value.to_lowercase();
    if let Some(pattern) = PLACEHOLDER_PATTERNS.iter().find(|p| lower.contains(*p)) {
        return Err(insecure(format!(
            "appears to be a placeholder (contains '{pattern}')"
        )));
    }

    let entropy = shannon_entropy(value);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(insecure(format!(
            "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
        )));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const GOOD_SECRET: &str = "aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6";

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_shannon_entropy() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
        assert!((shannon_entropy("aaaaaaa") - 0.0).abs() < f64::EPSILON);
        assert!((shannon_entropy("ab") - 1.0).abs() < 0.01);
        assert!(shannon_entropy(GOOD_SECRET) > 3.3);
    }

    #[test]
    fn test_signing_secret_rules() {
        let check = |s: &str| validate_signing_secret(&SecretString::from(s), "TEST");
        assert!(check("short").is_err());
        assert!(check("changeme-changeme-changeme-changeme").is_err());
        assert!(check(&"a".repeat(40)).is_err());
        assert!(check(GOOD_SECRET).is_ok());
    }

    #[test]
    fn test_memory_storage_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("STOCKROOM_STORAGE", "memory"),
            ("STOCKROOM_JWT_SECRET", GOOD_SECRET),
        ]))
        .unwrap();

        assert!(matches!(config.storage, StorageConfig::Memory));
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
        assert!(config.cors_origins.is_empty());
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_postgres_requires_database_url() {
        let err = ServerConfig::from_lookup(lookup(&[("STOCKROOM_JWT_SECRET", GOOD_SECRET)]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref v) if v == "STOCKROOM_DATABASE_URL"));
    }

    #[test]
    fn test_database_url_fallback() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/stockroom"),
            ("STOCKROOM_JWT_SECRET", GOOD_SECRET),
        ]))
        .unwrap();

        match config.storage {
            StorageConfig::Postgres { database_url } => {
                assert_eq!(database_url.expose_secret(), "postgres://localhost/stockroom");
            }
            StorageConfig::Memory => panic!("expected postgres storage"),
        }
    }

    #[test]
    fn test_invalid_values() {
        let err = ServerConfig::from_lookup(lookup(&[
            ("STOCKROOM_STORAGE", "mongo"),
            ("STOCKROOM_JWT_SECRET", GOOD_SECRET),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(..)));

        let err = ServerConfig::from_lookup(lookup(&[
            ("STOCKROOM_STORAGE", "memory"),
            ("STOCKROOM_PORT", "eighty"),
            ("STOCKROOM_JWT_SECRET", GOOD_SECRET),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref v, _) if v == "STOCKROOM_PORT"));
    }

    #[test]
    fn test_cors_origins_parsed() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("STOCKROOM_STORAGE", "memory"),
            ("STOCKROOM_JWT_SECRET", GOOD_SECRET),
            (
                "STOCKROOM_CORS_ORIGINS",
                "http://localhost:3000, https://stock.example.org,",
            ),
        ]))
        .unwrap();
        assert_eq!(
            config.cors_origins,
            vec!["http://localhost:3000", "https://stock.example.org"]
        );
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("STOCKROOM_STORAGE", "memory"),
            ("STOCKROOM_JWT_SECRET", GOOD_SECRET),
        ]))
        .unwrap();
        let debug_output = format!("{config:?}");
        assert!(!debug_output.contains(GOOD_SECRET));
    }
}
