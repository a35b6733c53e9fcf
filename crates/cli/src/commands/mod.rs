//! Command implementations.
//!
//! Operator commands (`migrate`, `seed`, `user`) talk to `PostgreSQL`
//! directly. Front-end commands (`login`, `signup`, `logout`, `products`,
//! `analytics`) go through the HTTP API with a persisted session.

pub mod analytics;
pub mod auth;
pub mod context;
pub mod migrate;
pub mod products;
pub mod seed;
pub mod user;

use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;

/// Errors shared by the commands that open a database connection.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Connect using `STOCKROOM_DATABASE_URL`, falling back to `DATABASE_URL`.
///
/// # Errors
///
/// Returns `DatabaseError` if neither variable is set or the connection fails.
pub async fn connect() -> Result<PgPool, DatabaseError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("STOCKROOM_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| DatabaseError::MissingEnvVar("STOCKROOM_DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    Ok(stockroom_server::db::create_pool(&database_url).await?)
}
