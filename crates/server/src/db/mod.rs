//! Storage for users and products.
//!
//! Handlers never talk to a database directly. They go through the
//! [`UserStore`] and [`ProductStore`] traits, which have two backends:
//!
//! - [`PgUserStore`] / [`PgProductStore`] - `PostgreSQL` via a shared pool
//! - [`MemoryStore`] - process-local tables behind a `tokio` `RwLock`
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p stockroom-cli -- migrate
//! ```

pub mod memory;
pub mod products;
pub mod users;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use stockroom_core::analytics::AnalyticsRecord;
use stockroom_core::api::Pagination;
use stockroom_core::{NewProduct, Product, ProductId, Quantity};

use crate::models::user::{NewUser, User};

pub use memory::MemoryStore;
pub use products::PgProductStore;
pub use users::PgUserStore;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database query failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in database is invalid or corrupted.
    #[error("data integrity error: {0}")]
    DataCorruption(String),

    /// A unique constraint was violated; carries the offending column.
    #[error("conflict: {0} already exists")]
    Conflict(&'static str),

    /// The backend is not reachable.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// User persistence.
///
/// Implementations must enforce username uniqueness at write time.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user, failing with [`RepositoryError::Conflict`] on a taken username.
    async fn create(&self, user: NewUser) -> Result<User, RepositoryError>;

    /// Exact-match lookup by username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;

    /// Delete every user, returning how many rows went away.
    async fn clear(&self) -> Result<u64, RepositoryError>;
}

/// Product persistence.
///
/// Implementations must enforce SKU uniqueness and replace quantities
/// atomically.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Insert a product, failing with [`RepositoryError::Conflict`] on a taken SKU.
    async fn create(&self, product: NewProduct) -> Result<Product, RepositoryError>;

    /// One page of products in ascending id order.
    async fn list(&self, page: Pagination) -> Result<Vec<Product>, RepositoryError>;

    /// Total number of products.
    async fn count(&self) -> Result<u64, RepositoryError>;

    /// Replace the quantity of one product. `None` when the id is unknown.
    async fn update_quantity(
        &self,
        id: ProductId,
        quantity: Quantity,
    ) -> Result<Option<Product>, RepositoryError>;

    /// Products grouped by `(name, sku)`, most frequent first.
    async fn most_added(&self, limit: usize) -> Result<Vec<AnalyticsRecord>, RepositoryError>;

    /// Delete every product, returning how many rows went away.
    async fn clear(&self) -> Result<u64, RepositoryError>;

    /// Readiness check.
    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

/// Map a unique-constraint violation to [`RepositoryError::Conflict`].
fn map_unique_violation(err: sqlx::Error, column: &'static str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = err
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(column);
    }
    RepositoryError::Database(err)
}
