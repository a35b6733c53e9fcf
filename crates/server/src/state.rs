//! Application state shared across handlers.

use std::sync::Arc;

use crate::db::{MemoryStore, PgProductStore, PgUserStore, ProductStore, UserStore};
use crate::services::auth::TokenIssuer;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; handlers reach the stores and the token
/// issuer through it.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    users: Arc<dyn UserStore>,
    products: Arc<dyn ProductStore>,
    tokens: TokenIssuer,
}

impl AppState {
    /// Create state from arbitrary store implementations.
    #[must_use]
    pub fn new(
        users: Arc<dyn UserStore>,
        products: Arc<dyn ProductStore>,
        tokens: TokenIssuer,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                users,
                products,
                tokens,
            }),
        }
    }

    /// State backed by `PostgreSQL`.
    #[must_use]
    pub fn postgres(pool: sqlx::PgPool, tokens: TokenIssuer) -> Self {
        Self::new(
            Arc::new(PgUserStore::new(pool.clone())),
            Arc::new(PgProductStore::new(pool)),
            tokens,
        )
    }

    /// State backed by a fresh in-memory store.
    #[must_use]
    pub fn in_memory(tokens: TokenIssuer) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::new(store.clone(), store, tokens)
    }

    /// User store.
    #[must_use]
    pub fn users(&self) -> &dyn UserStore {
        self.inner.users.as_ref()
    }

    /// Product store.
    #[must_use]
    pub fn products(&self) -> &dyn ProductStore {
        self.inner.products.as_ref()
    }

    /// Session token issuer.
    #[must_use]
    pub fn tokens(&self) -> &TokenIssuer {
        &self.inner.tokens
    }
}
