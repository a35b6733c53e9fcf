//! In-memory store for demos and tests.
//!
//! Each table sits behind its own `RwLock`; every write holds the lock for
//! the whole check-and-insert so uniqueness holds under concurrent requests.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use stockroom_core::analytics::{AnalyticsRecord, tally};
use stockroom_core::api::Pagination;
use stockroom_core::{NewProduct, Product, ProductId, Quantity, UserId};

use super::{ProductStore, RepositoryError, UserStore};
use crate::models::user::{NewUser, User};

/// Rows plus the next id to hand out. Ids are never reused.
#[derive(Debug)]
struct Table<T> {
    next_id: i32,
    rows: Vec<T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: Vec::new(),
        }
    }
}

impl<T> Table<T> {
    fn allocate_id(&mut self) -> Result<i32, RepositoryError> {
        let id = self.next_id;
        self.next_id = id
            .checked_add(1)
            .ok_or_else(|| RepositoryError::Unavailable("id space exhausted".to_owned()))?;
        Ok(id)
    }

    fn clear(&mut self) -> u64 {
        let removed = self.rows.len() as u64;
        self.rows.clear();
        removed
    }
}

/// Process-local implementation of [`UserStore`] and [`ProductStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<Table<User>>,
    products: RwLock<Table<Product>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, user: NewUser) -> Result<User, RepositoryError> {
        let mut table = self.users.write().await;

        if table.rows.iter().any(|u| u.username == user.username) {
            return Err(RepositoryError::Conflict("username"));
        }

        let id = UserId::new(table.allocate_id()?);
        let user = user.into_user(id, Utc::now());
        table.rows.push(user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let table = self.users.read().await;
        Ok(table
            .rows
            .iter()
            .find(|u| u.username.as_str() == username)
            .cloned())
    }

    async fn clear(&self) -> Result<u64, RepositoryError> {
        Ok(self.users.write().await.clear())
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn create(&self, product: NewProduct) -> Result<Product, RepositoryError> {
        let mut table = self.products.write().await;

        if table.rows.iter().any(|p| p.sku == product.sku) {
            return Err(RepositoryError::Conflict("sku"));
        }

        let id = ProductId::new(table.allocate_id()?);
        let product = product.into_product(id);
        table.rows.push(product.clone());
        Ok(product)
    }

    async fn list(&self, page: Pagination) -> Result<Vec<Product>, RepositoryError> {
        let table = self.products.read().await;
        let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);

        // Rows are appended with increasing ids, so insertion order is id order.
        Ok(table
            .rows
            .iter()
            .skip(skip)
            .take(page.limit() as usize)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(self.products.read().await.rows.len() as u64)
    }

    async fn update_quantity(
        &self,
        id: ProductId,
        quantity: Quantity,
    ) -> Result<Option<Product>, RepositoryError> {
        let mut table = self.products.write().await;
        Ok(table.rows.iter_mut().find(|p| p.id == id).map(|product| {
            product.quantity = quantity;
            product.clone()
        }))
    }

    async fn most_added(&self, limit: usize) -> Result<Vec<AnalyticsRecord>, RepositoryError> {
        let table = self.products.read().await;
        Ok(tally(
            table.rows.iter().map(|p| (p.name.as_str(), p.sku.as_str())),
            limit,
        ))
    }

    async fn clear(&self) -> Result<u64, RepositoryError> {
        Ok(self.products.write().await.clear())
    }
}
