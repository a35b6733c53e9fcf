//! Catalog analytics.

use stockroom_core::analytics::{AnalyticsRecord, MOST_ADDED_LIMIT};

use crate::db::{ProductStore, RepositoryError};

/// Read-only reports over the product catalog.
pub struct AnalyticsService<'a> {
    products: &'a dyn ProductStore,
}

impl<'a> AnalyticsService<'a> {
    #[must_use]
    pub const fn new(products: &'a dyn ProductStore) -> Self {
        Self { products }
    }

    /// The ten most frequent `(name, sku)` pairs, highest count first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store query fails.
    pub async fn most_added(&self) -> Result<Vec<AnalyticsRecord>, RepositoryError> {
        self.products.most_added(MOST_ADDED_LIMIT).await
    }
}
