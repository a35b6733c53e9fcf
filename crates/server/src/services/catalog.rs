//! Product catalog service.

use thiserror::Error;

use stockroom_core::api::{Pagination, ProductPage, QuantityUpdate};
use stockroom_core::{Product, ProductDraft, ProductId, ProductValidationError, Quantity, QuantityError};

use crate::db::{ProductStore, RepositoryError};

/// Errors raised by catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Create request failed validation.
    #[error(transparent)]
    Validation(#[from] ProductValidationError),

    /// Quantity update body carried no quantity.
    #[error("quantity is required")]
    MissingQuantity,

    /// Quantity update value out of range.
    #[error(transparent)]
    InvalidQuantity(#[from] QuantityError),

    /// Another product already uses this SKU.
    #[error("duplicate sku")]
    DuplicateSku,

    /// No product with the given id.
    #[error("product not found")]
    NotFound,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Create, page through and restock products.
pub struct CatalogService<'a> {
    products: &'a dyn ProductStore,
}

impl<'a> CatalogService<'a> {
    #[must_use]
    pub const fn new(products: &'a dyn ProductStore) -> Self {
        Self { products }
    }

    /// Validate and insert a product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Validation` for bad fields and
    /// `CatalogError::DuplicateSku` when the SKU is taken.
    pub async fn add(&self, draft: ProductDraft) -> Result<Product, CatalogError> {
        let product = draft.validate()?;

        let created = self.products.create(product).await.map_err(|e| match e {
            RepositoryError::Conflict(_) => CatalogError::DuplicateSku,
            other => CatalogError::Repository(other),
        })?;

        tracing::info!(product_id = %created.id, sku = %created.sku, "Product added");
        Ok(created)
    }

    /// One page of the catalog plus the overall total.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Repository` if the store query fails.
    pub async fn list(&self, page: Pagination) -> Result<ProductPage, CatalogError> {
        let products = self.products.list(page).await?;
        let total = self.products.count().await?;

        Ok(ProductPage {
            products,
            total,
            page: page.page(),
            limit: page.limit(),
        })
    }

    /// Replace the stock level of one product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::MissingQuantity` or `CatalogError::InvalidQuantity`
    /// for a bad body and `CatalogError::NotFound` for an unknown id.
    pub async fn update_quantity(
        &self,
        id: ProductId,
        update: &QuantityUpdate,
    ) -> Result<Product, CatalogError> {
        let quantity = Quantity::new(update.quantity.ok_or(CatalogError::MissingQuantity)?)?;

        let product = self
            .products
            .update_quantity(id, quantity)
            .await?
            .ok_or(CatalogError::NotFound)?;

        tracing::info!(product_id = %id, quantity = %quantity, "Quantity updated");
        Ok(product)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::db::MemoryStore;

    fn draft(sku: &str) -> ProductDraft {
        ProductDraft {
            name: Some("Desk Lamp".to_owned()),
            product_type: Some("Home & Garden".to_owned()),
            sku: Some(sku.to_owned()),
            quantity: Some(3),
            price: Some(Decimal::new(2_450, 2)),
            ..ProductDraft::default()
        }
    }

    #[tokio::test]
    async fn test_duplicate_sku() {
        let store = MemoryStore::new();
        let catalog = CatalogService::new(&store);

        catalog.add(draft("LAMP-1")).await.unwrap();
        assert!(matches!(
            catalog.add(draft("LAMP-1")).await,
            Err(CatalogError::DuplicateSku)
        ));
    }

    #[tokio::test]
    async fn test_list_is_idempotent() {
        let store = MemoryStore::new();
        let catalog = CatalogService::new(&store);
        for i in 0..4 {
            catalog.add(draft(&format!("LAMP-{i}"))).await.unwrap();
        }

        let page = Pagination::new(1, 3).unwrap();
        let first = catalog.list(page).await.unwrap();
        let second = catalog.list(page).await.unwrap();
        assert_eq!(first.total, 4);
        assert_eq!(first.products, second.products);
        assert_eq!(first.products.len(), 3);
    }

    #[tokio::test]
    async fn test_update_quantity_errors() {
        let store = MemoryStore::new();
        let catalog = CatalogService::new(&store);
        let product = catalog.add(draft("LAMP-9")).await.unwrap();

        let missing = catalog
            .update_quantity(product.id, &QuantityUpdate { quantity: None })
            .await;
        assert!(matches!(missing, Err(CatalogError::MissingQuantity)));

        let negative = catalog
            .update_quantity(product.id, &QuantityUpdate { quantity: Some(-4) })
            .await;
        assert!(matches!(
            negative,
            Err(CatalogError::InvalidQuantity(QuantityError::Negative))
        ));

        let unknown = catalog
            .update_quantity(ProductId::new(404), &QuantityUpdate { quantity: Some(1) })
            .await;
        assert!(matches!(unknown, Err(CatalogError::NotFound)));

        let updated = catalog
            .update_quantity(product.id, &QuantityUpdate { quantity: Some(42) })
            .await
            .unwrap();
        assert_eq!(updated.quantity.get(), 42);
        assert_eq!(updated.sku, "LAMP-9");
    }
}
