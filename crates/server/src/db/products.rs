//! `PostgreSQL` product store.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;

use stockroom_core::analytics::AnalyticsRecord;
use stockroom_core::api::Pagination;
use stockroom_core::{NewProduct, Price, Product, ProductId, ProductType, Quantity};

use super::{ProductStore, RepositoryError, map_unique_violation};

const PRODUCT_COLUMNS: &str =
    "id, name, product_type, sku, image_url, description, quantity, price";

// =============================================================================
// Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i32,
    name: String,
    product_type: String,
    sku: String,
    image_url: Option<String>,
    description: Option<String>,
    quantity: i32,
    price: Decimal,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let product_type = row.product_type.parse::<ProductType>().map_err(|e| {
            RepositoryError::DataCorruption(format!("product {}: {e}", row.id))
        })?;
        let quantity = Quantity::try_from(row.quantity).map_err(|e| {
            RepositoryError::DataCorruption(format!("product {} quantity: {e}", row.id))
        })?;
        let price = Price::new(row.price).map_err(|e| {
            RepositoryError::DataCorruption(format!("product {} price: {e}", row.id))
        })?;

        Ok(Self {
            id: ProductId::new(row.id),
            name: row.name,
            product_type,
            sku: row.sku,
            image_url: row.image_url,
            description: row.description,
            quantity,
            price,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AnalyticsRow {
    name: String,
    sku: String,
    count: i64,
}

// =============================================================================
// Store
// =============================================================================

/// Product store backed by the `products` table.
#[derive(Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    /// Create a new product store.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn create(&self, product: NewProduct) -> Result<Product, RepositoryError> {
        let sql = format!(
            "INSERT INTO products (name, product_type, sku, image_url, description, quantity, price)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {PRODUCT_COLUMNS}"
        );

        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(&product.name)
            .bind(product.product_type.label())
            .bind(&product.sku)
            .bind(product.image_url.as_deref())
            .bind(product.description.as_deref())
            .bind(product.quantity.get())
            .bind(product.price.amount())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, "sku"))?;

        row.try_into()
    }

    async fn list(&self, page: Pagination) -> Result<Vec<Product>, RepositoryError> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id ASC LIMIT $1 OFFSET $2"
        );
        // Past i64::MAX rows every page is empty.
        let Ok(offset) = i64::try_from(page.offset()) else {
            return Ok(Vec::new());
        };

        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(i64::from(page.limit()))
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        u64::try_from(count)
            .map_err(|_| RepositoryError::DataCorruption(format!("negative row count {count}")))
    }

    async fn update_quantity(
        &self,
        id: ProductId,
        quantity: Quantity,
    ) -> Result<Option<Product>, RepositoryError> {
        let sql = format!(
            "UPDATE products SET quantity = $2 WHERE id = $1 RETURNING {PRODUCT_COLUMNS}"
        );

        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id)
            .bind(quantity.get())
            .fetch_optional(&self.pool)
            .await?;

        row.map(Product::try_from).transpose()
    }

    async fn most_added(&self, limit: usize) -> Result<Vec<AnalyticsRecord>, RepositoryError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let rows = sqlx::query_as::<_, AnalyticsRow>(
            r"
            SELECT name, sku, COUNT(*) AS count
            FROM products
            GROUP BY name, sku
            ORDER BY count DESC, MIN(id) ASC
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| AnalyticsRecord::new(row.name, row.sku, row.count))
            .collect())
    }

    async fn clear(&self) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM products")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
