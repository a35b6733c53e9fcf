//! Sample data for local development.
//!
//! # Usage
//!
//! ```bash
//! stockroom seed            # add missing sample rows
//! stockroom seed --clear    # wipe users and products first
//! ```
//!
//! Creates two accounts (`admin` / `admin123` and `demo` / `demo123`) and
//! five products spread over three categories.

use rust_decimal::Decimal;
use stockroom_core::{ProductDraft, UserRole};
use stockroom_server::db::{PgProductStore, PgUserStore, ProductStore, RepositoryError, UserStore};
use stockroom_server::services::auth::{self, AuthError};
use stockroom_server::services::catalog::{CatalogError, CatalogService};
use thiserror::Error;

use super::DatabaseError;

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error(transparent)]
    Connect(#[from] DatabaseError),

    #[error("Failed to clear existing data: {0}")]
    Clear(#[from] RepositoryError),

    #[error("Failed to create user: {0}")]
    User(#[from] AuthError),

    #[error("Failed to create product: {0}")]
    Product(#[from] CatalogError),
}

struct SampleUser {
    username: &'static str,
    password: &'static str,
    email: &'static str,
    role: UserRole,
}

const USERS: [SampleUser; 2] = [
    SampleUser {
        username: "admin",
        password: "admin123",
        email: "admin@fimoney.com",
        role: UserRole::Admin,
    },
    SampleUser {
        username: "demo",
        password: "demo123",
        email: "demo@fimoney.com",
        role: UserRole::User,
    },
];

/// name, type, sku, image, description, quantity, price in cents
type SampleProduct = (&'static str, &'static str, &'static str, &'static str, &'static str, i64, i64);

const PRODUCTS: [SampleProduct; 5] = [
    (
        "Laptop Dell XPS 13",
        "Electronics",
        "LAP-DELL-XPS13-001",
        "laptop.jpg",
        "High-performance laptop with Intel i7 processor",
        15,
        129_999,
    ),
    (
        "Wireless Mouse Logitech MX Master",
        "Electronics",
        "MOU-LOG-MX-001",
        "mouse.jpg",
        "Premium wireless mouse with ergonomic design",
        25,
        7_999,
    ),
    (
        "Office Chair Ergonomic",
        "Home & Garden",
        "CHA-OFF-ERG-001",
        "chair.jpg",
        "Comfortable office chair with lumbar support",
        8,
        29_999,
    ),
    (
        "Coffee Maker Bialetti",
        "Home & Garden",
        "COF-BIA-001",
        "coffee-maker.jpg",
        "Italian stovetop coffee maker",
        12,
        4_599,
    ),
    (
        "Running Shoes Nike Air Max",
        "Sports",
        "SHO-NIK-AIR-001",
        "shoes.jpg",
        "Comfortable running shoes with air cushioning",
        20,
        12_999,
    ),
];

/// What a seeding run did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub users_created: usize,
    pub products_created: usize,
    pub skipped: usize,
}

/// Seed the configured database.
///
/// # Errors
///
/// Returns `SeedError` if the database is unreachable or a write fails.
pub async fn run(clear: bool) -> Result<(), SeedError> {
    let pool = super::connect().await?;
    let users = PgUserStore::new(pool.clone());
    let products = PgProductStore::new(pool);

    let report = seed(&users, &products, clear).await?;

    tracing::info!(
        users = report.users_created,
        products = report.products_created,
        skipped = report.skipped,
        "Seeding complete"
    );
    if report.users_created > 0 {
        tracing::info!("Default logins: admin / admin123, demo / demo123");
    }
    Ok(())
}

/// Insert the sample users and products into any store.
///
/// Rows that already exist are skipped.
///
/// # Errors
///
/// Returns `SeedError` for any failure other than a duplicate.
pub async fn seed(
    users: &dyn UserStore,
    products: &dyn ProductStore,
    clear: bool,
) -> Result<SeedReport, SeedError> {
    let mut report = SeedReport::default();

    if clear {
        let removed_products = products.clear().await?;
        let removed_users = users.clear().await?;
        tracing::info!(
            users = removed_users,
            products = removed_products,
            "Existing data cleared"
        );
    }

    for sample in &USERS {
        match auth::create_account(
            users,
            sample.username,
            sample.password,
            Some(sample.email),
            sample.role,
        )
        .await
        {
            Ok(user) => {
                tracing::info!(username = %user.username, role = %user.role, "Created user");
                report.users_created += 1;
            }
            Err(AuthError::UsernameTaken) => {
                tracing::warn!(username = sample.username, "User already exists, skipping");
                report.skipped += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    let catalog = CatalogService::new(products);
    for &(name, product_type, sku, image, description, quantity, cents) in &PRODUCTS {
        let draft = ProductDraft {
            name: Some(name.to_owned()),
            product_type: Some(product_type.to_owned()),
            sku: Some(sku.to_owned()),
            image_url: Some(format!("https://example.com/{image}")),
            description: Some(description.to_owned()),
            quantity: Some(quantity),
            price: Some(Decimal::new(cents, 2)),
        };

        match catalog.add(draft).await {
            Ok(_) => report.products_created += 1,
            Err(CatalogError::DuplicateSku) => {
                tracing::warn!(sku, "Product already exists, skipping");
                report.skipped += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(report)
}
