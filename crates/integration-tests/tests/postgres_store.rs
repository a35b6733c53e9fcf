//! `PostgreSQL` store tests.
//!
//! These tests require a reachable database in `STOCKROOM_TEST_DATABASE_URL`.
//! Migrations are applied on connect; rows use unique names so runs do not
//! collide.
//!
//! Run with: cargo test -p stockroom-integration-tests -- --ignored

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use rust_decimal::Decimal;
use sqlx::PgPool;
use stockroom_core::api::Pagination;
use stockroom_core::{ProductDraft, Quantity, UserRole};
use stockroom_integration_tests::{postgres_url, unique_name};
use stockroom_server::db::{
    self, PgProductStore, PgUserStore, ProductStore, RepositoryError, UserStore,
};
use stockroom_server::services::auth::{self, AuthError};

async fn pool() -> PgPool {
    let url = postgres_url().expect("STOCKROOM_TEST_DATABASE_URL must be set");
    let pool = db::create_pool(&url).await.unwrap();
    sqlx::migrate!("../server/migrations").run(&pool).await.unwrap();
    pool
}

fn draft(sku: &str) -> ProductDraft {
    ProductDraft {
        name: Some(format!("Pg Widget {sku}")),
        product_type: Some("Other".to_owned()),
        sku: Some(sku.to_owned()),
        image_url: None,
        description: Some("created by postgres_store tests".to_owned()),
        quantity: Some(7),
        price: Some(Decimal::new(1_050, 2)),
    }
}

#[tokio::test]
#[ignore = "Requires PostgreSQL"]
async fn test_user_roundtrip_and_uniqueness() {
    let store = PgUserStore::new(pool().await);
    let username = unique_name("pg_user");

    let user = auth::create_account(
        &store,
        &username,
        "secret1",
        Some("pg@example.com"),
        UserRole::Admin,
    )
    .await
    .unwrap();
    assert_eq!(user.role, UserRole::Admin);

    let found = store.find_by_username(&username).await.unwrap().unwrap();
    assert_eq!(found.id, user.id);
    assert_eq!(
        found.email.as_ref().map(ToString::to_string).as_deref(),
        Some("pg@example.com")
    );

    let again = auth::create_account(&store, &username, "secret2", None, UserRole::User).await;
    assert!(matches!(again, Err(AuthError::UsernameTaken)));
}

#[tokio::test]
#[ignore = "Requires PostgreSQL"]
async fn test_product_create_update_and_conflict() {
    let store = PgProductStore::new(pool().await);
    let sku = unique_name("PG");

    let product = store.create(draft(&sku).validate().unwrap()).await.unwrap();
    assert_eq!(product.price.amount(), Decimal::new(1_050, 2));
    assert_eq!(product.quantity.get(), 7);

    let conflict = store.create(draft(&sku).validate().unwrap()).await;
    assert!(matches!(conflict, Err(RepositoryError::Conflict(_))));

    let updated = store
        .update_quantity(product.id, Quantity::new(0).unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.quantity, Quantity::ZERO);
    assert_eq!(updated.sku, sku);

    let total = store.count().await.unwrap();
    assert!(total >= 1);

    let page = store.list(Pagination::new(1, 100).unwrap()).await.unwrap();
    assert!(page.windows(2).all(|w| w[0].id < w[1].id));

    let report = store.most_added(10).await.unwrap();
    assert!(report.len() <= 10);
    assert!(report.windows(2).all(|w| w[0].count >= w[1].count));
}
