//! End-to-end flows through the typed client against a live server.
//!
//! Each test spawns its own server with in-memory storage, so they need
//! no external services.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use rust_decimal::Decimal;
use stockroom_client::views::{AddProductForm, AnalyticsDashboard, ProductTable, StockStatus};
use stockroom_client::{ApiClient, ClientError};
use stockroom_core::api::{LoginRequest, SignupRequest};
use stockroom_core::{ProductDraft, ProductId, ProductType};
use stockroom_integration_tests::TestServer;

fn signup_request(username: &str) -> SignupRequest {
    SignupRequest {
        username: username.to_owned(),
        password: "inventory1".to_owned(),
        email: Some(format!("{username}@example.com")),
    }
}

fn product(name: &str, product_type: &str, sku: &str, quantity: i64, cents: i64) -> ProductDraft {
    ProductDraft {
        name: Some(name.to_owned()),
        product_type: Some(product_type.to_owned()),
        sku: Some(sku.to_owned()),
        image_url: None,
        description: None,
        quantity: Some(quantity),
        price: Some(Decimal::new(cents, 2)),
    }
}

async fn logged_in(server: &TestServer, username: &str) -> ApiClient {
    let mut client = ApiClient::new(server.url());
    client.signup(&signup_request(username)).await.unwrap();
    client
}

#[tokio::test]
async fn test_signup_login_and_catalog_flow() {
    let server = TestServer::spawn().await;

    let mut client = ApiClient::new(server.url());
    let signup = client.signup(&signup_request("stocker")).await.unwrap();
    assert_eq!(signup.message.as_deref(), Some("User created successfully"));

    // Fresh login on a separate client yields a working token too.
    let mut other = ApiClient::new(server.url());
    other
        .login(&LoginRequest {
            username: "stocker".to_owned(),
            password: "inventory1".to_owned(),
        })
        .await
        .unwrap();
    assert!(other.token().is_some());

    let created = client
        .create_product(&product("Desk Lamp", "Home & Garden", "LMP-001", 4, 2_450))
        .await
        .unwrap();
    assert_eq!(created.message, "Product added successfully");

    let updated = other.update_quantity(created.id, 40).await.unwrap();
    assert_eq!(updated.message, "Quantity updated");
    assert_eq!(updated.product.quantity.get(), 40);
    assert_eq!(updated.product.product_type, ProductType::HomeAndGarden);

    let page = client.list_products(1, 10).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.products[0].id, created.id);
    assert_eq!(page.products[0].price.amount(), Decimal::new(2_450, 2));
    assert_eq!(StockStatus::classify(page.products[0].quantity), StockStatus::InStock);
}

#[tokio::test]
async fn test_pagination_walks_the_catalog() {
    let server = TestServer::spawn().await;
    let client = logged_in(&server, "pager").await;

    for i in 0..12 {
        client
            .create_product(&product(
                &format!("Widget {i:02}"),
                "Other",
                &format!("WID-{i:03}"),
                i,
                999,
            ))
            .await
            .unwrap();
    }

    let first = ProductTable::new(client.list_products(1, 5).await.unwrap());
    assert_eq!(first.total(), 12);
    assert_eq!(first.total_pages(), 3);
    assert!(first.has_next());
    assert!(!first.has_previous());
    assert_eq!(first.showing_range(), Some((1, 5)));

    let last = ProductTable::new(client.list_products(3, 5).await.unwrap());
    assert_eq!(last.visible().len(), 2);
    assert_eq!(last.showing_range(), Some((11, 12)));
    assert!(!last.has_next());

    let beyond = client.list_products(9, 5).await.unwrap();
    assert!(beyond.products.is_empty());
    assert_eq!(beyond.total, 12);

    let mut searched = ProductTable::new(client.list_products(1, 5).await.unwrap());
    searched.set_search("widget 03");
    assert_eq!(searched.visible().len(), 1);
}

#[tokio::test]
async fn test_analytics_groups_by_name_and_sku() {
    let server = TestServer::spawn().await;
    let client = logged_in(&server, "analyst").await;

    client
        .create_product(&product("Mouse", "Electronics", "MOU-1", 3, 1_999))
        .await
        .unwrap();
    client
        .create_product(&product("Chair", "Home & Garden", "CHA-1", 1, 9_900))
        .await
        .unwrap();

    let report = client.most_added().await.unwrap();
    assert_eq!(report.len(), 2);
    assert!(report.iter().all(|r| r.count == 1));
    // Ties keep insertion order.
    assert_eq!(report[0].key.sku, "MOU-1");
    assert_eq!(report[1].key.name, "Chair");

    let dashboard = AnalyticsDashboard::new(report);
    assert_eq!(dashboard.total(), 2);
    let rows = dashboard.rows();
    assert!((rows[0].percent_of_total - 50.0).abs() < f64::EPSILON);
    assert!((rows[1].bar_ratio - 1.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_form_output_is_accepted_by_server() {
    let server = TestServer::spawn().await;
    let client = logged_in(&server, "clerk").await;

    let form = AddProductForm {
        name: "Running Shoes Nike Air Max".to_owned(),
        product_type: "sports".to_owned(),
        sku: "SHO-NIK-AIR-001".to_owned(),
        image_url: "https://example.com/shoes.jpg".to_owned(),
        description: String::new(),
        quantity: "20".to_owned(),
        price: "129.99".to_owned(),
    };
    let created = client.create_product(&form.validate().unwrap()).await.unwrap();

    let page = client.list_products(1, 10).await.unwrap();
    let shoes = &page.products[0];
    assert_eq!(shoes.id, created.id);
    assert_eq!(shoes.product_type, ProductType::Sports);
    assert_eq!(shoes.image_url.as_deref(), Some("https://example.com/shoes.jpg"));
    assert_eq!(shoes.description, None);
}

#[tokio::test]
async fn test_server_errors_reach_the_client() {
    let server = TestServer::spawn().await;
    let client = logged_in(&server, "rejects").await;

    client
        .create_product(&product("Keyboard", "Electronics", "KEY-1", 5, 4_900))
        .await
        .unwrap();

    match client
        .create_product(&product("Keyboard v2", "Electronics", "KEY-1", 5, 4_900))
        .await
        .unwrap_err()
    {
        ClientError::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "A product with this SKU already exists");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let err = client.update_quantity(ProductId::new(404), 1).await.unwrap_err();
    assert_eq!(err.to_string(), "Product not found");
    assert!(!err.is_auth_rejection());

    let err = client.update_quantity(ProductId::new(1), -1).await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 400, .. }));

    let mut duplicate = ApiClient::new(server.url());
    let err = duplicate.signup(&signup_request("rejects")).await.unwrap_err();
    assert_eq!(err.to_string(), "Username already exists");
    assert!(duplicate.token().is_none());
}

#[tokio::test]
async fn test_forged_token_is_an_auth_rejection() {
    let server = TestServer::spawn().await;

    let mut client = ApiClient::new(server.url());
    client.set_token(Some("not.a.jwt".to_owned()));

    let err = client.list_products(1, 10).await.unwrap_err();
    assert!(err.is_auth_rejection());
    assert_eq!(err.to_string(), "Invalid or expired token.");
}
