//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                          - Banner
//! GET  /health                    - Liveness
//! GET  /health/ready              - Store reachability
//! GET  /api-docs                  - Swagger UI
//! GET  /api-docs/openapi.json     - `OpenAPI` document
//!
//! # Auth
//! POST /auth/signup               - Register, returns a token
//! POST /auth/login                - Login, returns a token
//!
//! # Products (bearer token)
//! GET  /products?page=&limit=     - Paged catalog
//! POST /products                  - Add a product
//! PUT  /products/{id}/quantity    - Replace the stock level
//!
//! # Analytics (bearer token)
//! GET  /analytics/most-added      - Top ten (name, sku) groups
//! ```

pub mod analytics;
pub mod auth;
pub mod docs;
pub mod health;
pub mod products;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Text served at `/`.
pub const BANNER: &str = "Inventory Management API";

/// All API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .route("/api-docs", get(docs::swagger_ui))
        .route(docs::OPENAPI_PATH, get(docs::openapi_json))
        .nest("/auth", auth_routes())
        .nest("/products", product_routes())
        .nest("/analytics", analytics_routes())
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::list).post(products::create))
        .route("/{id}/quantity", put(products::update_quantity))
}

/// Create the analytics routes router.
pub fn analytics_routes() -> Router<AppState> {
    Router::new().route("/most-added", get(analytics::most_added))
}

async fn root() -> &'static str {
    BANNER
}
