//! Product catalog endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use stockroom_core::ProductDraft;
use stockroom_core::ProductId;
use stockroom_core::api::{
    DEFAULT_LIMIT, DEFAULT_PAGE, ErrorBody, Pagination, ProductCreated, ProductPage,
    QuantityUpdate, QuantityUpdated,
};

use crate::error::{AppError, MSG_PRODUCT_NOT_FOUND, Result};
use crate::extract::ApiJson;
use crate::middleware::RequireAuth;
use crate::services::catalog::CatalogService;
use crate::state::AppState;

/// Raw `?page=&limit=` parameters.
///
/// Kept as strings so that anything other than a positive integer falls
/// back to the default instead of failing the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    page: Option<String>,
    limit: Option<String>,
}

impl ListParams {
    fn pagination(&self) -> Result<Pagination> {
        let page = parse_or(self.page.as_deref(), DEFAULT_PAGE);
        let limit = parse_or(self.limit.as_deref(), DEFAULT_LIMIT);
        Pagination::new(page, limit).map_err(|e| AppError::BadRequest(e.to_string()))
    }
}

fn parse_or(raw: Option<&str>, default: u32) -> u32 {
    raw.and_then(|s| s.trim().parse().ok())
        .filter(|n| *n > 0)
        .unwrap_or(default)
}

/// `GET /products`
#[utoipa::path(
    get,
    path = "/products",
    tag = "products",
    security(("bearer_auth" = [])),
    params(
        ("page" = Option<u32>, Query, description = "1-based page, default 1"),
        ("limit" = Option<u32>, Query, description = "Page size, default 10"),
    ),
    responses(
        (status = 200, description = "One page of products", body = ProductPage),
        (status = 401, description = "Missing token", body = ErrorBody),
        (status = 403, description = "Invalid or expired token", body = ErrorBody),
    )
)]
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(params): Query<ListParams>,
) -> Result<Json<ProductPage>> {
    let page = CatalogService::new(state.products())
        .list(params.pagination()?)
        .await?;
    Ok(Json(page))
}

/// `POST /products`
#[utoipa::path(
    post,
    path = "/products",
    tag = "products",
    security(("bearer_auth" = [])),
    request_body = ProductDraft,
    responses(
        (status = 201, description = "Product added", body = ProductCreated),
        (status = 400, description = "Invalid product or duplicate SKU", body = ErrorBody),
        (status = 401, description = "Missing token", body = ErrorBody),
        (status = 403, description = "Invalid or expired token", body = ErrorBody),
    )
)]
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(draft): ApiJson<ProductDraft>,
) -> Result<(StatusCode, Json<ProductCreated>)> {
    let product = CatalogService::new(state.products()).add(draft).await?;
    tracing::debug!(username = %user.username, product_id = %product.id, "Created by user");

    Ok((
        StatusCode::CREATED,
        Json(ProductCreated {
            id: product.id,
            message: "Product added successfully".to_owned(),
        }),
    ))
}

/// `PUT /products/{id}/quantity`
#[utoipa::path(
    put,
    path = "/products/{id}/quantity",
    tag = "products",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Product id")),
    request_body = QuantityUpdate,
    responses(
        (status = 200, description = "Quantity replaced", body = QuantityUpdated),
        (status = 400, description = "Missing or invalid quantity", body = ErrorBody),
        (status = 401, description = "Missing token", body = ErrorBody),
        (status = 403, description = "Invalid or expired token", body = ErrorBody),
        (status = 404, description = "Product not found", body = ErrorBody),
    )
)]
pub async fn update_quantity(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<String>,
    ApiJson(update): ApiJson<QuantityUpdate>,
) -> Result<Json<QuantityUpdated>> {
    // An id that cannot name a product is simply not found.
    let id: ProductId = id
        .parse()
        .map_err(|_| AppError::NotFound(MSG_PRODUCT_NOT_FOUND.to_owned()))?;

    let product = CatalogService::new(state.products())
        .update_quantity(id, &update)
        .await?;

    Ok(Json(QuantityUpdated {
        message: "Quantity updated".to_owned(),
        product,
    }))
}
