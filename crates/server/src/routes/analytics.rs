//! Analytics endpoints.

use axum::{Json, extract::State};

use stockroom_core::api::{ErrorBody, MostAddedResponse};

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::services::analytics::AnalyticsService;
use crate::state::AppState;

/// `GET /analytics/most-added`
#[utoipa::path(
    get,
    path = "/analytics/most-added",
    tag = "analytics",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Top ten (name, sku) groups", body = MostAddedResponse),
        (status = 401, description = "Missing token", body = ErrorBody),
        (status = 403, description = "Invalid or expired token", body = ErrorBody),
    )
)]
pub async fn most_added(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> Result<Json<MostAddedResponse>> {
    let products = AnalyticsService::new(state.products()).most_added().await?;
    Ok(Json(MostAddedResponse { products }))
}
