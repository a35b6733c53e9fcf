//! `OpenAPI` document and Swagger UI.

use axum::{Json, response::Html};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use stockroom_core::api::{
    ErrorBody, LoginRequest, MostAddedResponse, ProductCreated, ProductPage, QuantityUpdate,
    QuantityUpdated, SignupRequest, TokenResponse,
};
use stockroom_core::analytics::{AnalyticsRecord, GroupKey};
use stockroom_core::{Product, ProductDraft, ProductType};

use super::{analytics, auth, products};

/// Where the generated document is served.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Name of the bearer token scheme referenced by protected operations.
pub const BEARER_SCHEME: &str = "bearer_auth";

#[derive(OpenApi)]
#[openapi(
    info(title = "Inventory Management API"),
    paths(
        auth::signup,
        auth::login,
        products::list,
        products::create,
        products::update_quantity,
        analytics::most_added,
    ),
    components(schemas(
        SignupRequest,
        LoginRequest,
        TokenResponse,
        ProductDraft,
        ProductCreated,
        Product,
        ProductType,
        ProductPage,
        QuantityUpdate,
        QuantityUpdated,
        GroupKey,
        AnalyticsRecord,
        MostAddedResponse,
        ErrorBody,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "auth", description = "Accounts and session tokens"),
        (name = "products", description = "Catalog"),
        (name = "analytics", description = "Catalog reports"),
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// `GET /api-docs/openapi.json`
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// `GET /api-docs`
///
/// Swagger UI page rendering [`OPENAPI_PATH`]. Assets load from a CDN.
pub async fn swagger_ui() -> Html<&'static str> {
    Html(SWAGGER_UI_PAGE)
}

const SWAGGER_UI_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>Inventory Management API</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js" crossorigin></script>
  <script>
    window.onload = () => {
      window.ui = SwaggerUIBundle({ url: "/api-docs/openapi.json", dom_id: "#swagger-ui" });
    };
  </script>
</body>
</html>
"##;
