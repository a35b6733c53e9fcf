//! Unified error handling with Sentry integration.
//!
//! Every handler returns `Result<T, AppError>`. Failures are rendered as a
//! JSON body `{"message": "..."}`; server-side failures are logged, captured
//! to Sentry and reduced to a generic message.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use stockroom_core::api::ErrorBody;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::services::catalog::CatalogError;

pub const MSG_INTERNAL: &str = "Internal server error";
pub const MSG_MISSING_TOKEN: &str = "Access denied. No token provided.";
pub const MSG_INVALID_TOKEN: &str = "Invalid or expired token.";
pub const MSG_INVALID_CREDENTIALS: &str = "Invalid username or password";
pub const MSG_USERNAME_TAKEN: &str = "Username already exists";
pub const MSG_DUPLICATE_SKU: &str = "A product with this SKU already exists";
pub const MSG_PRODUCT_NOT_FOUND: &str = "Product not found";

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Store operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Catalog operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// No bearer token on a protected route.
    #[error("missing token")]
    MissingToken,

    /// Bearer token present but forged, malformed or expired.
    #[error("invalid token")]
    InvalidToken,

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    const fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::Database(_)
                | Self::Internal(_)
                | Self::Auth(
                    AuthError::Repository(_) | AuthError::Token(_) | AuthError::PasswordHash
                )
                | Self::Catalog(CatalogError::Repository(_))
        )
    }

    fn status_and_message(&self) -> (StatusCode, String) {
        if self.is_server_error() {
            return (StatusCode::INTERNAL_SERVER_ERROR, MSG_INTERNAL.to_owned());
        }

        match self {
            Self::Auth(AuthError::UsernameTaken) => {
                (StatusCode::BAD_REQUEST, MSG_USERNAME_TAKEN.to_owned())
            }
            Self::Auth(AuthError::InvalidCredentials) => {
                (StatusCode::BAD_REQUEST, MSG_INVALID_CREDENTIALS.to_owned())
            }
            Self::Auth(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            Self::Catalog(CatalogError::DuplicateSku) => {
                (StatusCode::BAD_REQUEST, MSG_DUPLICATE_SKU.to_owned())
            }
            Self::Catalog(CatalogError::NotFound) => {
                (StatusCode::NOT_FOUND, MSG_PRODUCT_NOT_FOUND.to_owned())
            }
            Self::Catalog(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            Self::MissingToken => (StatusCode::UNAUTHORIZED, MSG_MISSING_TOKEN.to_owned()),
            Self::InvalidToken => (StatusCode::FORBIDDEN, MSG_INVALID_TOKEN.to_owned()),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Database(_) | Self::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, MSG_INTERNAL.to_owned())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let (status, message) = self.status_and_message();
        (status, Json(ErrorBody { message })).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
