//! Signup and login.

use axum::{Json, extract::State, http::StatusCode};

use stockroom_core::api::{ErrorBody, LoginRequest, SignupRequest, TokenResponse};

use crate::error::Result;
use crate::extract::ApiJson;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// `POST /auth/signup`
#[utoipa::path(
    post,
    path = "/auth/signup",
    tag = "auth",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = TokenResponse),
        (status = 400, description = "Invalid input or username taken", body = ErrorBody),
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SignupRequest>,
) -> Result<(StatusCode, Json<TokenResponse>)> {
    let token = AuthService::new(state.users(), state.tokens())
        .register(&request)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(TokenResponse {
            message: Some("User created successfully".to_owned()),
            token,
        }),
    ))
}

/// `POST /auth/login`
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = TokenResponse),
        (status = 400, description = "Invalid username or password", body = ErrorBody),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<TokenResponse>> {
    let token = AuthService::new(state.users(), state.tokens())
        .authenticate(&request)
        .await?;

    Ok(Json(TokenResponse {
        message: None,
        token,
    }))
}
