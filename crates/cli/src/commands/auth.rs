//! `login`, `signup` and `logout`.

use stockroom_client::views::SignupForm;
use stockroom_core::api::LoginRequest;

use super::context::{ClientContext, FrontendError, report_form_errors};

/// Log in and store the session.
///
/// # Errors
///
/// Returns `FrontendError` for blank input, rejected credentials or an
/// unreachable server.
pub async fn login(ctx: &ClientContext, username: &str, password: &str) -> Result<(), FrontendError> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(FrontendError::Input(
            "Please enter both username and password".to_owned(),
        ));
    }

    let mut client = ctx.anonymous();
    client
        .login(&LoginRequest {
            username: username.trim().to_owned(),
            password: password.to_owned(),
        })
        .await?;
    ctx.remember(&client)?;

    tracing::info!(username = %username.trim(), "Logged in");
    Ok(())
}

/// Register, then store the session the server hands back.
///
/// # Errors
///
/// Returns `FrontendError::Form` when local checks fail, otherwise any
/// server or transport failure.
pub async fn signup(
    ctx: &ClientContext,
    username: String,
    password: String,
    email: Option<String>,
) -> Result<(), FrontendError> {
    let form = SignupForm {
        username,
        email: email.unwrap_or_default(),
        confirm_password: password.clone(),
        password,
    };
    let request = form.validate().map_err(|e| report_form_errors(&e))?;

    let mut client = ctx.anonymous();
    client.signup(&request).await?;
    ctx.remember(&client)?;

    tracing::info!(username = %request.username, "Account created");
    Ok(())
}

/// Forget the stored session.
///
/// # Errors
///
/// Returns `FrontendError::Session` if the file cannot be removed.
pub fn logout(ctx: &ClientContext) -> Result<(), FrontendError> {
    ctx.forget()?;
    tracing::info!("Logged out");
    Ok(())
}
