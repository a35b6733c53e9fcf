//! User management commands.
//!
//! # Usage
//!
//! ```bash
//! stockroom user create alice s3cret! --role admin --email alice@example.com
//! ```

use stockroom_core::UserRole;
use stockroom_server::db::PgUserStore;
use stockroom_server::services::auth::{self, AuthError};
use thiserror::Error;

use super::DatabaseError;

/// Errors that can occur during user operations.
#[derive(Debug, Error)]
pub enum UserCommandError {
    #[error(transparent)]
    Connect(#[from] DatabaseError),

    /// Invalid role.
    #[error("Invalid role: {0}. Must be one of: user, admin")]
    InvalidRole(String),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Create a user directly in the database.
///
/// # Errors
///
/// Returns `UserCommandError` for an unknown role, invalid input, a taken
/// username or a database failure.
pub async fn create(
    username: &str,
    password: &str,
    role: &str,
    email: Option<&str>,
) -> Result<(), UserCommandError> {
    let role: UserRole = role
        .parse()
        .map_err(|_| UserCommandError::InvalidRole(role.to_owned()))?;

    let store = PgUserStore::new(super::connect().await?);
    let user = auth::create_account(&store, username, password, email, role).await?;

    tracing::info!(
        user_id = %user.id,
        username = %user.username,
        role = %user.role,
        "User created"
    );
    Ok(())
}
