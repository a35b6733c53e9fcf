//! Authentication error types.

use thiserror::Error;

use stockroom_core::{EmailError, UsernameError};

use super::token::TokenError;
use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username missing or malformed.
    #[error(transparent)]
    InvalidUsername(#[from] UsernameError),

    /// Email present but malformed.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Password missing or too short.
    #[error("{0}")]
    WeakPassword(String),

    /// Username already registered.
    #[error("username already exists")]
    UsernameTaken,

    /// Wrong password or unknown user. Deliberately indistinguishable.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Token could not be signed.
    #[error(transparent)]
    Token(#[from] TokenError),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
