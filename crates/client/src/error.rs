//! Client error types.

use thiserror::Error;

/// Shown when the server could not be reached at all.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";

/// Errors returned by [`crate::ApiClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a non-success status.
    ///
    /// `message` is the server's own `message` field when it sent one.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The request never produced a response.
    #[error("Network error. Please try again.")]
    Network(#[source] reqwest::Error),

    /// The response body did not match the expected shape.
    #[error("unexpected response from server: {0}")]
    Parse(String),

    /// A protected call was made without a token.
    #[error("not logged in")]
    NotLoggedIn,
}

impl ClientError {
    /// Whether the server rejected the session token (401 or 403).
    ///
    /// Callers should drop the stored session when this is true.
    #[must_use]
    pub const fn is_auth_rejection(&self) -> bool {
        matches!(self, Self::Api { status: 401 | 403, .. } | Self::NotLoggedIn)
    }
}

/// Errors reading or writing a persisted [`crate::Session`].
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("session file is corrupt: {0}")]
    Format(#[from] serde_json::Error),
}
