//! Shared plumbing for the commands that talk to the HTTP API.

use std::path::PathBuf;

use stockroom_client::views::FormErrors;
use stockroom_client::{ApiClient, ClientError, Session, SessionError};
use thiserror::Error;

/// Session file location relative to the home directory.
const SESSION_FILE: &str = ".stockroom/session.json";

/// Errors from the front-end commands.
#[derive(Debug, Error)]
pub enum FrontendError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Session(#[from] SessionError),

    /// Local form validation failed; messages were already printed.
    #[error("{0} field(s) failed validation")]
    Form(usize),

    /// Login/signup input that fails before any request is sent.
    #[error("{0}")]
    Input(String),
}

/// Where the API lives and where its session is kept.
#[derive(Debug, Clone)]
pub struct ClientContext {
    api_url: String,
    session_path: PathBuf,
}

impl ClientContext {
    #[must_use]
    pub fn new(api_url: String, session_path: Option<PathBuf>) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_owned(),
            session_path: session_path.unwrap_or_else(default_session_path),
        }
    }

    /// A logged-out client for the configured URL.
    #[must_use]
    pub fn anonymous(&self) -> ApiClient {
        ApiClient::new(self.api_url.clone())
    }

    /// A client carrying the stored token.
    ///
    /// A session saved against another URL is ignored.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotLoggedIn` when no usable session exists.
    pub fn authenticated(&self) -> Result<ApiClient, FrontendError> {
        let session = Session::load(&self.session_path)?
            .filter(|s| s.api_url == self.api_url && s.is_authenticated())
            .ok_or(ClientError::NotLoggedIn)?;
        Ok(ApiClient::from_session(&session))
    }

    /// Persist the client's URL and token.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the file cannot be written.
    pub fn remember(&self, client: &ApiClient) -> Result<(), FrontendError> {
        client.session().save(&self.session_path)?;
        Ok(())
    }

    /// Delete the stored session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the file cannot be removed.
    pub fn forget(&self) -> Result<(), FrontendError> {
        Session::clear(&self.session_path)?;
        Ok(())
    }

    /// Pass a result through, dropping the session when the server
    /// rejected the token.
    ///
    /// # Errors
    ///
    /// Returns the original error.
    pub fn check<T>(&self, result: Result<T, ClientError>) -> Result<T, FrontendError> {
        match result {
            Err(e) if e.is_auth_rejection() => {
                tracing::warn!("Session rejected; please log in again");
                self.forget()?;
                Err(e.into())
            }
            other => Ok(other?),
        }
    }
}

fn default_session_path() -> PathBuf {
    std::env::var_os("HOME")
        .map_or_else(|| PathBuf::from("."), PathBuf::from)
        .join(SESSION_FILE)
}

/// Print each failing field and turn the set into an error.
#[allow(clippy::print_stderr)]
pub fn report_form_errors(errors: &FormErrors) -> FrontendError {
    for (field, message) in errors.iter() {
        eprintln!("  {field}: {message}");
    }
    FrontendError::Form(errors.len())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn scratch() -> ClientContext {
        let path = std::env::temp_dir()
            .join(format!("stockroom-cli-{}", uuid::Uuid::new_v4()))
            .join("session.json");
        ClientContext::new("http://localhost:8080/".to_owned(), Some(path))
    }

    #[test]
    fn test_session_must_match_url() {
        let ctx = scratch();
        assert!(matches!(
            ctx.authenticated(),
            Err(FrontendError::Client(ClientError::NotLoggedIn))
        ));

        let mut client = ctx.anonymous();
        client.set_token(Some("abc".to_owned()));
        ctx.remember(&client).unwrap();
        assert_eq!(ctx.authenticated().unwrap().token(), Some("abc"));

        let elsewhere = ClientContext::new(
            "http://inventory.internal".to_owned(),
            Some(ctx.session_path.clone()),
        );
        assert!(elsewhere.authenticated().is_err());
    }

    #[test]
    fn test_auth_rejection_drops_session() {
        let ctx = scratch();
        let mut client = ctx.anonymous();
        client.set_token(Some("stale".to_owned()));
        ctx.remember(&client).unwrap();

        let rejected: Result<(), ClientError> = Err(ClientError::Api {
            status: 403,
            message: "Invalid or expired token.".to_owned(),
        });
        assert!(ctx.check(rejected).is_err());
        assert!(ctx.authenticated().is_err());

        ctx.remember(&client).unwrap();
        let other: Result<(), ClientError> = Err(ClientError::Api {
            status: 404,
            message: "Product not found".to_owned(),
        });
        assert!(ctx.check(other).is_err());
        assert!(ctx.authenticated().is_ok());
    }
}
