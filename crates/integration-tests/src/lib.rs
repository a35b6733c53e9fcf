//! Integration tests for Stockroom.
//!
//! # Running Tests
//!
//! ```bash
//! # In-memory server tests
//! cargo test -p stockroom-integration-tests
//!
//! # Including the PostgreSQL store tests
//! STOCKROOM_TEST_DATABASE_URL=postgres://localhost/stockroom_test \
//!     cargo test -p stockroom-integration-tests -- --include-ignored
//! ```
//!
//! # Test Categories
//!
//! - `api_flow` - the HTTP API driven through `stockroom_client::ApiClient`
//! - `http_contract` - status codes and bodies checked with raw `reqwest`
//! - `postgres_store` - the `PostgreSQL` stores against a real database

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;

use secrecy::SecretString;
use stockroom_server::services::auth::TokenIssuer;
use stockroom_server::{AppState, app};

/// Signing secret shared by every spawned test server.
pub const TEST_SECRET: &str = "k3Yz!9qP#vL2@wR7$tN5^bM8&cX4*dF6";

/// A server running on an ephemeral port with in-memory storage.
pub struct TestServer {
    pub addr: SocketAddr,
}

impl TestServer {
    /// Bind `127.0.0.1:0` and serve the full router in the background.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    #[allow(clippy::unwrap_used)]
    pub async fn spawn() -> Self {
        let state = AppState::in_memory(issuer());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app(state)).await.unwrap();
        });

        Self { addr }
    }

    #[must_use]
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

/// A token issuer using [`TEST_SECRET`].
#[must_use]
pub fn issuer() -> TokenIssuer {
    TokenIssuer::new(&SecretString::from(TEST_SECRET))
}

/// Database URL for the `PostgreSQL` tests, if configured.
#[must_use]
pub fn postgres_url() -> Option<SecretString> {
    std::env::var("STOCKROOM_TEST_DATABASE_URL")
        .ok()
        .map(SecretString::from)
}

/// A username unlikely to collide across runs.
#[must_use]
pub fn unique_name(prefix: &str) -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("{prefix}_{}", suffix.get(..8).unwrap_or(&suffix))
}
