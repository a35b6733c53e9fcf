//! Stockroom Client - typed access to the inventory API.
//!
//! - [`ApiClient`] - one method per endpoint, bearer token handling
//! - [`Session`] - the persisted URL and token
//! - [`views`] - pure presentation logic (stock badges, paged table,
//!   form validation, analytics dashboard)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod error;
pub mod session;
pub mod views;

pub use api::ApiClient;
pub use error::{ClientError, NETWORK_ERROR_MESSAGE, SessionError};
pub use session::Session;
