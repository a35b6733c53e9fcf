//! HTTP middleware and extractors.

pub mod auth;
pub mod request_id;

pub use auth::{CurrentUser, RequireAuth};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
