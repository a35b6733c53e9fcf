//! Business logic services.
//!
//! Services sit between route handlers and the stores. They own validation
//! and error translation; handlers only deal with HTTP.

pub mod analytics;
pub mod auth;
pub mod catalog;
