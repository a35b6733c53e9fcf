//! Stockroom Core - Shared types library.
//!
//! This crate provides common types used across all Stockroom components:
//! - `server` - The inventory REST API
//! - `client` - Typed API client and view models
//! - `cli` - Command-line tools for migrations, seeding and the terminal client
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP clients. This keeps it lightweight and allows it
//! to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, usernames, emails, prices, quantities and categories
//! - [`product`] - Catalog products and create-request validation
//! - [`analytics`] - The "most added" grouping
//! - [`api`] - Request/response bodies of the HTTP API
//!
//! # Features
//!
//! - `postgres` - `sqlx` encode/decode for the newtypes
//! - `openapi` - `utoipa::ToSchema` for the wire types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod analytics;
pub mod api;
pub mod product;
pub mod types;

pub use product::{NewProduct, Product, ProductDraft, ProductValidationError};
pub use types::*;
