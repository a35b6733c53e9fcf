//! Core types for Stockroom.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod category;
pub mod email;
pub mod id;
pub mod price;
pub mod quantity;
pub mod role;
pub mod username;

pub use category::{ProductType, UnknownProductType};
pub use email::{Email, EmailError};
pub use id::*;
pub use price::{Price, PriceError};
pub use quantity::{Quantity, QuantityError};
pub use role::UserRole;
pub use username::{Username, UsernameError};
