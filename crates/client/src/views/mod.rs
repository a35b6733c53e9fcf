//! Presentation logic for inventory screens.
//!
//! Everything here is pure: views take data already fetched by
//! [`crate::ApiClient`] and compute what a front-end shows.

pub mod dashboard;
pub mod form;
pub mod stock;
pub mod table;

pub use dashboard::{AnalyticsDashboard, DashboardRow};
pub use form::{AddProductForm, FormErrors, SignupForm};
pub use stock::StockStatus;
pub use table::ProductTable;
