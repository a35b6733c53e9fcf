//! Product categories.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a category name is not one of [`ProductType::ALL`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown product type: {0}")]
pub struct UnknownProductType(pub String);

/// The fixed set of product categories a catalog entry can belong to.
///
/// Serialized using the human-readable label (`"Home & Garden"`), which is
/// also what gets stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum ProductType {
    Electronics,
    Clothing,
    Books,
    #[serde(rename = "Home & Garden")]
    HomeAndGarden,
    Sports,
    Beauty,
    Toys,
    #[serde(rename = "Food & Beverages")]
    FoodAndBeverages,
    Automotive,
    Other,
}

impl ProductType {
    /// Every category, in display order.
    pub const ALL: [Self; 10] = [
        Self::Electronics,
        Self::Clothing,
        Self::Books,
        Self::HomeAndGarden,
        Self::Sports,
        Self::Beauty,
        Self::Toys,
        Self::FoodAndBeverages,
        Self::Automotive,
        Self::Other,
    ];

    /// Human-readable label, as stored and sent over the wire.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Electronics => "Electronics",
            Self::Clothing => "Clothing",
            Self::Books => "Books",
            Self::HomeAndGarden => "Home & Garden",
            Self::Sports => "Sports",
            Self::Beauty => "Beauty",
            Self::Toys => "Toys",
            Self::FoodAndBeverages => "Food & Beverages",
            Self::Automotive => "Automotive",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for ProductType {
    type Err = UnknownProductType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownProductType(s.to_owned()))
    }
}
