//! Stock quantity type.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Errors that can occur when constructing a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityError {
    /// The value is below zero.
    #[error("quantity cannot be negative")]
    Negative,
    /// The value does not fit the storage range.
    #[error("quantity must be at most {max}")]
    TooLarge {
        /// Largest accepted quantity.
        max: i32,
    },
}

/// A non-negative count of units in stock.
///
/// Backed by `i32` to match the `INTEGER` column it is stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Quantity(i32);

impl Quantity {
    /// No units in stock.
    pub const ZERO: Self = Self(0);

    /// Create a quantity.
    ///
    /// # Errors
    ///
    /// Returns `QuantityError::Negative` for values below zero and
    /// `QuantityError::TooLarge` for values above `i32::MAX`.
    pub fn new(value: i64) -> Result<Self, QuantityError> {
        if value < 0 {
            return Err(QuantityError::Negative);
        }
        i32::try_from(value)
            .map(Self)
            .map_err(|_| QuantityError::TooLarge { max: i32::MAX })
    }

    /// The underlying count.
    #[must_use]
    pub const fn get(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for Quantity {
    type Error = QuantityError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<i32> for Quantity {
    type Error = QuantityError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(i64::from(value))
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = i64::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert_eq!(Quantity::new(0).unwrap(), Quantity::ZERO);
        assert_eq!(Quantity::new(25).unwrap().get(), 25);
        assert_eq!(Quantity::new(-1), Err(QuantityError::Negative));
        assert!(matches!(
            Quantity::new(i64::from(i32::MAX) + 1),
            Err(QuantityError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_deserialize_rejects_negative() {
        assert!(serde_json::from_str::<Quantity>("-5").is_err());
        assert_eq!(serde_json::from_str::<Quantity>("12").unwrap().get(), 12);
    }
}
