//! Stock level classification.

use core::fmt;

use stockroom_core::Quantity;

/// Below this many units a product counts as low stock.
pub const LOW_STOCK_THRESHOLD: i32 = 10;

/// How healthy a product's stock level is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StockStatus {
    OutOfStock,
    LowStock,
    InStock,
}

impl StockStatus {
    /// Zero is out of stock, `1..10` is low, anything above is in stock.
    #[must_use]
    pub const fn classify(quantity: Quantity) -> Self {
        match quantity.get() {
            0 => Self::OutOfStock,
            q if q < LOW_STOCK_THRESHOLD => Self::LowStock,
            _ => Self::InStock,
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::OutOfStock => "Out of Stock",
            Self::LowStock => "Low Stock",
            Self::InStock => "In Stock",
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
