//! Paged product table with a local search box.

use stockroom_core::Product;
use stockroom_core::api::ProductPage;

/// One fetched page of products plus the search text typed over it.
///
/// The search only narrows the rows already on this page; it never
/// triggers a fetch.
#[derive(Debug, Clone)]
pub struct ProductTable {
    page: ProductPage,
    search: String,
}

impl ProductTable {
    #[must_use]
    pub const fn new(page: ProductPage) -> Self {
        Self {
            page,
            search: String::new(),
        }
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Rows on this page whose name, SKU or type contains the search text,
    /// ignoring case. An empty search shows every row.
    #[must_use]
    pub fn visible(&self) -> Vec<&Product> {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return self.page.products.iter().collect();
        }

        self.page
            .products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.sku.to_lowercase().contains(&needle)
                    || p.product_type.label().to_lowercase().contains(&needle)
            })
            .collect()
    }

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page.page
    }

    #[must_use]
    pub const fn total(&self) -> u64 {
        self.page.total
    }

    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        if self.page.limit == 0 {
            return 0;
        }
        self.page.total.div_ceil(self.page.limit as u64)
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page.page > 1
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        (self.page.page as u64) < self.total_pages()
    }

    /// 1-based inclusive range of rows this page covers, for a
    /// "Showing X to Y of Z" line. `None` on an empty or out-of-range page.
    #[must_use]
    pub fn showing_range(&self) -> Option<(u64, u64)> {
        let limit = u64::from(self.page.limit);
        let first = u64::from(self.page.page.saturating_sub(1)) * limit + 1;
        if self.page.total == 0 || first > self.page.total {
            return None;
        }
        let last = (u64::from(self.page.page) * limit).min(self.page.total);
        Some((first, last))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use stockroom_core::{Price, ProductId, ProductType, Quantity};

    use super::*;

    fn product(id: i32, name: &str, sku: &str, product_type: ProductType) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_owned(),
            product_type,
            sku: sku.to_owned(),
            image_url: None,
            description: None,
            quantity: Quantity::new(5).unwrap(),
            price: Price::new(Decimal::ONE).unwrap(),
        }
    }

    fn table(page: u32, limit: u32, total: u64) -> ProductTable {
        ProductTable::new(ProductPage {
            products: vec![
                product(1, "Laptop Dell XPS 13", "LAP-DELL-XPS13-001", ProductType::Electronics),
                product(2, "Office Chair Ergonomic", "CHA-OFF-ERG-001", ProductType::HomeAndGarden),
                product(3, "Running Shoes", "SHO-NIK-AIR-001", ProductType::Sports),
            ],
            total,
            page,
            limit,
        })
    }

    #[test]
    fn test_search_matches_name_sku_and_type() {
        let mut t = table(1, 10, 3);
        assert_eq!(t.visible().len(), 3);

        t.set_search("laptop");
        assert_eq!(t.visible().len(), 1);

        t.set_search("erg-0");
        assert_eq!(t.visible()[0].id, ProductId::new(2));

        t.set_search("GARDEN");
        assert_eq!(t.visible()[0].id, ProductId::new(2));

        t.set_search("kayak");
        assert!(t.visible().is_empty());
    }

    #[test]
    fn test_pagination_math() {
        let t = table(1, 10, 25);
        assert_eq!(t.total_pages(), 3);
        assert!(!t.has_previous());
        assert!(t.has_next());
        assert_eq!(t.showing_range(), Some((1, 10)));

        let t = table(3, 10, 25);
        assert!(t.has_previous());
        assert!(!t.has_next());
        assert_eq!(t.showing_range(), Some((21, 25)));

        let t = table(1, 10, 0);
        assert_eq!(t.total_pages(), 0);
        assert!(!t.has_next());
        assert_eq!(t.showing_range(), None);
    }
}
