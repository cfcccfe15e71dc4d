//! Inventory statistics shown on the dashboard.
//!
//! Stats are derived from the live product list on every request and never stored.

use crate::core::product::Product;
use std::collections::HashSet;

/// Products with fewer units than this are low on stock.
pub const LOW_STOCK_THRESHOLD: u32 = 5;

/// Returns true when `quantity` is below [`LOW_STOCK_THRESHOLD`].
#[must_use]
pub const fn is_low_stock(quantity: u32) -> bool {
    quantity < LOW_STOCK_THRESHOLD
}

/// Aggregate metrics over the whole inventory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryStats {
    /// Sum of all quantities
    pub total_products: u64,
    /// Sum of quantity × price
    pub total_value: f64,
    /// Number of products that are low on stock
    pub low_stock_items: usize,
    /// Number of distinct category strings
    pub categories: usize,
}

impl InventoryStats {
    /// Computes the stats for `products`. An empty slice yields all zeros.
    #[must_use]
    pub fn from_products(products: &[Product]) -> Self {
        Self {
            total_products: products.iter().map(|p| u64::from(p.quantity)).sum(),
            total_value: products.iter().map(Product::stock_value).sum(),
            low_stock_items: products.iter().filter(|p| is_low_stock(p.quantity)).count(),
            categories: products
                .iter()
                .map(|p| p.category.as_str())
                .collect::<HashSet<_>>()
                .len(),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::product_with;

    #[test]
    fn test_empty_inventory_is_all_zero() {
        assert_eq!(InventoryStats::from_products(&[]), InventoryStats::default());
    }

    #[test]
    fn test_sums_and_counts() {
        let products = vec![
            product_with("Mouse", "Electronics", 45, 850.0),
            product_with("Keyboard", "Electronics", 12, 4500.0),
            product_with("Chair", "Furniture", 3, 12000.0),
        ];

        let stats = InventoryStats::from_products(&products);
        assert_eq!(stats.total_products, 60);
        assert_eq!(stats.total_value, 45.0 * 850.0 + 12.0 * 4500.0 + 3.0 * 12000.0);
        assert_eq!(stats.low_stock_items, 1);
        assert_eq!(stats.categories, 2);
    }

    #[test]
    fn test_low_stock_boundary() {
        assert!(is_low_stock(0));
        assert!(is_low_stock(4));
        assert!(!is_low_stock(5));

        let products = vec![
            product_with("Four", "A", 4, 1.0),
            product_with("Five", "A", 5, 1.0),
        ];
        assert_eq!(InventoryStats::from_products(&products).low_stock_items, 1);
    }

    #[test]
    fn test_categories_are_case_sensitive_strings() {
        let products = vec![
            product_with("A", "Tools", 1, 1.0),
            product_with("B", "tools", 1, 1.0),
            product_with("C", "Tools", 1, 1.0),
        ];
        assert_eq!(InventoryStats::from_products(&products).categories, 2);
    }

    #[test]
    fn test_adding_widget_changes_stats() {
        let mut products = vec![product_with("Mouse", "Electronics", 45, 850.0)];
        let before = InventoryStats::from_products(&products);

        products.push(product_with("Widget", "General", 3, 100.0));
        let after = InventoryStats::from_products(&products);

        assert!(is_low_stock(3));
        assert_eq!(after.total_value - before.total_value, 300.0);
        assert_eq!(after.total_products - before.total_products, 3);
        assert_eq!(after.low_stock_items, before.low_stock_items + 1);
    }
}
