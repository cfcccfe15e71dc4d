//! Case-insensitive product search over name and category.

use crate::core::product::Product;

/// Returns the products whose name or category contains `query`, ignoring
/// case, in their original order. An empty query matches everything.
#[must_use]
pub fn filter_products<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let needle = query.to_lowercase();
    products
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle) || p.category.to_lowercase().contains(&needle)
        })
        .collect()
}
