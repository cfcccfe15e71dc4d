//! Inventory table rows and number formatting.
//!
//! These are framework-agnostic; the bot layer turns rows into embeds and the
//! report exporter turns them into PDF table cells.

use crate::core::{product::Product, stats::is_low_stock};
use std::fmt;

/// Shown when a table has no rows.
pub const EMPTY_TABLE_TITLE: &str = "No products found";
/// Hint shown under [`EMPTY_TABLE_TITLE`].
pub const EMPTY_TABLE_HINT: &str = "Add a new product to get started.";

/// Longest description shown in a table cell before it is cut off.
const DESCRIPTION_PREVIEW_CHARS: usize = 60;

/// Stock badge shown next to each product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    /// Quantity under the low-stock threshold
    LowStock,
    /// Anything else
    InStock,
}

impl StockStatus {
    /// Status for a given quantity.
    #[must_use]
    pub const fn for_quantity(quantity: u32) -> Self {
        if is_low_stock(quantity) {
            Self::LowStock
        } else {
            Self::InStock
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LowStock => f.write_str("⚠️ Low Stock"),
            Self::InStock => f.write_str("In Stock"),
        }
    }
}

/// One display row of the inventory table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryRow {
    /// Product id, kept for edit/delete actions
    pub id: String,
    /// Product name
    pub name: String,
    /// Shortened description
    pub description: String,
    /// Category badge
    pub category: String,
    /// Quantity as text
    pub quantity: String,
    /// Price with currency symbol
    pub price: String,
    /// Stock badge
    pub status: StockStatus,
}

impl InventoryRow {
    /// Builds a row for `product`, prefixing prices with `currency_symbol`.
    #[must_use]
    pub fn new(product: &Product, currency_symbol: &str) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            description: preview(&product.description, DESCRIPTION_PREVIEW_CHARS),
            category: product.category.clone(),
            quantity: product.quantity.to_string(),
            price: format!("{currency_symbol}{}", format_amount(product.price)),
            status: StockStatus::for_quantity(product.quantity),
        }
    }
}

/// Builds table rows for a list of products.
#[must_use]
pub fn inventory_rows<'a, I>(products: I, currency_symbol: &str) -> Vec<InventoryRow>
where
    I: IntoIterator<Item = &'a Product>,
{
    products
        .into_iter()
        .map(|p| InventoryRow::new(p, currency_symbol))
        .collect()
}

/// Formats an amount with two decimals and South Asian digit grouping
/// (`12,34,567.50`), the convention used for Taka amounts.
#[must_use]
pub fn format_amount(amount: f64) -> String {
    let formatted = format!("{:.2}", amount.abs());
    let (integer, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let grouped = if integer.len() <= 3 {
        integer.to_string()
    } else {
        let (head, last_three) = integer.split_at(integer.len() - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut rest = head;
        while rest.len() > 2 {
            let (left, pair) = rest.split_at(rest.len() - 2);
            groups.push(pair);
            rest = left;
        }
        if !rest.is_empty() {
            groups.push(rest);
        }
        groups.reverse();
        format!("{},{last_three}", groups.join(","))
    };

    let sign = if amount < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{fraction}")
}

/// Cuts `text` to at most `max_chars` characters, marking the cut with `…`.
#[must_use]
pub fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::product_with;

    #[test]
    fn test_format_amount_small_values() {
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(850.0), "850.00");
        assert_eq!(format_amount(4500.5), "4,500.50");
    }

    #[test]
    fn test_format_amount_lakh_grouping() {
        assert_eq!(format_amount(12_000.0), "12,000.00");
        assert_eq!(format_amount(123_456.0), "1,23,456.00");
        assert_eq!(format_amount(1_234_567.891), "12,34,567.89");
        assert_eq!(format_amount(98_765_432.1), "9,87,65,432.10");
    }

    #[test]
    fn test_format_amount_negative() {
        assert_eq!(format_amount(-1500.0), "-1,500.00");
        assert_eq!(format_amount(-0.001), "0.00");
    }

    #[test]
    fn test_row_status_and_price() {
        let chair = product_with("Office Chair", "Furniture", 3, 12000.0);
        let row = InventoryRow::new(&chair, "৳");
        assert_eq!(row.price, "৳12,000.00");
        assert_eq!(row.quantity, "3");
        assert_eq!(row.status, StockStatus::LowStock);

        let mouse = product_with("Mouse", "Electronics", 5, 850.0);
        assert_eq!(InventoryRow::new(&mouse, "৳").status, StockStatus::InStock);
    }

    #[test]
    fn test_preview_truncates_long_text() {
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("abcdefghij", 5), "abcd…");
        assert_eq!(preview("ééééé", 5), "ééééé");
    }

    #[test]
    fn test_inventory_rows_keep_order() {
        let products = vec![
            product_with("B", "X", 1, 1.0),
            product_with("A", "X", 1, 1.0),
        ];
        let rows = inventory_rows(&products, "$");
        assert_eq!(rows[0].name, "B");
        assert_eq!(rows[1].name, "A");
    }
}
