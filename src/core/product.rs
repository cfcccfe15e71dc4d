//! Product model and validation.
//!
//! A [`Product`] is one catalog line. Its JSON shape (camelCase keys,
//! RFC 3339 `lastUpdated`) is the one written to the durable mirror and to
//! backup files.

use crate::errors::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category assigned when a product is created without one.
pub const DEFAULT_CATEGORY: &str = "General";

/// A single inventory product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Opaque identifier, immutable for the product's lifetime
    pub id: String,
    /// Display name, never empty
    pub name: String,
    /// Free-text category
    pub category: String,
    /// Units in stock
    pub quantity: u32,
    /// Unit price in the display currency
    pub price: f64,
    /// Free-text description, may be empty
    pub description: String,
    /// Set at creation and on every edit
    pub last_updated: DateTime<Utc>,
}

impl Product {
    /// Stock value of this line (`quantity × price`).
    #[must_use]
    pub fn stock_value(&self) -> f64 {
        f64::from(self.quantity) * self.price
    }
}

/// Fields collected by the "add product" flow.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductInput {
    /// Product name
    pub name: String,
    /// Category; blank means [`DEFAULT_CATEGORY`]
    pub category: Option<String>,
    /// Units in stock
    pub quantity: u32,
    /// Unit price
    pub price: f64,
    /// Description; blank means empty
    pub description: Option<String>,
}

impl ProductInput {
    /// Validates the input and builds a product with the given id and timestamp.
    ///
    /// # Errors
    /// Returns an error if the name is blank or the price is not a finite,
    /// non-negative number.
    pub fn into_product(self, id: String, now: DateTime<Utc>) -> Result<Product> {
        let name = validate_name(&self.name)?;
        validate_price(self.price)?;

        let category = self
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

        Ok(Product {
            id,
            name,
            category,
            quantity: self.quantity,
            price: self.price,
            description: self.description.unwrap_or_default(),
            last_updated: now,
        })
    }
}

/// Partial update merged over an existing product. `None` keeps the old value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    /// New name
    pub name: Option<String>,
    /// New category
    pub category: Option<String>,
    /// New quantity
    pub quantity: Option<u32>,
    /// New unit price
    pub price: Option<f64>,
    /// New description
    pub description: Option<String>,
}

impl ProductPatch {
    /// Returns true when the patch would change nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.quantity.is_none()
            && self.price.is_none()
            && self.description.is_none()
    }

    /// Checks every present field without applying anything.
    ///
    /// # Errors
    /// Returns an error for a blank name or an invalid price.
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        Ok(())
    }

    /// Merges the patch over `product` and refreshes its timestamp.
    /// The id is never touched. Call [`Self::validate`] first.
    pub fn apply(self, product: &mut Product, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            product.name = name.trim().to_string();
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(quantity) = self.quantity {
            product.quantity = quantity;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        product.last_updated = now;
    }
}

/// Trims a product name and rejects blank ones.
///
/// # Errors
/// Returns `Error::Validation` if the name is empty or whitespace-only.
pub fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation {
            message: "Product name cannot be empty".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

/// Rejects negative, NaN and infinite prices.
///
/// # Errors
/// Returns `Error::InvalidAmount` for any such value.
pub fn validate_price(price: f64) -> Result<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(Error::InvalidAmount { amount: price });
    }
    Ok(())
}

/// Generates a fresh product id.
#[must_use]
pub fn new_product_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// The sample catalog installed when the durable mirror is empty.
#[must_use]
pub fn seed_products(now: DateTime<Utc>) -> Vec<Product> {
    let seed = |id: &str, name: &str, category: &str, quantity: u32, price: f64, description: &str| {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            quantity,
            price,
            description: description.to_string(),
            last_updated: now,
        }
    };

    vec![
        seed("1", "Wireless Mouse", "Electronics", 45, 850.0, "Ergonomic wireless mouse"),
        seed("2", "Mechanical Keyboard", "Electronics", 12, 4500.0, "RGB mechanical keyboard"),
        seed("3", "Office Chair", "Furniture", 3, 12000.0, "Mesh ergonomic chair"),
    ]
}
