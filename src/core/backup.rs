//! JSON backup and restore of the whole product collection.
//!
//! Backups are a pretty-printed array of products in the same shape as the
//! durable mirror. Restores accept any file but go through a typed
//! intermediate record so that shape problems are rejected before the store
//! is touched.

use crate::{
    core::{
        product::{self, DEFAULT_CATEGORY, Product},
        report::ExportedFile,
        store::ProductStore,
    },
    errors::{RestoreError, Result},
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use std::collections::HashSet;
use tracing::{info, warn};

/// Message shown after a successful restore.
pub const RESTORE_SUCCESS_MESSAGE: &str = "Inventory database restored successfully!";

/// Serializes the full collection as pretty-printed JSON.
///
/// # Errors
/// Returns a serialization error, which cannot happen for well-formed products.
pub fn backup_json(products: &[Product]) -> Result<String> {
    Ok(serde_json::to_string_pretty(products)?)
}

/// `smart_inventory_backup_<YYYY-MM-DD>.json`
#[must_use]
pub fn backup_filename(date: NaiveDate) -> String {
    format!("smart_inventory_backup_{}.json", date.format("%Y-%m-%d"))
}

/// Builds the downloadable backup file.
///
/// # Errors
/// Returns a serialization error.
pub fn export_backup(products: &[Product], now: DateTime<Utc>) -> Result<ExportedFile> {
    Ok(ExportedFile {
        filename: backup_filename(now.date_naive()),
        bytes: backup_json(products)?.into_bytes(),
    })
}

/// One element of a backup file as it may appear on disk. Only `name` and
/// `price` are required; everything else gets a default.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BackupRecord {
    id: Option<String>,
    name: Option<String>,
    category: Option<String>,
    quantity: Option<u32>,
    price: Option<f64>,
    description: Option<String>,
    last_updated: Option<DateTime<Utc>>,
}

impl BackupRecord {
    fn into_product(self, index: usize, now: DateTime<Utc>) -> std::result::Result<Product, RestoreError> {
        let invalid = |reason: &str| RestoreError::InvalidRecord {
            index,
            reason: reason.to_string(),
        };

        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| invalid("missing name"))?;
        let price = self.price.ok_or_else(|| invalid("missing price"))?;
        product::validate_price(price).map_err(|_| invalid("price must be a non-negative number"))?;

        Ok(Product {
            id: self.id.unwrap_or_else(product::new_product_id),
            name,
            category: self.category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            quantity: self.quantity.unwrap_or(0),
            price,
            description: self.description.unwrap_or_default(),
            last_updated: self.last_updated.unwrap_or(now),
        })
    }
}

/// Parses and validates backup file contents.
///
/// # Errors
/// * [`RestoreError::Unreadable`] - not UTF-8 or not JSON
/// * [`RestoreError::NotASequence`] - top level is not an array
/// * [`RestoreError::InvalidRecord`] - an element lacks a usable name or
///   price, or repeats an earlier element's id
pub fn parse_backup(contents: &[u8]) -> std::result::Result<Vec<Product>, RestoreError> {
    let text = std::str::from_utf8(contents).map_err(|e| RestoreError::Unreadable {
        detail: e.to_string(),
    })?;
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| RestoreError::Unreadable {
            detail: e.to_string(),
        })?;

    let serde_json::Value::Array(items) = value else {
        return Err(RestoreError::NotASequence);
    };

    let now = Utc::now();
    let mut seen_ids = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let record: BackupRecord =
                serde_json::from_value(item).map_err(|e| RestoreError::InvalidRecord {
                    index,
                    reason: e.to_string(),
                })?;
            let product = record.into_product(index, now)?;
            if !seen_ids.insert(product.id.clone()) {
                return Err(RestoreError::InvalidRecord {
                    index,
                    reason: format!("duplicate id {}", product.id),
                });
            }
            Ok(product)
        })
        .collect()
}

/// Replaces the store's collection with the products in `contents`.
///
/// On any failure the store keeps its previous collection.
///
/// # Errors
/// Returns `Error::Restore` for a rejected file or a database error.
pub async fn restore(store: &mut ProductStore, contents: &[u8]) -> Result<usize> {
    let products = parse_backup(contents).inspect_err(|e| {
        warn!("Rejected backup file: {e:?}");
    })?;
    let count = products.len();
    store.replace_all(products).await?;
    info!("Restored {count} products from backup");
    Ok(count)
}
