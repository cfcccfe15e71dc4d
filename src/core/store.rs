//! Product store - the single owner of the product collection.
//!
//! The collection is kept in memory and mirrored to one key of the
//! `storage_entries` table. Every mutation rewrites the whole mirror; there is
//! no diffing and no partial write.

use crate::{
    core::product::{self, Product, ProductInput, ProductPatch},
    entities::{StorageEntry, storage_entry},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{Set, prelude::*, sea_query::OnConflict};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Storage key holding the serialized product collection.
pub const INVENTORY_KEY: &str = "inventory_data";

/// Outcome of an interactive "are you sure?" prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// The user acknowledged the destructive action
    Confirmed,
    /// The user cancelled or the prompt expired
    Declined,
}

/// In-memory product collection with a durable mirror.
#[derive(Debug)]
pub struct ProductStore {
    db: DatabaseConnection,
    products: Vec<Product>,
}

impl ProductStore {
    /// Loads the persisted collection.
    ///
    /// An absent or empty collection is replaced by the sample catalog, which
    /// is persisted right away. A payload that cannot be parsed yields an
    /// empty collection; the mirror is left as-is until the next mutation.
    ///
    /// # Errors
    /// Returns an error if the database cannot be read or the seed cannot be written.
    pub async fn load(db: DatabaseConnection) -> Result<Self> {
        let stored = StorageEntry::find_by_id(INVENTORY_KEY.to_string())
            .one(&db)
            .await?;

        let (products, mirror_blank) = match stored {
            Some(entry) => match serde_json::from_str::<Vec<Product>>(&entry.value) {
                Ok(products) => {
                    let blank = products.is_empty();
                    (products, blank)
                }
                Err(e) => {
                    warn!("Persisted inventory is not valid JSON, starting empty: {e}");
                    (Vec::new(), false)
                }
            },
            None => (Vec::new(), true),
        };

        let mut store = Self { db, products };
        if mirror_blank {
            info!("Inventory is empty, installing sample products");
            store.products = product::seed_products(Utc::now());
            store.persist().await?;
        }

        info!("Loaded {} products", store.products.len());
        Ok(store)
    }

    /// Rewrites the durable mirror with the full current collection.
    async fn persist(&self) -> Result<()> {
        let payload = serde_json::to_string(&self.products)?;
        let entry = storage_entry::ActiveModel {
            key: Set(INVENTORY_KEY.to_string()),
            value: Set(payload),
            updated_at: Set(Utc::now().naive_utc()),
        };

        StorageEntry::insert(entry)
            .on_conflict(
                OnConflict::column(storage_entry::Column::Key)
                    .update_columns([
                        storage_entry::Column::Value,
                        storage_entry::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        debug!("Persisted {} products", self.products.len());
        Ok(())
    }

    /// All products in insertion order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Looks a product up by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Looks a product up by name, ignoring case. The first match wins.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Product> {
        let wanted = name.trim().to_lowercase();
        self.products
            .iter()
            .find(|p| p.name.to_lowercase() == wanted)
    }

    /// Product names in insertion order.
    #[must_use]
    pub fn product_names(&self) -> Vec<String> {
        self.products.iter().map(|p| p.name.clone()).collect()
    }

    /// Distinct categories, sorted.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        self.products
            .iter()
            .map(|p| p.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Adds a new product with a fresh id and timestamp.
    ///
    /// # Errors
    /// Returns an error if the input is invalid or the mirror cannot be written.
    pub async fn add(&mut self, input: ProductInput) -> Result<Product> {
        let product = input.into_product(product::new_product_id(), Utc::now())?;
        self.products.push(product.clone());
        self.persist().await?;
        info!("Added product '{}' ({})", product.name, product.id);
        Ok(product)
    }

    /// Merges `patch` over the product with `id`.
    ///
    /// # Errors
    /// Returns `Error::ProductNotFound` for an unknown id, a validation error for
    /// a bad patch, or a database error.
    pub async fn update(&mut self, id: &str, patch: ProductPatch) -> Result<Product> {
        patch.validate()?;
        let product = self
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::ProductNotFound {
                name: id.to_string(),
            })?;

        patch.apply(product, Utc::now());
        let updated = product.clone();
        self.persist().await?;
        info!("Updated product '{}' ({})", updated.name, updated.id);
        Ok(updated)
    }

    /// Removes the product with `id` once the user has confirmed.
    ///
    /// A declined confirmation is a silent no-op and returns `Ok(None)`.
    ///
    /// # Errors
    /// Returns `Error::ProductNotFound` for an unknown id or a database error.
    pub async fn remove(&mut self, id: &str, confirmation: Confirmation) -> Result<Option<Product>> {
        let index = self
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| Error::ProductNotFound {
                name: id.to_string(),
            })?;

        if confirmation == Confirmation::Declined {
            debug!("Delete of {id} declined");
            return Ok(None);
        }

        let removed = self.products.remove(index);
        self.persist().await?;
        info!("Removed product '{}' ({})", removed.name, removed.id);
        Ok(Some(removed))
    }

    /// Replaces the whole collection, as done by a restore.
    ///
    /// Every element needs a non-empty name, a valid price and an id no
    /// other element uses; otherwise nothing changes.
    ///
    /// # Errors
    /// Returns `Error::Validation` naming the first bad element, or a database error.
    pub async fn replace_all(&mut self, collection: Vec<Product>) -> Result<()> {
        let mut seen_ids = BTreeSet::new();
        for (index, item) in collection.iter().enumerate() {
            if !seen_ids.insert(item.id.as_str()) {
                return Err(Error::Validation {
                    message: format!("Product at position {index} repeats id {}", item.id),
                });
            }
            if item.name.trim().is_empty() {
                return Err(Error::Validation {
                    message: format!("Product at position {index} has no name"),
                });
            }
            if product::validate_price(item.price).is_err() {
                return Err(Error::Validation {
                    message: format!("Product at position {index} has an invalid price"),
                });
            }
        }

        self.products = collection;
        self.persist().await?;
        info!("Replaced inventory with {} products", self.products.len());
        Ok(())
    }
}
