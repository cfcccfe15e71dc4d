//! Shared test utilities for `SmartInventory`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test products with sensible defaults.

use crate::{
    config::settings::{AssistantSettings, InventorySettings},
    core::{
        assistant::AssistantClient,
        controller::ViewController,
        product::{self, Product, ProductInput},
        store::{INVENTORY_KEY, ProductStore},
    },
    entities::{StorageEntry, storage_entry},
    errors::Result,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use tracing_subscriber::EnvFilter;

/// Routes `tracing` output through the test harness so it only shows for
/// failing tests. Safe to call more than once.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    init_test_tracing();
    let db = crate::config::database::create_connection("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Writes `payload` verbatim under the inventory key, bypassing the store.
/// Use this to simulate whatever a previous session left behind.
pub async fn write_raw_payload(db: &DatabaseConnection, payload: &str) -> Result<()> {
    StorageEntry::delete_by_id(INVENTORY_KEY.to_string())
        .exec(db)
        .await?;
    storage_entry::ActiveModel {
        key: Set(INVENTORY_KEY.to_string()),
        value: Set(payload.to_string()),
        updated_at: Set(Utc::now().naive_utc()),
    }
    .insert(db)
    .await?;
    Ok(())
}

/// Sets up a store whose collection has been emptied after the seed was installed.
/// Returns (db, store) so tests can inspect the mirror.
pub async fn setup_empty_store() -> Result<(DatabaseConnection, ProductStore)> {
    let db = setup_test_db().await?;
    let mut store = ProductStore::load(db.clone()).await?;
    store.replace_all(Vec::new()).await?;
    Ok((db, store))
}

/// Form input for a product with the given name, price and quantity.
///
/// # Defaults
/// * `category`: None (falls back to "General")
/// * `description`: None
pub fn test_input(name: &str, price: f64, quantity: u32) -> ProductInput {
    ProductInput {
        name: name.to_string(),
        category: None,
        quantity,
        price,
        description: None,
    }
}

/// A product that never touched a store.
///
/// # Defaults
/// * `id`: fresh random id
/// * `description`: "Test description"
/// * `last_updated`: now
pub fn product_with(name: &str, category: &str, quantity: u32, price: f64) -> Product {
    Product {
        id: product::new_product_id(),
        name: name.to_string(),
        category: category.to_string(),
        quantity,
        price,
        description: "Test description".to_string(),
        last_updated: Utc::now(),
    }
}

/// An assistant client without an API key. It never makes network calls.
pub fn offline_assistant() -> Result<AssistantClient> {
    AssistantClient::new(
        &AssistantSettings::default(),
        &InventorySettings::default(),
        None,
    )
}

/// Sets up a controller over a freshly seeded in-memory store with an
/// offline assistant.
pub async fn setup_controller() -> Result<ViewController> {
    let db = setup_test_db().await?;
    let store = ProductStore::load(db).await?;
    Ok(ViewController::new(
        store,
        offline_assistant()?,
        &InventorySettings::default(),
    ))
}
