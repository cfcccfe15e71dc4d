//! Database configuration module for `SmartInventory`.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema always matches the Rust structs.

use crate::entities::StorageEntry;
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use std::path::Path;

/// Default database location used when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/smart_inventory.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable or returns
/// the default local `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the given database URL, creating the
/// directory of a file-backed `SQLite` database first.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    ensure_database_dir(database_url)?;
    Database::connect(database_url).await.map_err(Into::into)
}

/// `SQLite` creates the file with `mode=rwc` but not its directory.
fn ensure_database_dir(database_url: &str) -> Result<()> {
    let Some(location) = database_url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let file = location.split('?').next().unwrap_or(location);
    if let Some(parent) = Path::new(file).parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Creates the storage table if it does not exist yet.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut storage_table = schema.create_table_from_entity(StorageEntry);
    storage_table.if_not_exists();

    db.execute(builder.build(&storage_table)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::storage_entry::Model as StorageEntryModel;
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = create_connection("sqlite::memory:").await?;
        create_tables(&db).await?;

        let rows: Vec<StorageEntryModel> = StorageEntry::find().limit(1).all(&db).await?;
        assert!(rows.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_file_database_directory_is_created() -> Result<()> {
        let dir = std::env::temp_dir().join(format!("smart-inventory-{}", uuid::Uuid::new_v4()));
        let url = format!("sqlite://{}/inventory.sqlite?mode=rwc", dir.display());

        let db = create_connection(&url).await?;
        create_tables(&db).await?;
        assert!(dir.join("inventory.sqlite").exists());

        drop(db);
        std::fs::remove_dir_all(&dir)?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = create_connection("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }
}
