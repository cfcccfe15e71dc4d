//! Storage entry entity - Key-value rows backing the durable inventory mirror.
//!
//! The whole product collection lives under a single key as serialized JSON
//! and is rewritten wholesale after every change.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Storage entry database model - one serialized payload per key
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "storage_entries")]
pub struct Model {
    /// Storage key (e.g., `"inventory_data"`)
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    /// Serialized payload
    #[sea_orm(column_type = "Text")]
    pub value: String,
    /// When this key was last written
    pub updated_at: DateTime,
}

/// `StorageEntry` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
