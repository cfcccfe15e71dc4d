//! Entity module - `SeaORM` entity definitions for the database.
//! The inventory only needs a key-value table; the product collection is
//! stored as one serialized value.

pub mod storage_entry;

pub use storage_entry::{
    Column as StorageEntryColumn, Entity as StorageEntry, Model as StorageEntryModel,
};
