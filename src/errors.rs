//! Unified error types for `SmartInventory`.
//!
//! Every fallible operation in the crate returns [`Result`]. Remote assistant
//! failures never show up here: the assistant client converts them into
//! placeholder values before they reach a caller.

use thiserror::Error;

/// Reasons an uploaded backup is rejected. The store is never touched when
/// one of these is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RestoreError {
    /// The file is not valid UTF-8 JSON.
    #[error("Error reading file.")]
    Unreadable {
        /// Parser message, kept for logs
        detail: String,
    },

    /// The top-level value is not an array.
    #[error("Invalid file format.")]
    NotASequence,

    /// An element lacks a usable `name` or `price`.
    #[error("Invalid file structure.")]
    InvalidRecord {
        /// Zero-based position of the offending element
        index: usize,
        /// What was wrong with it
        reason: String,
    },
}

/// Application error type
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description
        message: String,
    },

    /// Database failure from `SeaORM`
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Input rejected before it reached the store
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable description
        message: String,
    },

    /// No product with this id or name exists
    #[error("Product not found: {name}")]
    ProductNotFound {
        /// Id or name that was looked up
        name: String,
    },

    /// Price that is negative, NaN or infinite
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected value
        amount: f64,
    },

    /// Backup file rejected
    #[error(transparent)]
    Restore(#[from] RestoreError),

    /// A request of the same kind is still outstanding
    #[error("A {operation} request is already in progress")]
    RequestPending {
        /// Which operation is busy (`"chat"`, `"autofill"`)
        operation: &'static str,
    },

    /// A form operation was attempted while no form is open
    #[error("No product form is open")]
    NoOpenForm,

    /// A result arrived for a form that has since been closed or replaced
    #[error("The product form was closed or replaced before the suggestion arrived")]
    StaleForm,

    /// PDF rendering failed
    #[error("Report error: {message}")]
    Report {
        /// Renderer message
        message: String,
    },

    /// JSON encoding failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed environment variable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Serenity/Poise framework error
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
