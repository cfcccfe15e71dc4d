//! Discord command implementations organized by screen.

#![allow(clippy::too_long_first_doc_paragraph)]

/// AI assistant chat
pub mod assistant;

/// Overview screen
pub mod dashboard;

/// Backup and restore commands
pub mod data;

/// General utility commands
pub mod general;

/// Product management commands
pub mod inventory;

// Export commands
pub use assistant::*;
pub use dashboard::*;
pub use data::*;
pub use general::*;
pub use inventory::*;
