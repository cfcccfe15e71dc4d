//! Core inventory logic, independent of the Discord layer.

/// Remote assistant client (product suggestions and inventory analysis)
pub mod assistant;
/// JSON backup and restore
pub mod backup;
/// Assistant chat messages and request lifecycle
pub mod chat;
/// Session state and user actions
pub mod controller;
/// Product record, form input and validation
pub mod product;
/// PDF inventory report
pub mod report;
/// Text search over products
pub mod search;
/// Dashboard statistics
pub mod stats;
/// Product collection with a durable mirror
pub mod store;
/// Table rows and amount formatting
pub mod table;
