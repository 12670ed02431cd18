//! Inventory store: item → quantity with JSON persistence.
//!
//! A single [`InventoryStore`] owns the mapping. Every operation reports what it
//! did through `tracing`; fallible ones also return an [`InventoryError`] that
//! names the condition, and never leave the mapping half-written.

pub mod audit;
pub mod error;
pub mod persist;
pub mod store;

pub use audit::AuditLog;
pub use error::{InventoryError, InventoryResult};
pub use persist::{DEFAULT_INVENTORY_PATH, LoadOutcome};
pub use store::{DEFAULT_LOW_STOCK_THRESHOLD, InventoryStore, StockLevel};

pub use stockpile_core::{DomainError, ItemName, Quantity};
