//! Vault module — encrypted record storage.
//!
//! This module provides:
//! - `VaultRecord` and `RecordMetadata` types (`record`)
//! - High-level `RecordStore` for storing, retrieving, and deleting
//!   encrypted records (`store`)

pub mod record;
pub mod store;

// Re-export the most commonly used items.
pub use record::{RecordMetadata, VaultRecord};
pub use store::RecordStore;
