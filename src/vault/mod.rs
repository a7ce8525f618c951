//! Vault module: encrypted password entries.
//!
//! This module provides:
//! - `StoredEntry`, `VaultEntry`, and friends (`entry`)
//! - The JSON store file format (`format`)
//! - High-level `VaultStore` for adding, reading, and removing entries (`store`)

pub mod entry;
pub mod format;
pub mod store;

// Re-export the most commonly used items.
pub use entry::{open_all, EntryDraft, EntryMetadata, EntryView, StoredEntry, VaultEntry};
pub use store::VaultStore;
