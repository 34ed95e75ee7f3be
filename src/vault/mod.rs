//! Vault module: encrypted credential storage.
//!
//! This module provides:
//! - `Entry` and `EntryChanges` types (`entry`)
//! - The `salt || nonce || ciphertext` file format and atomic writes (`format`)
//! - High-level `VaultStore` for whole-vault operations (`store`)

pub mod entry;
pub mod format;
pub mod store;

// Re-export the most commonly used items.
pub use entry::{apply_update, Entry, EntryChanges};
pub use format::Vault;
pub use store::{default_vault_dir, VaultStore};
