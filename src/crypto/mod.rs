//! Cryptographic core of pwvault.
//!
//! This module provides:
//! - SHA-256 per-user key derivation (`keys`)
//! - AES-256-GCM seal/open with a prepended nonce (`encryption`)
//! - The base64 `EncryptedBlob` wire form (`blob`)
//! - A session-scoped derived-key cache (`cache`)
//! - `VaultCrypto`, the encrypt/decrypt API callers use (`vault_crypto`)

pub mod blob;
pub mod cache;
pub mod encryption;
pub mod keys;
pub mod vault_crypto;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{VaultCrypto, AppSecret, EncryptedBlob};
pub use blob::EncryptedBlob;
pub use cache::KeyCache;
pub use encryption::{NONCE_LEN, TAG_LEN};
pub use keys::{derive_key, AppSecret, DerivedKey, KEY_LEN};
pub use vault_crypto::{AadBinding, VaultCrypto};
