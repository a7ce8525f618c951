pub mod cli;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod generator;
pub mod vault;

pub use crypto::{AadBinding, AppSecret, EncryptedBlob, VaultCrypto};
pub use errors::{PwVaultError, Result};
