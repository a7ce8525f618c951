use std::path::PathBuf;
use thiserror::Error;

/// Generic text shown to end users for any per-entry crypto failure.
pub const ENTRY_FAILURE_MESSAGE: &str = "Could not process this entry";

/// All errors that can occur in pwvault.
#[derive(Debug, Error)]
pub enum PwVaultError {
    // --- Crypto errors ---
    #[error("Unsupported environment: {0}")]
    UnsupportedEnvironment(String),

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Malformed blob: {0}")]
    MalformedBlob(String),

    #[error("Decryption failed: wrong user or corrupted data")]
    DecryptionFailed,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Generator errors ---
    #[error("Invalid generator settings: {0}")]
    InvalidGeneratorSettings(String),

    // --- Store errors ---
    #[error("Entry store not found at {0}")]
    StoreNotFound(PathBuf),

    #[error("Invalid entry store format: {0}")]
    InvalidStoreFormat(String),

    #[error("Entry '{0}' not found")]
    EntryNotFound(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

impl PwVaultError {
    /// Returns `true` for the four failure kinds raised by the
    /// encrypt/decrypt core itself.
    pub fn is_crypto_failure(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedEnvironment(_)
                | Self::EncryptionFailed(_)
                | Self::MalformedBlob(_)
                | Self::DecryptionFailed
        )
    }

    /// Message safe to show an end user.
    ///
    /// Entry-level crypto failures collapse to a generic message so raw
    /// cipher detail never reaches the screen. Everything else keeps its
    /// `Display` text.
    pub fn user_message(&self) -> String {
        match self {
            Self::EncryptionFailed(_) | Self::MalformedBlob(_) | Self::DecryptionFailed => {
                ENTRY_FAILURE_MESSAGE.to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Convenience type alias for pwvault results.
pub type Result<T> = std::result::Result<T, PwVaultError>;
