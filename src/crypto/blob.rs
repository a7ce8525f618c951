//! The persisted, text-safe form of an encrypted secret.

use std::fmt;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::errors::{PwVaultError, Result};

/// Base64 (standard alphabet, padded) of `nonce || ciphertext || tag`.
///
/// Opaque to storage: it is written to a single text column and is never
/// modified after `VaultCrypto::encrypt` produces it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncryptedBlob(String);

impl EncryptedBlob {
    pub(crate) fn encode(sealed: &[u8]) -> Self {
        Self(BASE64.encode(sealed))
    }

    /// Decode the text back into raw sealed bytes.
    pub(crate) fn decode(text: &str) -> Result<Vec<u8>> {
        BASE64
            .decode(text)
            .map_err(|e| PwVaultError::MalformedBlob(format!("invalid base64: {e}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for EncryptedBlob {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl AsRef<str> for EncryptedBlob {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EncryptedBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
