//! Per-user key derivation.
//!
//! Every user gets exactly one AES-256-GCM key:
//!
//! ```text
//! key = SHA-256( utf8(user_id) || utf8(app_secret) )
//! ```
//!
//! No salt, no stretching, no randomness: the same inputs always give the
//! same key, so nothing has to be stored to decrypt later.

use std::fmt;

use aes_gcm::{Aes256Gcm, Key, KeyInit};
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, Zeroizing};

use crate::errors::{PwVaultError, Result};

/// Length of a derived key (256 bits).
pub const KEY_LEN: usize = 32;

/// Application secret shipped with the legacy web client. Kept as the
/// fallback so blobs written by that client still open.
const LEGACY_APP_SECRET: &str = "your-app-secret-salt-2024-password-manager";

/// Application-wide secret mixed into every derived key.
///
/// This binds keys to one deployment as well as to a user. It is **not** a
/// trust boundary: anyone holding the shipped binary or config can read it,
/// and with it plus a user id they can derive that user's key. Treat it as
/// a light obfuscation layer that stops derivation from a user id alone.
#[derive(Clone)]
pub struct AppSecret(Zeroizing<String>);

impl AppSecret {
    /// Wrap a configured secret. Empty secrets are rejected.
    pub fn new(secret: impl Into<String>) -> Result<Self> {
        let secret = Zeroizing::new(secret.into());
        if secret.is_empty() {
            return Err(PwVaultError::ConfigError(
                "app secret cannot be empty".into(),
            ));
        }
        Ok(Self(secret))
    }

    /// The built-in secret used when nothing is configured.
    pub fn legacy() -> Self {
        Self(Zeroizing::new(LEGACY_APP_SECRET.to_string()))
    }

    /// Returns `true` if this is the built-in fallback secret.
    pub fn is_legacy(&self) -> bool {
        self.0.as_str() == LEGACY_APP_SECRET
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl Default for AppSecret {
    fn default() -> Self {
        Self::legacy()
    }
}

impl fmt::Debug for AppSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AppSecret(<redacted>)")
    }
}

/// A 256-bit symmetric key for one user.
///
/// There is no accessor for the raw bytes: the key can only
/// be handed to the seal/open functions in this crate. Memory is wiped on
/// drop.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct DerivedKey {
    bytes: [u8; KEY_LEN],
}

impl DerivedKey {
    pub(crate) fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Build the AEAD cipher for one seal/open call.
    pub(crate) fn cipher(&self) -> Aes256Gcm {
        Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.bytes))
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DerivedKey(<redacted>)")
    }
}

/// Derive the key for `user_id` under `app_secret`.
pub fn derive_key(user_id: &str, app_secret: &AppSecret) -> Result<DerivedKey> {
    if user_id.is_empty() {
        return Err(PwVaultError::KeyDerivationFailed(
            "user id cannot be empty".into(),
        ));
    }

    let mut hasher = Sha256::new();
    hasher.update(user_id.as_bytes());
    hasher.update(app_secret.as_bytes());
    let digest = hasher.finalize();

    let mut bytes = [0u8; KEY_LEN];
    bytes.copy_from_slice(&digest);
    let key = DerivedKey::from_bytes(bytes);
    bytes.zeroize();

    Ok(key)
}
