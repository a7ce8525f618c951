//! `VaultCrypto`: the user-facing encrypt/decrypt pair for vault secrets.
//!
//! ```text
//! encrypt(plaintext, user_id) -> base64( nonce || AES-256-GCM(key(user_id), plaintext) )
//! decrypt(blob, user_id)      -> plaintext, or an error; never a guess
//! ```
//!
//! Storage, network, and UI are somebody else's problem. The only side
//! effect is reading the OS RNG for nonces.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use super::blob::EncryptedBlob;
use super::cache::KeyCache;
use super::encryption::{open, random_bytes, seal, NONCE_LEN, TAG_LEN};
use super::keys::{derive_key, AppSecret, DerivedKey, KEY_LEN};
use crate::errors::{PwVaultError, Result};

/// Prefix of the associated data used by `AadBinding::UserId`.
const AAD_CONTEXT: &[u8] = b"pwvault:v1:";

/// What, if anything, is authenticated alongside each ciphertext.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AadBinding {
    /// No associated data. Compatible with blobs from the legacy web client.
    #[default]
    None,
    /// Bind `pwvault:v1:<user_id>` as associated data.
    UserId,
}

impl AadBinding {
    fn associated_data(self, user_id: &str) -> Vec<u8> {
        match self {
            Self::None => Vec::new(),
            Self::UserId => [AAD_CONTEXT, user_id.as_bytes()].concat(),
        }
    }
}

/// Per-user authenticated encryption of vault secrets.
///
/// Cheap to share across threads: the only mutable state is the optional
/// key cache, which guards itself.
pub struct VaultCrypto {
    app_secret: AppSecret,
    binding: AadBinding,
    cache: Option<KeyCache>,
}

impl VaultCrypto {
    /// Baseline configuration: no associated data, no key cache.
    pub fn new(app_secret: AppSecret) -> Self {
        Self {
            app_secret,
            binding: AadBinding::None,
            cache: None,
        }
    }

    pub fn with_binding(mut self, binding: AadBinding) -> Self {
        self.binding = binding;
        self
    }

    /// Keep derived keys in memory between calls until `sign_out`/`clear_keys`.
    pub fn with_key_cache(mut self) -> Self {
        self.cache = Some(KeyCache::new());
        self
    }

    pub fn binding(&self) -> AadBinding {
        self.binding
    }

    /// Number of keys currently cached (always 0 without a cache).
    pub fn cached_keys(&self) -> usize {
        self.cache.as_ref().map_or(0, KeyCache::len)
    }

    // ------------------------------------------------------------------
    // Environment check
    // ------------------------------------------------------------------

    /// Returns `true` if the secure RNG and the AEAD/digest primitives work.
    pub fn is_supported() -> bool {
        Self::ensure_supported().is_ok()
    }

    /// Like `is_supported`, but says which primitive is missing.
    pub fn ensure_supported() -> Result<()> {
        let mut probe_key: [u8; KEY_LEN] = random_bytes()
            .map_err(|e| PwVaultError::UnsupportedEnvironment(format!("secure RNG: {e}")))?;

        let key = DerivedKey::from_bytes(probe_key);
        probe_key.zeroize();

        let sealed = seal(&key, b"pwvault-self-test", b"")
            .map_err(|e| PwVaultError::UnsupportedEnvironment(format!("AEAD seal: {e}")))?;
        let opened = open(&key, &sealed, b"")
            .map_err(|e| PwVaultError::UnsupportedEnvironment(format!("AEAD open: {e}")))?;
        if opened != b"pwvault-self-test" {
            return Err(PwVaultError::UnsupportedEnvironment(
                "AEAD self-test returned the wrong plaintext".into(),
            ));
        }

        derive_key("self-test", &AppSecret::legacy())
            .map_err(|e| PwVaultError::UnsupportedEnvironment(format!("digest: {e}")))?;

        Ok(())
    }

    // ------------------------------------------------------------------
    // Keys
    // ------------------------------------------------------------------

    /// Derive the key for `user_id`. Pure: same input, same key.
    pub fn derive_key(&self, user_id: &str) -> Result<DerivedKey> {
        derive_key(user_id, &self.app_secret)
    }

    fn key_for(&self, user_id: &str) -> Result<Arc<DerivedKey>> {
        match &self.cache {
            Some(cache) => cache.get_or_derive(user_id, || self.derive_key(user_id)),
            None => self.derive_key(user_id).map(Arc::new),
        }
    }

    /// Forget the cached key for `user_id`. Call on sign-out.
    pub fn sign_out(&self, user_id: &str) {
        if let Some(cache) = &self.cache {
            if cache.evict(user_id) {
                tracing::debug!("evicted cached key on sign-out");
            }
        }
    }

    /// Forget every cached key. Call on account switch.
    pub fn clear_keys(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
        }
    }

    // ------------------------------------------------------------------
    // Encrypt / decrypt
    // ------------------------------------------------------------------

    /// Encrypt `plaintext` for `user_id`.
    ///
    /// Any failure, including key derivation, is reported as
    /// `EncryptionFailed`.
    pub fn encrypt(&self, plaintext: &str, user_id: &str) -> Result<EncryptedBlob> {
        let key = self.key_for(user_id).map_err(|e| match e {
            PwVaultError::KeyDerivationFailed(msg) => PwVaultError::EncryptionFailed(msg),
            other => other,
        })?;
        self.encrypt_with(&key, plaintext, user_id)
    }

    /// Encrypt with an already-derived key.
    ///
    /// `user_id` must be the one `key` was derived from; it only feeds the
    /// associated data when `AadBinding::UserId` is active.
    pub fn encrypt_with(
        &self,
        key: &DerivedKey,
        plaintext: &str,
        user_id: &str,
    ) -> Result<EncryptedBlob> {
        let aad = self.binding.associated_data(user_id);
        let sealed = seal(key, plaintext.as_bytes(), &aad)?;
        tracing::debug!(
            plaintext_len = plaintext.len(),
            sealed_len = sealed.len(),
            "sealed vault secret"
        );
        Ok(EncryptedBlob::encode(&sealed))
    }

    /// Decrypt `blob` for `user_id`.
    ///
    /// Fails with `MalformedBlob` when the text is not base64 or too short,
    /// and with `DecryptionFailed` when authentication fails.
    pub fn decrypt(&self, blob: impl AsRef<str>, user_id: &str) -> Result<String> {
        let key = self.key_for(user_id)?;
        self.decrypt_with(&key, blob, user_id)
    }

    /// Decrypt with an already-derived key.
    pub fn decrypt_with(
        &self,
        key: &DerivedKey,
        blob: impl AsRef<str>,
        user_id: &str,
    ) -> Result<String> {
        let sealed = EncryptedBlob::decode(blob.as_ref())?;
        if sealed.len() < NONCE_LEN + TAG_LEN {
            return Err(PwVaultError::MalformedBlob(format!(
                "decoded blob is {} bytes, need at least {}",
                sealed.len(),
                NONCE_LEN + TAG_LEN
            )));
        }

        let aad = self.binding.associated_data(user_id);
        let plaintext = open(key, &sealed, &aad).map_err(|e| {
            tracing::debug!(blob_len = sealed.len(), "vault secret failed authentication");
            e
        })?;

        String::from_utf8(plaintext).map_err(|e| {
            let mut bad_bytes = e.into_bytes();
            bad_bytes.zeroize();
            PwVaultError::DecryptionFailed
        })
    }
}

impl Default for VaultCrypto {
    fn default() -> Self {
        Self::new(AppSecret::legacy())
    }
}

impl fmt::Debug for VaultCrypto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VaultCrypto")
            .field("app_secret", &self.app_secret)
            .field("binding", &self.binding)
            .field("cache", &self.cache)
            .finish()
    }
}
