//! AES-256-GCM authenticated encryption.
//!
//! Each call to `seal` draws a fresh random 12-byte nonce from the OS and
//! prepends it to the ciphertext.  `open` splits the nonce back out before
//! decrypting.
//!
//! Layout of the returned byte buffer:
//!   [ 12-byte nonce | ciphertext + 16-byte auth tag ]

use aes_gcm::aead::{Aead, Payload};
use aes_gcm::Nonce;
use rand::rngs::OsRng;
use rand::TryRngCore;

use super::keys::DerivedKey;
use crate::errors::{PwVaultError, Result};

/// Size of the AES-256-GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Size of the AES-256-GCM authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// Fill `N` bytes from the OS CSPRNG.
pub(crate) fn random_bytes<const N: usize>() -> Result<[u8; N]> {
    let mut bytes = [0u8; N];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| PwVaultError::EncryptionFailed(format!("secure RNG unavailable: {e}")))?;
    Ok(bytes)
}

/// Encrypt `plaintext` under `key`, authenticating `aad` alongside it.
///
/// Returns the nonce prepended to the ciphertext (nonce || ciphertext || tag).
pub fn seal(key: &DerivedKey, plaintext: &[u8], aad: &[u8]) -> Result<Vec<u8>> {
    let cipher = key.cipher();
    let nonce_bytes: [u8; NONCE_LEN] = random_bytes()?;
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(
            nonce,
            Payload {
                msg: plaintext,
                aad,
            },
        )
        .map_err(|e| PwVaultError::EncryptionFailed(format!("AEAD seal: {e}")))?;

    let mut output = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    output.extend_from_slice(&nonce_bytes);
    output.extend_from_slice(&ciphertext);
    Ok(output)
}

/// Decrypt data that was produced by `seal` with the same `aad`.
pub fn open(key: &DerivedKey, sealed: &[u8], aad: &[u8]) -> Result<Vec<u8>> {
    if sealed.len() < NONCE_LEN + TAG_LEN {
        return Err(PwVaultError::MalformedBlob(format!(
            "payload is {} bytes, need at least {}",
            sealed.len(),
            NONCE_LEN + TAG_LEN
        )));
    }

    let (nonce_bytes, ciphertext) = sealed.split_at(NONCE_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);

    key.cipher()
        .decrypt(
            nonce,
            Payload {
                msg: ciphertext,
                aad,
            },
        )
        .map_err(|_| PwVaultError::DecryptionFailed)
}
