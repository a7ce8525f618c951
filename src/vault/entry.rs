//! Vault entry types: the row as stored, and the row as shown.
//!
//! Only the password is encrypted. Title, username, notes, and
//! timestamps are stored as plain metadata next to the blob, and the
//! storage layer is trusted to keep rows of different users apart.

use std::fmt;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::crypto::{EncryptedBlob, VaultCrypto};
use crate::errors::Result;

/// Caller input for a new entry.
pub struct EntryDraft {
    pub title: String,
    pub username: String,
    pub password: Zeroizing<String>,
    pub notes: Option<String>,
}

/// A row as persisted by the storage layer. The password only ever
/// appears here as an `EncryptedBlob`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEntry {
    pub id: String,
    pub user_id: String,
    pub site_name: String,
    pub username: String,
    pub encrypted_password: EncryptedBlob,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A decrypted entry, ready to display.
pub struct VaultEntry {
    pub id: String,
    pub title: String,
    pub username: String,
    pub password: Zeroizing<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Debug for VaultEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VaultEntry")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("notes", &self.notes)
            .finish()
    }
}

/// Lightweight metadata about an entry (no blob, no password).
#[derive(Debug, Clone)]
pub struct EntryMetadata {
    pub id: String,
    pub title: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Result of trying to open one row of a listing.
#[derive(Debug)]
pub enum EntryView {
    Readable(VaultEntry),
    /// The row could not be decrypted. The reason is for logs, not users.
    Unreadable {
        id: String,
        title: String,
        reason: String,
    },
}

/// Random 128-bit id, lowercase hex.
fn new_entry_id() -> String {
    let bytes: [u8; 16] = rand::rng().random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

impl StoredEntry {
    /// Encrypt a draft into a new row owned by `user_id`.
    ///
    /// If encryption fails nothing is produced; there is no plaintext
    /// fallback.
    pub fn seal(crypto: &VaultCrypto, user_id: &str, draft: &EntryDraft) -> Result<Self> {
        let encrypted_password = crypto.encrypt(&draft.password, user_id)?;
        let now = Utc::now();

        Ok(Self {
            id: new_entry_id(),
            user_id: user_id.to_string(),
            site_name: draft.title.clone(),
            username: draft.username.clone(),
            encrypted_password,
            notes: draft.notes.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Replace the password with a freshly sealed one.
    pub fn reseal(&mut self, crypto: &VaultCrypto, new_password: &str) -> Result<()> {
        self.encrypted_password = crypto.encrypt(new_password, &self.user_id)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Decrypt this row using its own owner id.
    pub fn open(&self, crypto: &VaultCrypto) -> Result<VaultEntry> {
        let password = crypto.decrypt(&self.encrypted_password, &self.user_id)?;

        Ok(VaultEntry {
            id: self.id.clone(),
            title: self.site_name.clone(),
            username: self.username.clone(),
            password: Zeroizing::new(password),
            notes: self.notes.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }

    /// Like `open`, but a failure becomes `EntryView::Unreadable`.
    pub fn view(&self, crypto: &VaultCrypto) -> EntryView {
        match self.open(crypto) {
            Ok(entry) => EntryView::Readable(entry),
            Err(e) => {
                tracing::warn!(entry_id = %self.id, "entry could not be decrypted");
                EntryView::Unreadable {
                    id: self.id.clone(),
                    title: self.site_name.clone(),
                    reason: e.to_string(),
                }
            }
        }
    }

    pub fn metadata(&self) -> EntryMetadata {
        EntryMetadata {
            id: self.id.clone(),
            title: self.site_name.clone(),
            username: self.username.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Open every row of a page. One bad row never fails the rest.
pub fn open_all<'a, I>(rows: I, crypto: &VaultCrypto) -> Vec<EntryView>
where
    I: IntoIterator<Item = &'a StoredEntry>,
{
    rows.into_iter().map(|row| row.view(crypto)).collect()
}
