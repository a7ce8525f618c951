//! High-level entry operations used by CLI commands.
//!
//! `VaultStore` keeps every user's rows in one local file and filters by
//! owner on each call, the way the hosted table does with row-level
//! policies. It is a stand-in for that table, not an access-control layer.

use std::path::{Path, PathBuf};

use crate::crypto::VaultCrypto;
use crate::errors::{PwVaultError, Result};

use super::entry::{open_all, EntryDraft, EntryMetadata, EntryView, StoredEntry, VaultEntry};
use super::format::{self, StoreFile};

/// Maximum length of an entry title.
const MAX_TITLE_LEN: usize = 256;

pub struct VaultStore {
    /// Path to the store file on disk.
    path: PathBuf,

    /// Rows of every user, in insertion order.
    entries: Vec<StoredEntry>,
}

impl VaultStore {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Open an existing store file.
    pub fn open(path: &Path) -> Result<Self> {
        let file = format::read_store(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            entries: file.entries,
        })
    }

    /// Open the store at `path`, or start an empty one if it does not
    /// exist yet. Nothing is written until `save`.
    pub fn open_or_create(path: &Path) -> Result<Self> {
        match Self::open(path) {
            Err(PwVaultError::StoreNotFound(_)) => Ok(Self {
                path: path.to_path_buf(),
                entries: Vec::new(),
            }),
            other => other,
        }
    }

    // ------------------------------------------------------------------
    // Entry operations
    // ------------------------------------------------------------------

    /// Seal and add a new entry for `user_id`. Returns the new entry id.
    pub fn add(&mut self, crypto: &VaultCrypto, user_id: &str, draft: &EntryDraft) -> Result<String> {
        Self::validate_title(&draft.title)?;

        let row = StoredEntry::seal(crypto, user_id, draft)?;
        let id = row.id.clone();
        self.entries.push(row);
        Ok(id)
    }

    /// The stored row with `id`, if it belongs to `user_id`.
    pub fn row(&self, user_id: &str, id: &str) -> Result<&StoredEntry> {
        self.entries
            .iter()
            .find(|e| e.id == id && e.user_id == user_id)
            .ok_or_else(|| PwVaultError::EntryNotFound(id.to_string()))
    }

    /// Decrypt one entry.
    pub fn get(&self, crypto: &VaultCrypto, user_id: &str, id: &str) -> Result<VaultEntry> {
        self.row(user_id, id)?.open(crypto)
    }

    /// Replace an entry's password.
    pub fn update_password(
        &mut self,
        crypto: &VaultCrypto,
        user_id: &str,
        id: &str,
        new_password: &str,
    ) -> Result<()> {
        let row = self
            .entries
            .iter_mut()
            .find(|e| e.id == id && e.user_id == user_id)
            .ok_or_else(|| PwVaultError::EntryNotFound(id.to_string()))?;
        row.reseal(crypto, new_password)
    }

    /// Remove an entry.
    pub fn delete(&mut self, user_id: &str, id: &str) -> Result<()> {
        let before = self.entries.len();
        self.entries.retain(|e| !(e.id == id && e.user_id == user_id));
        if self.entries.len() == before {
            return Err(PwVaultError::EntryNotFound(id.to_string()));
        }
        Ok(())
    }

    /// Metadata for all of `user_id`'s entries, sorted by title.
    pub fn list(&self, user_id: &str) -> Vec<EntryMetadata> {
        let mut list: Vec<EntryMetadata> = self
            .owned_by(user_id)
            .map(StoredEntry::metadata)
            .collect();

        list.sort_by(|a, b| {
            a.title
                .to_lowercase()
                .cmp(&b.title.to_lowercase())
                .then_with(|| a.id.cmp(&b.id))
        });
        list
    }

    /// Decrypt every entry of `user_id`, marking failures as unreadable.
    pub fn open_all(&self, crypto: &VaultCrypto, user_id: &str) -> Vec<EntryView> {
        open_all(self.owned_by(user_id), crypto)
    }

    pub fn count_for(&self, user_id: &str) -> usize {
        self.owned_by(user_id).count()
    }

    fn owned_by<'a>(&'a self, user_id: &'a str) -> impl Iterator<Item = &'a StoredEntry> + 'a {
        self.entries.iter().filter(move |e| e.user_id == user_id)
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Write the store to disk atomically.
    pub fn save(&self) -> Result<()> {
        let file = StoreFile {
            entries: self.entries.clone(),
            ..StoreFile::default()
        };
        format::write_store(&self.path, &file)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Total rows across all users.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // ------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------

    fn validate_title(title: &str) -> Result<()> {
        if title.trim().is_empty() {
            return Err(PwVaultError::CommandFailed(
                "entry title cannot be empty".into(),
            ));
        }
        if title.len() > MAX_TITLE_LEN {
            return Err(PwVaultError::CommandFailed(format!(
                "entry title cannot exceed {MAX_TITLE_LEN} characters"
            )));
        }
        Ok(())
    }
}
