//! On-disk format of the local entry store.
//!
//! A store file is a single JSON document:
//!
//! ```text
//! { "version": 1, "entries": [ StoredEntry, ... ] }
//! ```
//!
//! Entry passwords are already `EncryptedBlob`s, so the file itself is
//! not encrypted again.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::entry::StoredEntry;
use crate::errors::{PwVaultError, Result};

/// Current store format version.
pub const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreFile {
    pub version: u32,
    #[serde(default)]
    pub entries: Vec<StoredEntry>,
}

impl Default for StoreFile {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            entries: Vec::new(),
        }
    }
}

/// Write a store file to disk **atomically**.
///
/// 1. Serialize to pretty JSON.
/// 2. Write to a temp file in the same directory.
/// 3. Rename temp file over the target path.
pub fn write_store(path: &Path, store: &StoreFile) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(store)
        .map_err(|e| PwVaultError::SerializationError(format!("entries: {e}")))?;

    let parent = path.parent().unwrap_or(Path::new("."));
    if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent)?;
    }
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    fs::write(&tmp_path, &bytes)?;
    fs::rename(&tmp_path, path)?;

    tracing::debug!(path = %path.display(), entries = store.entries.len(), "wrote entry store");
    Ok(())
}

/// Read a store file from disk.
pub fn read_store(path: &Path) -> Result<StoreFile> {
    if !path.exists() {
        return Err(PwVaultError::StoreNotFound(path.to_path_buf()));
    }

    let data = fs::read(path)?;
    let store: StoreFile = serde_json::from_slice(&data)
        .map_err(|e| PwVaultError::InvalidStoreFormat(format!("store JSON: {e}")))?;

    if store.version != CURRENT_VERSION {
        return Err(PwVaultError::InvalidStoreFormat(format!(
            "unsupported version {}, expected {CURRENT_VERSION}",
            store.version
        )));
    }

    tracing::debug!(path = %path.display(), entries = store.entries.len(), "read entry store");
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_then_read_empty_store() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("store.json");

        write_store(&path, &StoreFile::default()).unwrap();
        let store = read_store(&path).unwrap();
        assert_eq!(store.version, CURRENT_VERSION);
        assert!(store.entries.is_empty());
        assert!(!tmp.path().join("nested").join(".store.json.tmp").exists());
    }

    #[test]
    fn missing_file_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let err = read_store(&tmp.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, PwVaultError::StoreNotFound(_)));
    }

    #[test]
    fn rejects_unknown_version() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("store.json");
        fs::write(&path, r#"{"version": 9, "entries": []}"#).unwrap();
        let err = read_store(&path).unwrap_err();
        assert!(matches!(err, PwVaultError::InvalidStoreFormat(_)));
    }

    #[test]
    fn rejects_garbage() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("store.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            read_store(&path),
            Err(PwVaultError::InvalidStoreFormat(_))
        ));
    }
}
