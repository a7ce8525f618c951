//! Integration tests for the pwvault entry store.

use std::fs;

use pwvault::crypto::{AppSecret, VaultCrypto};
use pwvault::vault::{EntryDraft, EntryView, VaultStore};
use pwvault::PwVaultError;
use tempfile::TempDir;
use zeroize::Zeroizing;

/// Helper: create a temporary store path inside a fresh temp dir.
fn store_path() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("entries.json");
    (dir, path)
}

fn crypto() -> VaultCrypto {
    VaultCrypto::new(AppSecret::new("vault-test-secret").unwrap())
}

fn draft(title: &str, password: &str) -> EntryDraft {
    EntryDraft {
        title: title.to_string(),
        username: "me@example.com".to_string(),
        password: Zeroizing::new(password.to_string()),
        notes: None,
    }
}

// ---------------------------------------------------------------------------
// Create, save, and re-open
// ---------------------------------------------------------------------------

#[test]
fn add_save_and_reopen() {
    let (_dir, path) = store_path();
    let c = crypto();

    let mut store = VaultStore::open_or_create(&path).unwrap();
    assert!(store.is_empty());
    let id = store.add(&c, "user-123", &draft("Gmail", "MyGmail123!")).unwrap();
    store.save().unwrap();

    let reopened = VaultStore::open(&path).unwrap();
    assert_eq!(reopened.len(), 1);
    let entry = reopened.get(&c, "user-123", &id).unwrap();
    assert_eq!(entry.title, "Gmail");
    assert_eq!(entry.password.as_str(), "MyGmail123!");
}

#[test]
fn store_file_never_contains_plaintext_password() {
    let (_dir, path) = store_path();
    let c = crypto();

    let mut store = VaultStore::open_or_create(&path).unwrap();
    store
        .add(&c, "user-1", &draft("Bank", "correct horse battery staple"))
        .unwrap();
    store.save().unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("\"encrypted_password\""));
    assert!(contents.contains("Bank"));
    assert!(!contents.contains("correct horse battery staple"));
}

#[test]
fn open_missing_store_fails() {
    let (_dir, path) = store_path();
    assert!(matches!(
        VaultStore::open(&path),
        Err(PwVaultError::StoreNotFound(_))
    ));
}

// ---------------------------------------------------------------------------
// Per-user scoping
// ---------------------------------------------------------------------------

#[test]
fn users_only_see_their_own_rows() {
    let (_dir, path) = store_path();
    let c = crypto();
    let mut store = VaultStore::open_or_create(&path).unwrap();

    let alice_id = store.add(&c, "alice", &draft("Mail", "a-pass")).unwrap();
    store.add(&c, "bob", &draft("Mail", "b-pass")).unwrap();
    store.add(&c, "bob", &draft("Bank", "b-bank")).unwrap();

    assert_eq!(store.count_for("alice"), 1);
    assert_eq!(store.count_for("bob"), 2);

    let titles: Vec<String> = store.list("bob").into_iter().map(|m| m.title).collect();
    assert_eq!(titles, vec!["Bank", "Mail"]);

    assert!(matches!(
        store.get(&c, "bob", &alice_id),
        Err(PwVaultError::EntryNotFound(_))
    ));
    assert!(matches!(
        store.delete("bob", &alice_id),
        Err(PwVaultError::EntryNotFound(_))
    ));
}

// ---------------------------------------------------------------------------
// Update and delete
// ---------------------------------------------------------------------------

#[test]
fn update_password_reseals() {
    let (_dir, path) = store_path();
    let c = crypto();
    let mut store = VaultStore::open_or_create(&path).unwrap();

    let id = store.add(&c, "user-1", &draft("Forum", "old-pass")).unwrap();
    let old_blob = store.row("user-1", &id).unwrap().encrypted_password.clone();

    store.update_password(&c, "user-1", &id, "new-pass").unwrap();
    let row = store.row("user-1", &id).unwrap();
    assert_ne!(row.encrypted_password, old_blob);
    assert_eq!(store.get(&c, "user-1", &id).unwrap().password.as_str(), "new-pass");
}

#[test]
fn delete_removes_entry() {
    let (_dir, path) = store_path();
    let c = crypto();
    let mut store = VaultStore::open_or_create(&path).unwrap();

    let id = store.add(&c, "user-1", &draft("Temp", "x")).unwrap();
    store.delete("user-1", &id).unwrap();
    assert_eq!(store.count_for("user-1"), 0);
    assert!(store.delete("user-1", &id).is_err());
}

#[test]
fn empty_title_rejected() {
    let (_dir, path) = store_path();
    let mut store = VaultStore::open_or_create(&path).unwrap();
    assert!(store.add(&crypto(), "user-1", &draft("  ", "x")).is_err());
    assert!(store.is_empty());
}

// ---------------------------------------------------------------------------
// Unreadable rows
// ---------------------------------------------------------------------------

#[test]
fn unreadable_rows_do_not_fail_the_page() {
    let (_dir, path) = store_path();
    let c = crypto();
    let mut store = VaultStore::open_or_create(&path).unwrap();
    store.add(&c, "user-1", &draft("Good", "fine")).unwrap();
    let bad_id = store.add(&c, "user-1", &draft("Bad", "lost")).unwrap();
    store.save().unwrap();

    // Corrupt one blob on disk.
    let mut json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    for entry in json["entries"].as_array_mut().unwrap() {
        if entry["id"] == bad_id.as_str() {
            entry["encrypted_password"] = serde_json::Value::from("AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA");
        }
    }
    fs::write(&path, serde_json::to_string(&json).unwrap()).unwrap();

    let store = VaultStore::open(&path).unwrap();
    let views = store.open_all(&c, "user-1");
    assert_eq!(views.len(), 2);

    let mut readable = 0;
    let mut unreadable = 0;
    for view in views {
        match view {
            EntryView::Readable(entry) => {
                assert_eq!(entry.password.as_str(), "fine");
                readable += 1;
            }
            EntryView::Unreadable { id, title, .. } => {
                assert_eq!(id, bad_id);
                assert_eq!(title, "Bad");
                unreadable += 1;
            }
        }
    }
    assert_eq!((readable, unreadable), (1, 1));
}

#[test]
fn rows_from_another_deployment_are_unreadable() {
    let (_dir, path) = store_path();
    let mut store = VaultStore::open_or_create(&path).unwrap();
    store.add(&crypto(), "user-1", &draft("Mail", "pw")).unwrap();

    let other = VaultCrypto::new(AppSecret::new("other-deployment").unwrap());
    let views = store.open_all(&other, "user-1");
    assert!(matches!(views.as_slice(), [EntryView::Unreadable { .. }]));
}
