//! Unit tests for the credential storage file.

use promptboard::storage::LocalStore;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_set_and_get() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let mut store = LocalStore::load_from(path);
    assert_eq!(store.get("token"), None);

    store.set("token", "abc123").unwrap();
    assert_eq!(store.get("token"), Some("abc123"));
    assert!(store.contains("token"));
}

#[test]
fn test_values_survive_reload() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("storage.json");

    {
        let mut store = LocalStore::load_from(path.clone());
        store.set("token", "abc123").unwrap();
        store.set("other", "value").unwrap();
    }

    let store = LocalStore::load_from(path);
    assert_eq!(store.get("token"), Some("abc123"));
    assert_eq!(store.get("other"), Some("value"));
}

#[test]
fn test_remove_persists() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let mut store = LocalStore::load_from(path.clone());
    store.set("token", "abc123").unwrap();
    store.remove("token").unwrap();
    assert!(!store.contains("token"));

    let store = LocalStore::load_from(path);
    assert_eq!(store.get("token"), None);
}

#[test]
fn test_remove_absent_key_is_noop() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let mut store = LocalStore::load_from(path);
    assert!(store.remove("never_set").is_ok());
}

#[test]
fn test_corrupt_file_starts_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("storage.json");
    fs::write(&path, "{not valid json").unwrap();

    let store = LocalStore::load_from(path);
    assert_eq!(store.get("token"), None);
}

#[test]
fn test_missing_file_starts_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("does_not_exist.json");

    let store = LocalStore::load_from(path);
    assert!(!store.contains("anything"));
}
