//! Credential Storage Integration Tests
//!
//! Exercises the full key path: encryption, the storage file on disk,
//! and reload after a simulated restart.

use promptboard::credentials::{CredentialStore, API_KEY_SLOT};
use promptboard::crypto::{decrypt, encrypt_with, CipherMethod, CryptoError};
use promptboard::storage::LocalStore;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_api_key_survives_restart() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("storage.json");

    {
        let store = LocalStore::load_from(path.clone());
        let mut credentials = CredentialStore::with_store(store);
        credentials.set_api_key("sk-test-secret-123").unwrap();
        assert!(credentials.has_api_key());
    }

    // Fresh load simulates an app restart.
    let store = LocalStore::load_from(path);
    let credentials = CredentialStore::with_store(store);
    assert_eq!(
        credentials.api_key().unwrap().as_deref(),
        Some("sk-test-secret-123")
    );
}

#[test]
fn test_key_never_stored_in_plaintext() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let store = LocalStore::load_from(path.clone());
    let mut credentials = CredentialStore::with_store(store);
    credentials.set_api_key("sk-test-secret-123").unwrap();

    let raw = fs::read_to_string(&path).unwrap();
    assert!(
        !raw.contains("sk-test-secret-123"),
        "API key must not appear in plaintext on disk"
    );
    assert!(raw.contains("aes-gcm"), "Payload should carry its method");
}

#[test]
fn test_legacy_rc4_payload_still_decrypts() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("storage.json");

    // Write the key the way an old install would have.
    let payload = encrypt_with("sk-legacy-key", CipherMethod::Rc4).unwrap();
    let mut store = LocalStore::load_from(path.clone());
    store.set(API_KEY_SLOT, payload.to_json().unwrap()).unwrap();

    let store = LocalStore::load_from(path);
    let credentials = CredentialStore::with_store(store);
    assert_eq!(
        credentials.api_key().unwrap().as_deref(),
        Some("sk-legacy-key")
    );
}

#[test]
fn test_tampered_payload_is_rejected() {
    // Graft one payload's salt onto another; the derived key no longer
    // matches and authentication fails.
    let mut payload = encrypt_with("sk-test-secret-123", CipherMethod::AesGcm).unwrap();
    let other = encrypt_with("sk-test-secret-123", CipherMethod::AesGcm).unwrap();
    payload.salt = other.salt;

    let error = decrypt(&payload).unwrap_err();
    assert!(matches!(error, CryptoError::IntegrityFailure));
}

#[test]
fn test_tampered_payload_fails_through_credential_store() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let mut payload = encrypt_with("sk-test-secret-123", CipherMethod::AesGcm).unwrap();
    let other = encrypt_with("unrelated", CipherMethod::AesGcm).unwrap();
    payload.salt = other.salt;

    let mut store = LocalStore::load_from(path);
    store.set(API_KEY_SLOT, payload.to_json().unwrap()).unwrap();
    let credentials = CredentialStore::with_store(store);

    assert!(credentials.api_key().is_err());
}

#[test]
fn test_clear_api_key() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let store = LocalStore::load_from(path);
    let mut credentials = CredentialStore::with_store(store);
    credentials.set_api_key("sk-test-secret-123").unwrap();
    credentials.clear_api_key().unwrap();

    assert!(!credentials.has_api_key());
    assert_eq!(credentials.api_key().unwrap(), None);
}

#[test]
fn test_session_token_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("storage.json");

    {
        let store = LocalStore::load_from(path.clone());
        let mut credentials = CredentialStore::with_store(store);
        credentials.set_session_token("a-session-token").unwrap();
    }

    let store = LocalStore::load_from(path);
    let mut credentials = CredentialStore::with_store(store);
    assert_eq!(
        credentials.session_token().as_deref(),
        Some("a-session-token")
    );

    credentials.clear_session_token().unwrap();
    assert_eq!(credentials.session_token(), None);
}
