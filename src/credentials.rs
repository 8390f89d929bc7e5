//! Credential persistence.
//!
//! Thin wrapper combining the cipher layer with the local store: the image
//! API key is encrypted at rest, the backend session token is stored as-is
//! (it is already an opaque short-lived bearer token).

use crate::crypto::{self, EncryptedPayload};
use crate::storage::LocalStore;
use anyhow::Result;

/// Store slot for the encrypted image-API key. Name kept from the web
/// client so existing stores migrate without a rename step.
pub const API_KEY_SLOT: &str = "qiniu_api_key";
/// Store slot for the backend session token.
pub const SESSION_TOKEN_SLOT: &str = "token";

pub struct CredentialStore {
    store: LocalStore,
}

impl CredentialStore {
    pub fn load() -> Self {
        Self {
            store: LocalStore::load(),
        }
    }

    /// Build over an explicit store (tests point this at a temp dir).
    pub fn with_store(store: LocalStore) -> Self {
        Self { store }
    }

    // ==================== API Key ====================

    /// Whether a key payload is present (without attempting decryption).
    pub fn has_api_key(&self) -> bool {
        self.store.contains(API_KEY_SLOT)
    }

    /// Encrypt and persist the API key.
    pub fn set_api_key(&mut self, key: &str) -> Result<()> {
        let payload = crypto::encrypt(key)?;
        self.store.set(API_KEY_SLOT, payload.to_json()?)?;
        Ok(())
    }

    /// Load and decrypt the API key. `Ok(None)` means no key is stored;
    /// a present-but-undecryptable payload is an error, never silently
    /// replaced.
    pub fn api_key(&self) -> Result<Option<String>> {
        let Some(json) = self.store.get(API_KEY_SLOT) else {
            return Ok(None);
        };
        let payload = EncryptedPayload::from_json(json)?;
        Ok(Some(crypto::decrypt(&payload)?))
    }

    pub fn clear_api_key(&mut self) -> Result<()> {
        self.store.remove(API_KEY_SLOT)
    }

    // ==================== Session Token ====================

    pub fn session_token(&self) -> Option<String> {
        self.store.get(SESSION_TOKEN_SLOT).map(str::to_string)
    }

    pub fn set_session_token(&mut self, token: &str) -> Result<()> {
        self.store.set(SESSION_TOKEN_SLOT, token)
    }

    pub fn clear_session_token(&mut self) -> Result<()> {
        self.store.remove(SESSION_TOKEN_SLOT)
    }
}
