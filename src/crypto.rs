//! Credential encryption.
//!
//! Secrets are encrypted with AES-256-GCM under a key derived from the
//! application passphrase via PBKDF2-HMAC-SHA-256 (100k iterations, fresh
//! random salt per call). Payloads are versioned and carry their cipher
//! method so `decrypt` can also open legacy RC4 payloads written by older
//! clients. New encryptions never degrade to the legacy cipher; it is only
//! reachable through [`encrypt_with`]. The legacy path carries no integrity
//! check, matching the payloads it exists to read.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use once_cell::sync::Lazy;
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::Sha256;

/// Payload format version
pub const PAYLOAD_VERSION: u32 = 2;

const PBKDF2_ITERATIONS: u32 = 100_000;
const SALT_LEN: usize = 16;
const NONCE_LEN: usize = 12;
const KEY_LEN: usize = 32;

const DEFAULT_PASSPHRASE: &str = "lion-app-secret";

static PASSPHRASE: Lazy<String> = Lazy::new(|| {
    std::env::var("PROMPTBOARD_SECRET").unwrap_or_else(|_| DEFAULT_PASSPHRASE.to_string())
});

// ============================================================================
// Types
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CipherMethod {
    #[serde(rename = "aes-gcm")]
    AesGcm,
    #[serde(rename = "rc4")]
    Rc4,
}

/// Versioned encrypted blob; all binary fields base64-encoded.
/// RC4 payloads carry no iv.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EncryptedPayload {
    pub v: u32,
    pub method: CipherMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iv: Option<String>,
    pub salt: String,
    pub ciphertext: String,
}

impl EncryptedPayload {
    pub fn to_json(&self) -> Result<String, CryptoError> {
        serde_json::to_string(self).map_err(CryptoError::Payload)
    }

    pub fn from_json(json: &str) -> Result<Self, CryptoError> {
        serde_json::from_str(json).map_err(CryptoError::Payload)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("malformed {field} field")]
    MalformedField { field: &'static str },
    #[error("payload is missing the iv field required by aes-gcm")]
    MissingIv,
    #[error("decryption integrity check failed")]
    IntegrityFailure,
    #[error("encryption failed")]
    EncryptFailure,
    #[error("decrypted data is not valid UTF-8")]
    InvalidUtf8,
    #[error("unreadable payload: {0}")]
    Payload(#[source] serde_json::Error),
}

// ============================================================================
// Encrypt / Decrypt
// ============================================================================

/// Encrypt a secret with the authenticated cipher. Every call draws a fresh
/// random salt and nonce, so equal plaintexts never produce equal payloads.
pub fn encrypt(plaintext: &str) -> Result<EncryptedPayload, CryptoError> {
    encrypt_with(plaintext, CipherMethod::AesGcm)
}

/// Encrypt with an explicit cipher method. `Rc4` exists for producing
/// payloads readable by legacy clients and for compatibility tests.
pub fn encrypt_with(
    plaintext: &str,
    method: CipherMethod,
) -> Result<EncryptedPayload, CryptoError> {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);

    match method {
        CipherMethod::AesGcm => {
            let mut nonce_bytes = [0u8; NONCE_LEN];
            rand::thread_rng().fill_bytes(&mut nonce_bytes);

            let key = derive_key(&salt);
            let cipher =
                Aes256Gcm::new_from_slice(&key).map_err(|_| CryptoError::EncryptFailure)?;
            let nonce = Nonce::from_slice(&nonce_bytes);
            let ciphertext = cipher
                .encrypt(nonce, plaintext.as_bytes())
                .map_err(|_| CryptoError::EncryptFailure)?;

            Ok(EncryptedPayload {
                v: PAYLOAD_VERSION,
                method: CipherMethod::AesGcm,
                iv: Some(BASE64.encode(nonce_bytes)),
                salt: BASE64.encode(salt),
                ciphertext: BASE64.encode(ciphertext),
            })
        }
        CipherMethod::Rc4 => {
            let key = rc4_key(&salt);
            let mut data = plaintext.as_bytes().to_vec();
            Rc4::new(&key).apply(&mut data);

            Ok(EncryptedPayload {
                v: PAYLOAD_VERSION,
                method: CipherMethod::Rc4,
                iv: None,
                salt: BASE64.encode(salt),
                ciphertext: BASE64.encode(data),
            })
        }
    }
}

/// Decrypt a payload, dispatching on its method tag. Fails on malformed
/// base64 fields, a missing iv in authenticated mode, or a failed GCM
/// integrity check. Pure: decrypting the same payload twice is idempotent.
pub fn decrypt(payload: &EncryptedPayload) -> Result<String, CryptoError> {
    let salt = decode_field(&payload.salt, "salt")?;
    let ciphertext = decode_field(&payload.ciphertext, "ciphertext")?;

    let plaintext = match payload.method {
        CipherMethod::AesGcm => {
            let iv = payload.iv.as_deref().ok_or(CryptoError::MissingIv)?;
            let nonce_bytes = decode_field(iv, "iv")?;
            if nonce_bytes.len() != NONCE_LEN {
                return Err(CryptoError::MalformedField { field: "iv" });
            }

            let key = derive_key(&salt);
            let cipher =
                Aes256Gcm::new_from_slice(&key).map_err(|_| CryptoError::IntegrityFailure)?;
            let nonce = Nonce::from_slice(&nonce_bytes);
            cipher
                .decrypt(nonce, ciphertext.as_ref())
                .map_err(|_| CryptoError::IntegrityFailure)?
        }
        CipherMethod::Rc4 => {
            let key = rc4_key(&salt);
            let mut data = ciphertext;
            Rc4::new(&key).apply(&mut data);
            data
        }
    };

    String::from_utf8(plaintext).map_err(|_| CryptoError::InvalidUtf8)
}

fn decode_field(value: &str, field: &'static str) -> Result<Vec<u8>, CryptoError> {
    BASE64
        .decode(value)
        .map_err(|_| CryptoError::MalformedField { field })
}

// ============================================================================
// Key Derivation
// ============================================================================

fn derive_key(salt: &[u8]) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(PASSPHRASE.as_bytes(), salt, PBKDF2_ITERATIONS, &mut key);
    key
}

/// The legacy cipher keys directly off `passphrase:base64(salt)` with no
/// stretching; kept bit-compatible with the payloads it has to read.
fn rc4_key(salt: &[u8]) -> Vec<u8> {
    format!("{}:{}", PASSPHRASE.as_str(), BASE64.encode(salt)).into_bytes()
}

// ============================================================================
// Legacy Stream Cipher
// ============================================================================

/// Classic RC4 key scheduling + PRGA. Encryption and decryption are the
/// same XOR pass.
struct Rc4 {
    s: [u8; 256],
}

impl Rc4 {
    fn new(key: &[u8]) -> Self {
        let mut s = [0u8; 256];
        for (i, slot) in s.iter_mut().enumerate() {
            *slot = i as u8;
        }
        let mut j: u8 = 0;
        for i in 0..256 {
            j = j
                .wrapping_add(s[i])
                .wrapping_add(key[i % key.len()]);
            s.swap(i, j as usize);
        }
        Self { s }
    }

    fn apply(&mut self, data: &mut [u8]) {
        let mut i: u8 = 0;
        let mut j: u8 = 0;
        for byte in data.iter_mut() {
            i = i.wrapping_add(1);
            j = j.wrapping_add(self.s[i as usize]);
            self.s.swap(i as usize, j as usize);
            let k = self.s[(self.s[i as usize].wrapping_add(self.s[j as usize])) as usize];
            *byte ^= k;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rc4_is_its_own_inverse() {
        let key = b"some-key";
        let mut data = b"hello world".to_vec();
        Rc4::new(key).apply(&mut data);
        assert_ne!(data, b"hello world");
        Rc4::new(key).apply(&mut data);
        assert_eq!(data, b"hello world");
    }

    #[test]
    fn payload_json_omits_iv_for_rc4() {
        let payload = encrypt_with("x", CipherMethod::Rc4).unwrap();
        let json = payload.to_json().unwrap();
        assert!(!json.contains("\"iv\""));
        assert!(json.contains("\"rc4\""));
    }

    #[test]
    fn round_trip_preserves_plaintext() {
        for plaintext in ["", "sk-test-123", "crème brûlée 🎨"] {
            let payload = encrypt(plaintext).unwrap();
            assert_eq!(payload.v, PAYLOAD_VERSION);
            assert_eq!(decrypt(&payload).unwrap(), plaintext);

            let legacy = encrypt_with(plaintext, CipherMethod::Rc4).unwrap();
            assert_eq!(decrypt(&legacy).unwrap(), plaintext);
        }
    }

    #[test]
    fn equal_plaintexts_produce_distinct_payloads() {
        let a = encrypt("same secret").unwrap();
        let b = encrypt("same secret").unwrap();
        assert_ne!(a.salt, b.salt);
        assert_ne!(a.ciphertext, b.ciphertext);
    }

    #[test]
    fn flipped_ciphertext_char_fails_authentication() {
        let mut payload = encrypt("secret").unwrap();
        let flipped = if payload.ciphertext.starts_with('A') { "B" } else { "A" };
        payload.ciphertext.replace_range(0..1, flipped);
        assert!(matches!(
            decrypt(&payload),
            Err(CryptoError::IntegrityFailure)
        ));
    }
}
