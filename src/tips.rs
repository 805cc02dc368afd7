//! Tip payloads and their password-based encryption.
//!
//! Ciphertext format: `tips:v1:<base64(salt ‖ nonce ‖ ciphertext+tag)>`. The AES-256-GCM key
//! is derived with BLAKE3 from a random 16-byte salt and the password, so a wrong password
//! fails tag verification instead of yielding garbage.

use std::collections::BTreeMap;

use aes_gcm::Aes256Gcm;
use aes_gcm::aead::generic_array::GenericArray;
use aes_gcm::aead::{Aead, KeyInit};
use base64::Engine;
use chrono::{DateTime, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};

const PREFIX: &str = "tips:v1:";
const KDF_CONTEXT: &str = "afl-tipping tip payload v1 aes-256-gcm key";
const SALT_LEN: usize = 16;
const NONCE_LEN: usize = 12;

#[derive(Debug, thiserror::Error)]
pub enum TipError {
    #[error("invalid tip request: {reason}")]
    Invalid { reason: String },

    #[error("invalid ciphertext: {reason}")]
    InvalidCiphertext { reason: String },

    #[error("decryption failed: wrong password or tampered data")]
    Decryption,

    #[error("encryption failed: {reason}")]
    Encryption { reason: String },

    #[error("payload serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// One user's picks for a round: fixture id to the canonical name of the picked team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TipPayload {
    pub user_name: String,
    pub round: u32,
    pub year: i32,
    pub created_at: DateTime<Utc>,
    pub tips: BTreeMap<i64, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<i64>,
}

fn derive_key(salt: &[u8], password: &str) -> [u8; 32] {
    let mut material = Vec::with_capacity(salt.len() + password.len());
    material.extend_from_slice(salt);
    material.extend_from_slice(password.as_bytes());
    blake3::derive_key(KDF_CONTEXT, &material)
}

fn invalid(reason: &str) -> TipError {
    TipError::Invalid { reason: reason.to_string() }
}

/// Encrypt a payload under `password`. Every call uses a fresh salt and nonce.
pub fn encrypt(payload: &TipPayload, password: &str) -> Result<String, TipError> {
    if payload.user_name.trim().is_empty() {
        return Err(invalid("name is required"));
    }
    if password.is_empty() {
        return Err(invalid("password is required"));
    }
    if payload.tips.is_empty() {
        return Err(invalid("at least one tip must be selected"));
    }

    let plaintext = serde_json::to_vec(payload)?;

    let mut salt = [0u8; SALT_LEN];
    let mut nonce = [0u8; NONCE_LEN];
    let mut rng = rand::rng();
    rng.fill_bytes(&mut salt);
    rng.fill_bytes(&mut nonce);

    let key = derive_key(&salt, password);
    let cipher = Aes256Gcm::new(GenericArray::from_slice(&key));
    let ciphertext = cipher
        .encrypt(GenericArray::from_slice(&nonce), plaintext.as_ref())
        .map_err(|e| TipError::Encryption { reason: format!("AES-256-GCM encryption failed: {e}") })?;

    let mut blob = Vec::with_capacity(SALT_LEN + NONCE_LEN + ciphertext.len());
    blob.extend_from_slice(&salt);
    blob.extend_from_slice(&nonce);
    blob.extend_from_slice(&ciphertext);

    Ok(format!("{}{}", PREFIX, base64::engine::general_purpose::STANDARD.encode(blob)))
}

/// Decrypt a string produced by [`encrypt`].
pub fn decrypt(encrypted: &str, password: &str) -> Result<TipPayload, TipError> {
    if encrypted.trim().is_empty() || password.is_empty() {
        return Err(invalid("both encrypted string and password are required"));
    }

    let b64 = encrypted.trim().strip_prefix(PREFIX).ok_or_else(|| TipError::InvalidCiphertext {
        reason: format!("missing '{}' prefix", PREFIX),
    })?;
    let blob = base64::engine::general_purpose::STANDARD
        .decode(b64)
        .map_err(|e| TipError::InvalidCiphertext { reason: format!("invalid base64: {e}") })?;

    // GCM appends a 16-byte tag, so anything this short cannot be valid
    if blob.len() < SALT_LEN + NONCE_LEN + 16 {
        return Err(TipError::InvalidCiphertext { reason: format!("only {} bytes", blob.len()) });
    }

    let (salt, rest) = blob.split_at(SALT_LEN);
    let (nonce, ciphertext) = rest.split_at(NONCE_LEN);
    let key = derive_key(salt, password);
    let cipher = Aes256Gcm::new(GenericArray::from_slice(&key));
    let plaintext = cipher
        .decrypt(GenericArray::from_slice(nonce), ciphertext)
        .map_err(|_| TipError::Decryption)?;

    Ok(serde_json::from_slice(&plaintext)?)
}
