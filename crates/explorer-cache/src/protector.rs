//! Symmetric protection of cached secrets.
//!
//! Uses AES-256-GCM with a random 96-bit nonce per secret. The protected
//! form is `nonce || ciphertext`.

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fmt;

use explorer_core::{AppError, AppResult};

/// Size of the protection key in bytes.
pub const KEY_SIZE: usize = 32;

/// Size of the AES-GCM nonce in bytes.
pub const NONCE_SIZE: usize = 12;

/// Protects and unprotects secrets with a process-held key.
#[derive(Clone)]
pub struct SecretProtector {
    cipher: Aes256Gcm,
}

impl SecretProtector {
    /// Create a protector from raw key bytes.
    pub fn new(key: &[u8]) -> AppResult<Self> {
        if key.len() != KEY_SIZE {
            return Err(AppError::configuration(format!(
                "Protection key must be {KEY_SIZE} bytes, got {}",
                key.len()
            )));
        }
        let cipher = Aes256Gcm::new_from_slice(key)
            .map_err(|e| AppError::configuration(format!("Invalid protection key: {e}")))?;
        Ok(Self { cipher })
    }

    /// Create a protector with a fresh random key. Secrets protected by it
    /// cannot be recovered after the process exits.
    pub fn ephemeral() -> Self {
        let key = Aes256Gcm::generate_key(OsRng);
        Self {
            cipher: Aes256Gcm::new(&key),
        }
    }

    /// Create a protector from an optional base64 key, falling back to an
    /// ephemeral key.
    pub fn from_config(key: Option<&str>) -> AppResult<Self> {
        match key {
            Some(encoded) if !encoded.is_empty() => {
                let bytes = STANDARD.decode(encoded).map_err(|e| {
                    AppError::with_source(
                        explorer_core::error::ErrorKind::Configuration,
                        "Protection key is not valid base64",
                        e,
                    )
                })?;
                Self::new(&bytes)
            }
            _ => Ok(Self::ephemeral()),
        }
    }

    /// Protect a secret.
    pub fn protect(&self, plaintext: &str) -> AppResult<Vec<u8>> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|e| AppError::cryptography(format!("Secret protection failed: {e}")))?;

        let mut protected = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        protected.extend_from_slice(nonce.as_slice());
        protected.extend_from_slice(&ciphertext);
        Ok(protected)
    }

    /// Recover a secret protected by [`protect`](Self::protect).
    pub fn unprotect(&self, protected: &[u8]) -> AppResult<String> {
        if protected.len() < NONCE_SIZE {
            return Err(AppError::cryptography("Protected secret is truncated"));
        }
        let (nonce, ciphertext) = protected.split_at(NONCE_SIZE);
        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|e| AppError::cryptography(format!("Secret unprotection failed: {e}")))?;
        String::from_utf8(plaintext)
            .map_err(|e| AppError::cryptography(format!("Secret is not valid UTF-8: {e}")))
    }
}

impl fmt::Debug for SecretProtector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretProtector").finish_non_exhaustive()
    }
}
