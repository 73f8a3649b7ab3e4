//! AES-256-GCM authenticated encryption.
//!
//! Output format: `ciphertext || tag (16 bytes)`. The nonce is not part of
//! the output; callers transport it separately as hex.
//!
//! Decryption fails closed. A wrong key, a truncated buffer and a flipped
//! bit all surface as the same `AuthenticationFailed` error and no partial
//! plaintext is ever returned.

use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::Aes256Gcm;
use zeroize::Zeroizing;

use super::key::DerivedKey;
use super::params::Nonce;
use crate::error::{LockboxError, Result};

/// AES-GCM authentication tag length in bytes.
pub const TAG_LENGTH: usize = 16;

/// AES-256-GCM bound to one derived key.
pub struct AuthenticatedCipher {
    cipher: Aes256Gcm,
}

impl AuthenticatedCipher {
    pub fn new(key: &DerivedKey) -> Result<Self> {
        let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
            .map_err(|e| LockboxError::Crypto(format!("Invalid key: {}", e)))?;
        Ok(Self { cipher })
    }

    /// Encrypt `plaintext`, authenticating `aad` alongside it.
    pub fn encrypt(&self, nonce: &Nonce, plaintext: &[u8], aad: &[u8]) -> Result<Vec<u8>> {
        self.cipher
            .encrypt(
                aes_gcm::Nonce::from_slice(nonce.as_bytes()),
                Payload {
                    msg: plaintext,
                    aad,
                },
            )
            .map_err(|_| LockboxError::Crypto("AEAD encryption failed".to_string()))
    }

    /// Decrypt `cipher_bytes` produced by [`AuthenticatedCipher::encrypt`].
    ///
    /// # Errors
    ///
    /// Returns `LockboxError::AuthenticationFailed` on any tag mismatch,
    /// including truncated input and wrong keys.
    pub fn decrypt(
        &self,
        nonce: &Nonce,
        cipher_bytes: &[u8],
        aad: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>> {
        if cipher_bytes.len() < TAG_LENGTH {
            return Err(LockboxError::AuthenticationFailed);
        }
        let plaintext = self
            .cipher
            .decrypt(
                aes_gcm::Nonce::from_slice(nonce.as_bytes()),
                Payload {
                    msg: cipher_bytes,
                    aad,
                },
            )
            .map_err(|_| LockboxError::AuthenticationFailed)?;
        Ok(Zeroizing::new(plaintext))
    }
}

/// Encrypt with no associated data.
pub fn encrypt(key: &DerivedKey, nonce: &Nonce, plaintext: &[u8]) -> Result<Vec<u8>> {
    AuthenticatedCipher::new(key)?.encrypt(nonce, plaintext, &[])
}

/// Decrypt with no associated data.
pub fn decrypt(key: &DerivedKey, nonce: &Nonce, cipher_bytes: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    AuthenticatedCipher::new(key)?.decrypt(nonce, cipher_bytes, &[])
}
