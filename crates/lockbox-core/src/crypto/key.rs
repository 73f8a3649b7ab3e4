//! Key derivation using PBKDF2-HMAC-SHA256.
//!
//! This module stretches a password and a per-record salt into the 256-bit
//! key used by the AEAD cipher. The work factor is fixed; changing it would
//! make every existing record undecryptable.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::ZeroizeOnDrop;

use super::params::Salt;
use crate::error::Result;

/// PBKDF2 iteration count.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Length of derived key in bytes (32 bytes = 256 bits for AES-256-GCM).
pub const KEY_LENGTH: usize = 32;

/// A symmetric key derived from a password.
///
/// Key material is zeroized from memory when dropped.
#[derive(Clone, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LENGTH],
}

impl DerivedKey {
    pub(crate) fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self { key: bytes }
    }

    /// Get a reference to the raw key bytes.
    ///
    /// # Security
    ///
    /// Avoid storing or logging this value. Use only for immediate encryption operations.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derive a key from a password and a hex-encoded salt.
///
/// Same password + salt always produces the same key. There is no
/// wrong-password detection here; a wrong password simply yields a
/// different key.
///
/// # Errors
///
/// Returns `LockboxError::InvalidInput` if the salt is not 16 bytes of hex.
///
/// # Examples
///
/// ```
/// use lockbox_core::crypto::derive_key;
///
/// let salt = "000102030405060708090a0b0c0d0e0f";
/// let key = derive_key("correcthorse", salt).unwrap();
/// assert_eq!(key.as_bytes().len(), 32);
/// ```
pub fn derive_key(password: &str, salt_hex: &str) -> Result<DerivedKey> {
    let salt = Salt::from_hex(salt_hex)?;
    Ok(derive_key_with_salt(password, &salt))
}

/// Derive a key from a password and an already parsed salt.
pub fn derive_key_with_salt(password: &str, salt: &Salt) -> DerivedKey {
    let mut key_bytes = [0u8; KEY_LENGTH];
    pbkdf2_hmac::<Sha256>(
        password.as_bytes(),
        salt.as_bytes(),
        PBKDF2_ITERATIONS,
        &mut key_bytes,
    );
    let key = DerivedKey::from_bytes(key_bytes);
    zeroize::Zeroize::zeroize(&mut key_bytes);
    key
}
