//! Blob payloads: arbitrary file bytes.

use zeroize::Zeroizing;

use crate::crypto::{decrypt, derive_key_with_salt, encrypt, Nonce, Salt};
use crate::error::Result;

/// MIME type assumed when the caller does not know one.
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Output of one blob encryption transaction.
///
/// `salt` and `nonce` are the hex transport forms; they are parsed again on
/// unlock so that damaged metadata is caught after the password check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedBlob {
    pub cipher_bytes: Vec<u8>,
    pub salt: String,
    pub nonce: String,
}

/// Decrypted blob, typed back as its original MIME type.
#[derive(Debug)]
pub struct UnlockedBlob {
    pub bytes: Zeroizing<Vec<u8>>,
    pub mime_type: String,
}

/// Encrypt `bytes` under a fresh salt and nonce.
pub fn lock_blob(bytes: &[u8], password: &str) -> Result<SealedBlob> {
    let salt = Salt::generate()?;
    let nonce = Nonce::generate()?;
    let key = derive_key_with_salt(password, &salt);
    let cipher_bytes = encrypt(&key, &nonce, bytes)?;

    Ok(SealedBlob {
        cipher_bytes,
        salt: salt.to_hex(),
        nonce: nonce.to_hex(),
    })
}

/// Reverse [`lock_blob`].
///
/// # Errors
///
/// - `InvalidInput` if `salt` or `nonce` is not well-formed hex
/// - `AuthenticationFailed` on a wrong password or damaged ciphertext
pub fn unlock_blob(
    cipher_bytes: &[u8],
    password: &str,
    salt: &str,
    nonce: &str,
    mime_type: Option<&str>,
) -> Result<UnlockedBlob> {
    let salt = Salt::from_hex(salt)?;
    let nonce = Nonce::from_hex(nonce)?;
    let key = derive_key_with_salt(password, &salt);
    let bytes = decrypt(&key, &nonce, cipher_bytes)?;

    Ok(UnlockedBlob {
        bytes,
        mime_type: mime_type.unwrap_or(DEFAULT_MIME_TYPE).to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LockboxError;

    #[test]
    fn test_blob_round_trip() {
        let sealed = lock_blob(b"%PDF-1.7 binary \x00\x01\x02", "correcthorse").unwrap();
        let opened = unlock_blob(
            &sealed.cipher_bytes,
            "correcthorse",
            &sealed.salt,
            &sealed.nonce,
            Some("application/pdf"),
        )
        .unwrap();
        assert_eq!(opened.bytes.as_slice(), b"%PDF-1.7 binary \x00\x01\x02");
        assert_eq!(opened.mime_type, "application/pdf");
    }

    #[test]
    fn test_missing_mime_type_defaults() {
        let sealed = lock_blob(b"data", "correcthorse").unwrap();
        let opened = unlock_blob(
            &sealed.cipher_bytes,
            "correcthorse",
            &sealed.salt,
            &sealed.nonce,
            None,
        )
        .unwrap();
        assert_eq!(opened.mime_type, DEFAULT_MIME_TYPE);
    }

    #[test]
    fn test_each_lock_uses_fresh_parameters() {
        let a = lock_blob(b"same", "correcthorse").unwrap();
        let b = lock_blob(b"same", "correcthorse").unwrap();
        assert_ne!(a.salt, b.salt);
        assert_ne!(a.nonce, b.nonce);
        assert_ne!(a.cipher_bytes, b.cipher_bytes);
    }

    #[test]
    fn test_wrong_password_fails_authentication() {
        let sealed = lock_blob(b"data", "correcthorse").unwrap();
        let result = unlock_blob(
            &sealed.cipher_bytes,
            "batterystaple",
            &sealed.salt,
            &sealed.nonce,
            None,
        );
        assert!(matches!(result, Err(LockboxError::AuthenticationFailed)));
    }

    #[test]
    fn test_malformed_salt_is_invalid_input() {
        let sealed = lock_blob(b"data", "correcthorse").unwrap();
        let result = unlock_blob(&sealed.cipher_bytes, "correcthorse", "zz", &sealed.nonce, None);
        assert!(matches!(result, Err(LockboxError::InvalidInput(_))));
    }
}
