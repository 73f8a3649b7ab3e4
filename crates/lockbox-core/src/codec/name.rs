//! Name payloads: short text such as an original filename.
//!
//! A name is always sealed under its own salt and nonce, never the ones of
//! the blob it belongs to, so each can be decrypted on its own. Ciphertext
//! is carried as hex because names move through text-only channels.

use crate::crypto::{decrypt, derive_key_with_salt, encrypt, Nonce, Salt};
use crate::error::{LockboxError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedName {
    pub cipher_hex: String,
    pub salt: String,
    pub nonce: String,
}

pub fn lock_name(name: &str, password: &str) -> Result<SealedName> {
    let salt = Salt::generate()?;
    let nonce = Nonce::generate()?;
    let key = derive_key_with_salt(password, &salt);
    let cipher_bytes = encrypt(&key, &nonce, name.as_bytes())?;

    Ok(SealedName {
        cipher_hex: hex::encode(cipher_bytes),
        salt: salt.to_hex(),
        nonce: nonce.to_hex(),
    })
}

pub fn unlock_name(sealed: &SealedName, password: &str) -> Result<String> {
    let cipher_bytes = hex::decode(sealed.cipher_hex.trim()).map_err(|_| {
        LockboxError::InvalidInput("Encrypted file name is not valid hex".to_string())
    })?;
    let salt = Salt::from_hex(&sealed.salt)?;
    let nonce = Nonce::from_hex(&sealed.nonce)?;
    let key = derive_key_with_salt(password, &salt);
    let plain = decrypt(&key, &nonce, &cipher_bytes)?;

    String::from_utf8(plain.to_vec())
        .map_err(|_| LockboxError::InvalidInput("File name is not valid UTF-8".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trip() {
        let sealed = lock_name("Q3 budget (final).xlsx", "correcthorse").unwrap();
        assert!(!sealed.cipher_hex.contains("budget"));
        let name = unlock_name(&sealed, "correcthorse").unwrap();
        assert_eq!(name, "Q3 budget (final).xlsx");
    }

    #[test]
    fn test_name_hex_is_lowercase() {
        let sealed = lock_name("report.csv", "correcthorse").unwrap();
        assert_eq!(sealed.cipher_hex, sealed.cipher_hex.to_lowercase());
        assert!(hex::decode(&sealed.cipher_hex).is_ok());
    }

    #[test]
    fn test_unicode_name() {
        let sealed = lock_name("résumé-日本.pdf", "correcthorse").unwrap();
        assert_eq!(unlock_name(&sealed, "correcthorse").unwrap(), "résumé-日本.pdf");
    }

    #[test]
    fn test_malformed_cipher_hex() {
        let mut sealed = lock_name("report.csv", "correcthorse").unwrap();
        sealed.cipher_hex = "not hex".to_string();
        let result = unlock_name(&sealed, "correcthorse");
        assert!(matches!(result, Err(LockboxError::InvalidInput(_))));
    }

    #[test]
    fn test_wrong_password() {
        let sealed = lock_name("report.csv", "correcthorse").unwrap();
        let result = unlock_name(&sealed, "incorrect");
        assert!(matches!(result, Err(LockboxError::AuthenticationFailed)));
    }
}
