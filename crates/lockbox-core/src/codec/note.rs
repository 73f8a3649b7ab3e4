//! Note payloads: a title and content pair sealed as one unit.
//!
//! Both fields share one salt, hence one derived key, and one transported
//! nonce. Each field is encrypted under its own nonce derived from the
//! shared one (see [`Nonce::for_field`]) and binds its field name as
//! associated data, so no (key, nonce) pair ever covers two plaintexts and
//! the two ciphertexts cannot be swapped.

use crate::crypto::{derive_key_with_salt, AuthenticatedCipher, Nonce, Salt};
use crate::error::{LockboxError, Result};

const CONTENT_FIELD: u32 = 0;
const TITLE_FIELD: u32 = 1;

const CONTENT_AAD: &[u8] = b"content";
const TITLE_AAD: &[u8] = b"title";

/// Sealed title and content, both as hex ciphertext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedNote {
    pub title_hex: String,
    pub content_hex: String,
    pub salt: String,
    pub nonce: String,
}

pub fn lock_note(title: &str, content: &str, password: &str) -> Result<SealedNote> {
    let salt = Salt::generate()?;
    let nonce = Nonce::generate()?;
    let key = derive_key_with_salt(password, &salt);
    let cipher = AuthenticatedCipher::new(&key)?;

    let content_bytes = cipher.encrypt(
        &nonce.for_field(CONTENT_FIELD),
        content.as_bytes(),
        CONTENT_AAD,
    )?;
    let title_bytes =
        cipher.encrypt(&nonce.for_field(TITLE_FIELD), title.as_bytes(), TITLE_AAD)?;

    Ok(SealedNote {
        title_hex: hex::encode(title_bytes),
        content_hex: hex::encode(content_bytes),
        salt: salt.to_hex(),
        nonce: nonce.to_hex(),
    })
}

/// Reverse [`lock_note`], returning `(title, content)`.
pub fn unlock_note(sealed: &SealedNote, password: &str) -> Result<(String, String)> {
    let title_bytes = decode_field(&sealed.title_hex, "Title")?;
    let content_bytes = decode_field(&sealed.content_hex, "Content")?;
    let salt = Salt::from_hex(&sealed.salt)?;
    let nonce = Nonce::from_hex(&sealed.nonce)?;

    let key = derive_key_with_salt(password, &salt);
    let cipher = AuthenticatedCipher::new(&key)?;

    let content = cipher.decrypt(
        &nonce.for_field(CONTENT_FIELD),
        &content_bytes,
        CONTENT_AAD,
    )?;
    let title = cipher.decrypt(&nonce.for_field(TITLE_FIELD), &title_bytes, TITLE_AAD)?;

    Ok((into_text(&title)?, into_text(&content)?))
}

fn decode_field(value: &str, field: &str) -> Result<Vec<u8>> {
    hex::decode(value.trim())
        .map_err(|_| LockboxError::InvalidInput(format!("{} ciphertext is not valid hex", field)))
}

fn into_text(bytes: &[u8]) -> Result<String> {
    String::from_utf8(bytes.to_vec())
        .map_err(|_| LockboxError::InvalidInput("Note text is not valid UTF-8".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_round_trip() {
        let sealed = lock_note("Meeting notes", "Discuss Q3 budget", "correcthorse").unwrap();
        let (title, content) = unlock_note(&sealed, "correcthorse").unwrap();
        assert_eq!(title, "Meeting notes");
        assert_eq!(content, "Discuss Q3 budget");
    }

    #[test]
    fn test_ciphertexts_are_hex_and_hide_plaintext() {
        let sealed = lock_note("Meeting notes", "Discuss Q3 budget", "correcthorse").unwrap();
        assert!(!sealed.title_hex.is_empty());
        assert!(!sealed.content_hex.is_empty());
        assert_ne!(sealed.title_hex, hex::encode("Meeting notes"));
        assert_ne!(sealed.content_hex, hex::encode("Discuss Q3 budget"));
        assert_eq!(sealed.salt.len(), 32);
        assert_eq!(sealed.nonce.len(), 24);
    }

    #[test]
    fn test_identical_fields_produce_different_ciphertext() {
        // Same plaintext in both fields must not yield the same bytes
        let sealed = lock_note("same text", "same text", "correcthorse").unwrap();
        assert_ne!(sealed.title_hex, sealed.content_hex);
    }

    #[test]
    fn test_swapped_fields_are_rejected() {
        let mut sealed = lock_note("Meeting notes", "Discuss Q3 budget", "correcthorse").unwrap();
        std::mem::swap(&mut sealed.title_hex, &mut sealed.content_hex);
        let result = unlock_note(&sealed, "correcthorse");
        assert!(matches!(result, Err(LockboxError::AuthenticationFailed)));
    }

    #[test]
    fn test_empty_title_round_trip() {
        let sealed = lock_note("", "body only", "correcthorse").unwrap();
        let (title, content) = unlock_note(&sealed, "correcthorse").unwrap();
        assert!(title.is_empty());
        assert_eq!(content, "body only");
    }

    #[test]
    fn test_malformed_content_hex() {
        let mut sealed = lock_note("a", "b", "correcthorse").unwrap();
        sealed.content_hex.push('g');
        let result = unlock_note(&sealed, "correcthorse");
        assert!(matches!(result, Err(LockboxError::InvalidInput(_))));
    }
}
