//! Protectable documents and the lock/unlock transactions over them.
//!
//! [`lock_document`] and [`unlock_document`] are synchronous and CPU-bound
//! (PBKDF2 + AES-GCM). Async callers should run them on a blocking thread;
//! [`crate::lifecycle::DocumentSession`] does so.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::codec::{lock_blob, lock_name, lock_note, unlock_blob, unlock_name, unlock_note};
use crate::crypto::{digest, validate_password, verify};
use crate::error::{LockboxError, Result};
use crate::record::{EncryptedRecord, RecordKind, SealedPayload};

/// A plaintext document that can be sealed into an [`EncryptedRecord`].
pub trait Protectable: Sized + Send + 'static {
    /// Record kind this document seals into.
    const KIND: RecordKind;

    /// True when there is nothing to protect.
    fn is_empty(&self) -> bool;

    /// Encrypt under fresh parameters. The verification digest is left unset.
    fn seal(&self, password: &str, label: &str) -> Result<EncryptedRecord>;

    /// Decrypt a record of kind [`Protectable::KIND`].
    ///
    /// Returns raw primitive errors (`AuthenticationFailed`, `InvalidInput`);
    /// [`unlock_document`] maps them to user-facing kinds.
    fn open(record: &EncryptedRecord, password: &str) -> Result<Self>;
}

/// A note: title and content.
#[derive(Debug, Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct NotePlaintext {
    pub title: String,
    pub content: String,
}

impl NotePlaintext {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

impl Protectable for NotePlaintext {
    const KIND: RecordKind = RecordKind::Note;

    fn is_empty(&self) -> bool {
        self.title.trim().is_empty() && self.content.trim().is_empty()
    }

    fn seal(&self, password: &str, label: &str) -> Result<EncryptedRecord> {
        let sealed = lock_note(&self.title, &self.content, password)?;
        Ok(EncryptedRecord {
            label: label.to_string(),
            mime_type: None,
            verification_digest: None,
            payload: SealedPayload::Note(sealed),
        })
    }

    fn open(record: &EncryptedRecord, password: &str) -> Result<Self> {
        match &record.payload {
            SealedPayload::Note(sealed) => {
                let (title, content) = unlock_note(sealed, password)?;
                Ok(Self { title, content })
            }
            SealedPayload::File { .. } => Err(kind_mismatch(Self::KIND, record.kind())),
        }
    }
}

/// A file: raw bytes, its original name and MIME type.
#[derive(Debug, Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct FilePlaintext {
    pub bytes: Vec<u8>,
    pub file_name: Option<String>,
    pub mime_type: String,
}

impl FilePlaintext {
    pub fn new(bytes: Vec<u8>, file_name: Option<String>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            file_name,
            mime_type: mime_type.into(),
        }
    }
}

impl Protectable for FilePlaintext {
    const KIND: RecordKind = RecordKind::File;

    fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    fn seal(&self, password: &str, label: &str) -> Result<EncryptedRecord> {
        let blob = lock_blob(&self.bytes, password)?;
        let name = self
            .file_name
            .as_deref()
            .map(|name| lock_name(name, password))
            .transpose()?;

        Ok(EncryptedRecord {
            label: label.to_string(),
            mime_type: Some(self.mime_type.clone()),
            verification_digest: None,
            payload: SealedPayload::File { blob, name },
        })
    }

    fn open(record: &EncryptedRecord, password: &str) -> Result<Self> {
        match &record.payload {
            SealedPayload::File { blob, name } => {
                let unlocked = unlock_blob(
                    &blob.cipher_bytes,
                    password,
                    &blob.salt,
                    &blob.nonce,
                    record.mime_type.as_deref(),
                )?;
                let file_name = name
                    .as_ref()
                    .map(|sealed| unlock_name(sealed, password))
                    .transpose()?;
                Ok(Self {
                    bytes: unlocked.bytes.to_vec(),
                    file_name,
                    mime_type: unlocked.mime_type,
                })
            }
            SealedPayload::Note(_) => Err(kind_mismatch(Self::KIND, record.kind())),
        }
    }
}

fn kind_mismatch(expected: RecordKind, found: RecordKind) -> LockboxError {
    LockboxError::InvalidInput(format!(
        "Record holds a {}, expected a {}",
        found, expected
    ))
}

/// Run a full lock transaction: policy checks, digest, fresh salt + nonce.
///
/// # Errors
///
/// Returns `LockboxError::InvalidInput` if the document is empty or the
/// password fails [`validate_password`]. Nothing is encrypted in that case.
pub fn lock_document<D: Protectable>(
    document: &D,
    password: &str,
    label: &str,
) -> Result<EncryptedRecord> {
    validate_password(password)?;
    if document.is_empty() {
        return Err(LockboxError::InvalidInput(
            "Nothing to lock: document is empty".to_string(),
        ));
    }

    let mut record = document.seal(password, label)?;
    record.verification_digest = Some(digest(password));
    Ok(record)
}

/// Unlock a record, checking the verification digest before decrypting.
///
/// # Errors
///
/// - `InvalidInput` if the password is empty or the record kind is not `D`
/// - `WrongPassword` if the digest does not match; no decrypt is attempted
/// - `CorruptedOrTampered` if the digest matched but the stored parameters
///   or ciphertext are damaged
///
/// A record without a digest cannot tell a wrong password from damaged
/// ciphertext; an authentication failure is reported as `WrongPassword`.
pub fn unlock_document<D: Protectable>(record: &EncryptedRecord, password: &str) -> Result<D> {
    if password.is_empty() {
        return Err(LockboxError::InvalidInput(
            "Password cannot be empty".to_string(),
        ));
    }
    if record.kind() != D::KIND {
        return Err(kind_mismatch(D::KIND, record.kind()));
    }

    match &record.verification_digest {
        Some(expected) => {
            if !verify(password, expected) {
                return Err(LockboxError::WrongPassword);
            }
            D::open(record, password).map_err(|err| match err {
                LockboxError::AuthenticationFailed | LockboxError::InvalidInput(_) => {
                    LockboxError::CorruptedOrTampered
                }
                other => other,
            })
        }
        None => D::open(record, password).map_err(|err| match err {
            LockboxError::AuthenticationFailed => LockboxError::WrongPassword,
            LockboxError::InvalidInput(_) => LockboxError::CorruptedOrTampered,
            other => other,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note() -> NotePlaintext {
        NotePlaintext::new("Meeting notes", "Discuss Q3 budget")
    }

    #[test]
    fn test_lock_sets_digest() {
        let record = lock_document(&note(), "correcthorse", "Work").unwrap();
        assert!(record.verification_digest.is_some());
        assert_eq!(record.label, "Work");
        assert_eq!(record.kind(), RecordKind::Note);
    }

    #[test]
    fn test_lock_rejects_short_password() {
        let result = lock_document(&note(), "abc", "Work");
        assert!(matches!(result, Err(LockboxError::InvalidInput(_))));
    }

    #[test]
    fn test_lock_rejects_empty_document() {
        let result = lock_document(&NotePlaintext::new("", "  "), "correcthorse", "Work");
        assert!(matches!(result, Err(LockboxError::InvalidInput(_))));

        let empty_file = FilePlaintext::new(Vec::new(), None, "text/plain");
        let result = lock_document(&empty_file, "correcthorse", "Empty");
        assert!(matches!(result, Err(LockboxError::InvalidInput(_))));
    }

    #[test]
    fn test_unlock_wrong_password() {
        let record = lock_document(&note(), "correcthorse", "Work").unwrap();
        let result = unlock_document::<NotePlaintext>(&record, "batterystaple");
        assert!(matches!(result, Err(LockboxError::WrongPassword)));
    }

    #[test]
    fn test_unlock_kind_mismatch() {
        let record = lock_document(&note(), "correcthorse", "Work").unwrap();
        let result = unlock_document::<FilePlaintext>(&record, "correcthorse");
        assert!(matches!(result, Err(LockboxError::InvalidInput(_))));
    }

    #[test]
    fn test_damaged_salt_after_verify_is_corruption() {
        let mut record = lock_document(&note(), "correcthorse", "Work").unwrap();
        if let SealedPayload::Note(sealed) = &mut record.payload {
            sealed.salt = "not-a-salt".to_string();
        }
        let result = unlock_document::<NotePlaintext>(&record, "correcthorse");
        assert!(matches!(result, Err(LockboxError::CorruptedOrTampered)));
    }

    #[test]
    fn test_file_round_trip_with_name() {
        let file = FilePlaintext::new(
            b"col1,col2\n1,2\n".to_vec(),
            Some("data.csv".to_string()),
            "text/csv",
        );
        let record = lock_document(&file, "correcthorse", "Dataset").unwrap();
        assert_eq!(record.mime_type.as_deref(), Some("text/csv"));

        let opened: FilePlaintext = unlock_document(&record, "correcthorse").unwrap();
        assert_eq!(opened, file);
    }

    #[test]
    fn test_file_name_uses_independent_parameters() {
        let file = FilePlaintext::new(b"abc".to_vec(), Some("a.txt".to_string()), "text/plain");
        let record = lock_document(&file, "correcthorse", "Doc").unwrap();
        match &record.payload {
            SealedPayload::File {
                blob,
                name: Some(name),
            } => {
                assert_ne!(blob.salt, name.salt);
                assert_ne!(blob.nonce, name.nonce);
            }
            other => panic!("unexpected payload: {:?}", other),
        }
    }

    #[test]
    fn test_file_without_digest_reports_wrong_password() {
        let file = FilePlaintext::new(b"abc".to_vec(), None, "text/plain");
        let mut record = lock_document(&file, "correcthorse", "Doc").unwrap();
        record.verification_digest = None;

        let result = unlock_document::<FilePlaintext>(&record, "batterystaple");
        assert!(matches!(result, Err(LockboxError::WrongPassword)));

        let opened: FilePlaintext = unlock_document(&record, "correcthorse").unwrap();
        assert_eq!(opened.bytes, b"abc");
    }
}
