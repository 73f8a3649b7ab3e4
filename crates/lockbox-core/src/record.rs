//! The persisted entity: ciphertext plus the public parameters needed to
//! decrypt it later. Never the key, never plaintext.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::codec::{SealedBlob, SealedName, SealedNote};
use crate::crypto::VerificationDigest;
use crate::error::{LockboxError, Result};

/// What kind of document a record protects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    File,
    Note,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::File => "file",
            RecordKind::Note => "note",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = LockboxError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "file" => Ok(RecordKind::File),
            "note" => Ok(RecordKind::Note),
            other => Err(LockboxError::InvalidInput(format!(
                "Unknown record kind: {}",
                other
            ))),
        }
    }
}

/// Sealed payload(s) of one record.
///
/// Every variant is produced by a single encryption transaction; a record is
/// replaced as a whole, never patched field by field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SealedPayload {
    /// File blob, plus the original filename under its own salt and nonce.
    File {
        blob: SealedBlob,
        name: Option<SealedName>,
    },
    /// Note content and title sharing one salt.
    Note(SealedNote),
}

/// An encrypted document as handed to the record store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedRecord {
    /// Plaintext display label. Describes the record without revealing it.
    pub label: String,
    pub mime_type: Option<String>,
    /// Password pre-check digest. Absent on file records written without one.
    pub verification_digest: Option<VerificationDigest>,
    pub payload: SealedPayload,
}

impl EncryptedRecord {
    pub fn kind(&self) -> RecordKind {
        match self.payload {
            SealedPayload::File { .. } => RecordKind::File,
            SealedPayload::Note(_) => RecordKind::Note,
        }
    }

    /// Hex salt of the primary payload.
    pub fn salt(&self) -> &str {
        match &self.payload {
            SealedPayload::File { blob, .. } => &blob.salt,
            SealedPayload::Note(note) => &note.salt,
        }
    }

    /// Hex nonce of the primary payload.
    pub fn nonce(&self) -> &str {
        match &self.payload {
            SealedPayload::File { blob, .. } => &blob.nonce,
            SealedPayload::Note(note) => &note.nonce,
        }
    }

    /// Size in bytes of the primary ciphertext, tag included.
    pub fn cipher_len(&self) -> usize {
        match &self.payload {
            SealedPayload::File { blob, .. } => blob.cipher_bytes.len(),
            SealedPayload::Note(note) => note.content_hex.len() / 2,
        }
    }

    pub fn has_secondary(&self) -> bool {
        match &self.payload {
            SealedPayload::File { name, .. } => name.is_some(),
            SealedPayload::Note(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note_record() -> EncryptedRecord {
        EncryptedRecord {
            label: "Work".to_string(),
            mime_type: None,
            verification_digest: None,
            payload: SealedPayload::Note(SealedNote {
                title_hex: "aa".repeat(20),
                content_hex: "bb".repeat(30),
                salt: "01".repeat(16),
                nonce: "02".repeat(12),
            }),
        }
    }

    #[test]
    fn test_kind_round_trip() {
        for kind in [RecordKind::File, RecordKind::Note] {
            assert_eq!(kind.as_str().parse::<RecordKind>().unwrap(), kind);
        }
        assert!("dataset".parse::<RecordKind>().is_err());
    }

    #[test]
    fn test_accessors_follow_primary_payload() {
        let record = note_record();
        assert_eq!(record.kind(), RecordKind::Note);
        assert_eq!(record.salt(), "01".repeat(16));
        assert_eq!(record.nonce(), "02".repeat(12));
        assert_eq!(record.cipher_len(), 30);
        assert!(record.has_secondary());
    }

    #[test]
    fn test_file_without_name_has_no_secondary() {
        let record = EncryptedRecord {
            label: "Scan".to_string(),
            mime_type: Some("image/png".to_string()),
            verification_digest: None,
            payload: SealedPayload::File {
                blob: SealedBlob {
                    cipher_bytes: vec![0u8; 40],
                    salt: "03".repeat(16),
                    nonce: "04".repeat(12),
                },
                name: None,
            },
        };
        assert_eq!(record.kind(), RecordKind::File);
        assert!(!record.has_secondary());
        assert_eq!(record.cipher_len(), 40);
    }
}
