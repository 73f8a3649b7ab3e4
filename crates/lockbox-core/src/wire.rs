//! JSON wire form of [`EncryptedRecord`].
//!
//! Binary ciphertext travels as base64 inside the JSON body, never as raw
//! response bytes, and metadata (salt, iv, label) always travels in the same
//! body as the ciphertext. Salts, nonces, digests and text ciphertexts are
//! lowercase hex.
//!
//! File record:
//!
//! ```json
//! {
//!   "kind": "file",
//!   "cipherBlobBase64": "<base64>",
//!   "salt": "<32 hex chars>",
//!   "iv": "<24 hex chars>",
//!   "label": "Quarterly report",
//!   "encryptedFileName": "<hex>",
//!   "encryptedFileNameSalt": "<hex>",
//!   "encryptedFileNameIv": "<hex>",
//!   "mimeType": "application/pdf",
//!   "passwordHash": "<64 hex chars>"
//! }
//! ```
//!
//! Note record: `title` and `content` carry hex ciphertext, plus
//! `passwordHash`, `passwordSalt` and `iv` shared by both fields.
//!
//! The `kind` tag is always written but not required on read.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::codec::{SealedBlob, SealedName, SealedNote};
use crate::crypto::VerificationDigest;
use crate::error::{LockboxError, Result};
use crate::record::{EncryptedRecord, SealedPayload};

/// A record as exchanged with the store.
///
/// Written with a `kind` tag. On read the tag is optional: an untagged body
/// is a file if it carries `cipherBlobBase64` and a note if it carries
/// `title`, `content` and `passwordSalt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum WireRecord {
    File(FileRecordWire),
    Note(NoteRecordWire),
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum TaggedBody {
    File(FileRecordWire),
    Note(NoteRecordWire),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireBody {
    Tagged(TaggedBody),
    File(FileRecordWire),
    Note(NoteRecordWire),
}

impl<'de> Deserialize<'de> for WireRecord {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let body = WireBody::deserialize(deserializer).map_err(|_| {
            <D::Error as de::Error>::custom("body is neither a file record nor a note record")
        })?;
        Ok(match body {
            WireBody::Tagged(TaggedBody::File(file)) | WireBody::File(file) => {
                WireRecord::File(file)
            }
            WireBody::Tagged(TaggedBody::Note(note)) | WireBody::Note(note) => {
                WireRecord::Note(note)
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecordWire {
    pub cipher_blob_base64: String,
    pub salt: String,
    pub iv: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encrypted_file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encrypted_file_name_salt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encrypted_file_name_iv: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRecordWire {
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    pub password_salt: String,
    pub iv: String,
    #[serde(default)]
    pub label: String,
}

impl From<&EncryptedRecord> for WireRecord {
    fn from(record: &EncryptedRecord) -> Self {
        let password_hash = record.verification_digest.as_ref().map(|d| d.to_hex());

        match &record.payload {
            SealedPayload::File { blob, name } => WireRecord::File(FileRecordWire {
                cipher_blob_base64: STANDARD.encode(&blob.cipher_bytes),
                salt: blob.salt.clone(),
                iv: blob.nonce.clone(),
                label: record.label.clone(),
                encrypted_file_name: name.as_ref().map(|n| n.cipher_hex.clone()),
                encrypted_file_name_salt: name.as_ref().map(|n| n.salt.clone()),
                encrypted_file_name_iv: name.as_ref().map(|n| n.nonce.clone()),
                mime_type: record.mime_type.clone(),
                password_hash,
            }),
            SealedPayload::Note(note) => WireRecord::Note(NoteRecordWire {
                title: note.title_hex.clone(),
                content: note.content_hex.clone(),
                password_hash,
                password_salt: note.salt.clone(),
                iv: note.nonce.clone(),
                label: record.label.clone(),
            }),
        }
    }
}

impl TryFrom<WireRecord> for EncryptedRecord {
    type Error = LockboxError;

    fn try_from(wire: WireRecord) -> Result<Self> {
        match wire {
            WireRecord::File(file) => {
                let cipher_bytes = STANDARD.decode(file.cipher_blob_base64.trim()).map_err(|_| {
                    LockboxError::InvalidInput("cipherBlobBase64 is not valid base64".to_string())
                })?;
                let name = match (
                    file.encrypted_file_name,
                    file.encrypted_file_name_salt,
                    file.encrypted_file_name_iv,
                ) {
                    (Some(cipher_hex), Some(salt), Some(nonce)) => Some(SealedName {
                        cipher_hex,
                        salt,
                        nonce,
                    }),
                    (None, None, None) => None,
                    _ => {
                        return Err(LockboxError::InvalidInput(
                            "encryptedFileName requires its own salt and iv".to_string(),
                        ))
                    }
                };
                let verification_digest = file
                    .password_hash
                    .as_deref()
                    .map(VerificationDigest::from_hex)
                    .transpose()?;

                Ok(EncryptedRecord {
                    label: file.label,
                    mime_type: file.mime_type,
                    verification_digest,
                    payload: SealedPayload::File {
                        blob: SealedBlob {
                            cipher_bytes,
                            salt: file.salt,
                            nonce: file.iv,
                        },
                        name,
                    },
                })
            }
            WireRecord::Note(note) => Ok(EncryptedRecord {
                label: note.label,
                mime_type: None,
                verification_digest: note
                    .password_hash
                    .as_deref()
                    .map(VerificationDigest::from_hex)
                    .transpose()?,
                payload: SealedPayload::Note(SealedNote {
                    title_hex: note.title,
                    content_hex: note.content,
                    salt: note.password_salt,
                    nonce: note.iv,
                }),
            }),
        }
    }
}

/// Serialize a record to its JSON wire form.
pub fn to_json(record: &EncryptedRecord) -> Result<String> {
    Ok(serde_json::to_string(&WireRecord::from(record))?)
}

/// Parse a record from its JSON wire form.
pub fn from_json(body: &str) -> Result<EncryptedRecord> {
    let wire: WireRecord = serde_json::from_str(body)?;
    EncryptedRecord::try_from(wire)
}

/// A dataset that was parsed client-side and uploaded in the clear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<serde_json::Value>>,
}

/// An upload body, resolved once at the boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadKind {
    Encrypted(EncryptedRecord),
    Parsed(ParsedData),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum UploadBody {
    Encrypted(WireRecord),
    Parsed(ParsedData),
}

impl UploadKind {
    /// Classify a JSON upload body.
    ///
    /// A body carrying a `kind` tag is an encrypted record; anything else
    /// must be a parsed dataset.
    pub fn from_json(body: &str) -> Result<Self> {
        let parsed: UploadBody = serde_json::from_str(body).map_err(|_| {
            LockboxError::InvalidInput(
                "Upload is neither an encrypted record nor a parsed dataset".to_string(),
            )
        })?;
        match parsed {
            UploadBody::Encrypted(wire) => Ok(UploadKind::Encrypted(wire.try_into()?)),
            UploadBody::Parsed(data) => Ok(UploadKind::Parsed(data)),
        }
    }

    pub fn is_encrypted(&self) -> bool {
        matches!(self, UploadKind::Encrypted(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::digest;
    use crate::record::RecordKind;

    fn file_record(with_name: bool) -> EncryptedRecord {
        EncryptedRecord {
            label: "Quarterly report".to_string(),
            mime_type: Some("application/pdf".to_string()),
            verification_digest: Some(digest("correcthorse")),
            payload: SealedPayload::File {
                blob: SealedBlob {
                    cipher_bytes: vec![0, 1, 2, 250, 251, 252],
                    salt: "00".repeat(16),
                    nonce: "11".repeat(12),
                },
                name: with_name.then(|| SealedName {
                    cipher_hex: "abcdef".to_string(),
                    salt: "22".repeat(16),
                    nonce: "33".repeat(12),
                }),
            },
        }
    }

    #[test]
    fn test_file_wire_field_names() {
        let json = to_json(&file_record(true)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["kind"], "file");
        assert_eq!(value["cipherBlobBase64"], "AAEC+vv8");
        assert_eq!(value["salt"], "00".repeat(16));
        assert_eq!(value["iv"], "11".repeat(12));
        assert_eq!(value["encryptedFileName"], "abcdef");
        assert_eq!(value["encryptedFileNameSalt"], "22".repeat(16));
        assert_eq!(value["encryptedFileNameIv"], "33".repeat(12));
        assert_eq!(value["mimeType"], "application/pdf");
        assert_eq!(value["passwordHash"].as_str().unwrap().len(), 64);
    }

    #[test]
    fn test_file_without_name_omits_fields() {
        let json = to_json(&file_record(false)).unwrap();
        assert!(!json.contains("encryptedFileName"));
        assert_eq!(from_json(&json).unwrap(), file_record(false));
    }

    #[test]
    fn test_note_wire_field_names() {
        let record = EncryptedRecord {
            label: "Work".to_string(),
            mime_type: None,
            verification_digest: Some(digest("correcthorse")),
            payload: SealedPayload::Note(SealedNote {
                title_hex: "aa".repeat(8),
                content_hex: "bb".repeat(8),
                salt: "01".repeat(16),
                nonce: "02".repeat(12),
            }),
        };
        let value: serde_json::Value = serde_json::from_str(&to_json(&record).unwrap()).unwrap();
        assert_eq!(value["kind"], "note");
        assert_eq!(value["title"], "aa".repeat(8));
        assert_eq!(value["content"], "bb".repeat(8));
        assert_eq!(value["passwordSalt"], "01".repeat(16));
        assert_eq!(value["iv"], "02".repeat(12));
        assert_eq!(value["passwordHash"], digest("correcthorse").to_hex());
    }

    #[test]
    fn test_bad_base64_rejected() {
        let json = r#"{"kind":"file","cipherBlobBase64":"***","salt":"","iv":"","label":"x"}"#;
        assert!(matches!(from_json(json), Err(LockboxError::InvalidInput(_))));
    }

    #[test]
    fn test_partial_file_name_rejected() {
        let json = r#"{"kind":"file","cipherBlobBase64":"AAEC","salt":"","iv":"","label":"x",
            "encryptedFileName":"abcd"}"#;
        assert!(matches!(from_json(json), Err(LockboxError::InvalidInput(_))));
    }

    #[test]
    fn test_malformed_salt_survives_decoding() {
        // Salt and iv are checked on unlock, after the password digest.
        let json = r#"{"kind":"file","cipherBlobBase64":"AAEC","salt":"zz","iv":"zz","label":"x"}"#;
        let record = from_json(json).unwrap();
        assert_eq!(record.salt(), "zz");
        assert!(record.verification_digest.is_none());
    }

    #[test]
    fn test_upload_kind_encrypted() {
        let json = to_json(&file_record(true)).unwrap();
        let upload = UploadKind::from_json(&json).unwrap();
        assert!(upload.is_encrypted());
        assert_eq!(upload, UploadKind::Encrypted(file_record(true)));
    }

    const UNTAGGED_FILE: &str = r#"{
        "cipherBlobBase64": "AAEC+vv8",
        "salt": "00000000000000000000000000000000",
        "iv": "111111111111111111111111",
        "label": "Quarterly report",
        "encryptedFileName": "abcdef",
        "encryptedFileNameSalt": "22222222222222222222222222222222",
        "encryptedFileNameIv": "333333333333333333333333",
        "mimeType": "application/pdf"
    }"#;

    #[test]
    fn test_untagged_file_body_parses() {
        let record = from_json(UNTAGGED_FILE).unwrap();
        let mut expected = file_record(true);
        expected.verification_digest = None;
        assert_eq!(record, expected);
    }

    #[test]
    fn test_untagged_note_body_parses() {
        let hash = digest("correcthorse").to_hex();
        let json = format!(
            r#"{{"title":"{}","content":"{}","passwordHash":"{}","passwordSalt":"{}","iv":"{}"}}"#,
            "aa".repeat(8),
            "bb".repeat(8),
            hash,
            "01".repeat(16),
            "02".repeat(12)
        );
        let record = from_json(&json).unwrap();
        assert_eq!(record.kind(), RecordKind::Note);
        assert_eq!(record.salt(), "01".repeat(16));
        assert_eq!(record.verification_digest, Some(digest("correcthorse")));
        assert_eq!(record.label, "");
    }

    #[test]
    fn test_upload_kind_untagged_encrypted() {
        let upload = UploadKind::from_json(UNTAGGED_FILE).unwrap();
        assert!(upload.is_encrypted());
        match upload {
            UploadKind::Encrypted(record) => assert_eq!(record.kind(), RecordKind::File),
            other => panic!("expected encrypted upload, got {:?}", other),
        }
    }

    #[test]
    fn test_note_without_digest_round_trips() {
        let record = EncryptedRecord {
            label: "Draft".to_string(),
            mime_type: None,
            verification_digest: None,
            payload: SealedPayload::Note(SealedNote {
                title_hex: "aa".repeat(8),
                content_hex: "bb".repeat(8),
                salt: "01".repeat(16),
                nonce: "02".repeat(12),
            }),
        };
        let json = to_json(&record).unwrap();
        assert!(!json.contains("passwordHash"));
        assert_eq!(from_json(&json).unwrap(), record);
    }

    #[test]
    fn test_upload_kind_parsed() {
        let json = r#"{"fileName":"sales.csv","columns":["region","total"],
            "rows":[["north",10],["south",12.5]]}"#;
        match UploadKind::from_json(json).unwrap() {
            UploadKind::Parsed(data) => {
                assert_eq!(data.file_name.as_deref(), Some("sales.csv"));
                assert_eq!(data.columns, vec!["region", "total"]);
                assert_eq!(data.rows.len(), 2);
            }
            other => panic!("expected parsed upload, got {:?}", other),
        }
    }

    #[test]
    fn test_upload_kind_rejects_unknown_shape() {
        let result = UploadKind::from_json(r#"{"hello":"world"}"#);
        assert!(matches!(result, Err(LockboxError::InvalidInput(_))));
    }
}
