//! # Lockbox Core
//!
//! Core library for Lockbox - client-side, password-based protection for
//! files and notes kept in an untrusted record store.
//!
//! Plaintext, passwords and keys never leave this crate. The store only ever
//! receives ciphertext plus the public parameters needed to decrypt it
//! later. A lost password cannot be recovered.
//!
//! ## Architecture
//!
//! - **crypto**: key derivation, AEAD cipher, password verifier and policy
//! - **codec**: blob, name and note payload encodings
//! - **document**: protectable documents and lock/unlock transactions
//! - **record**: the persisted `EncryptedRecord`
//! - **wire**: JSON wire form and upload classification
//! - **store**: opaque record stores (memory, SQLite)
//! - **lifecycle**: per-document lock state machine

pub mod codec;
pub mod crypto;
pub mod document;
pub mod error;
pub mod lifecycle;
pub mod record;
pub mod store;
pub mod wire;

pub use document::{lock_document, unlock_document, FilePlaintext, NotePlaintext, Protectable};
pub use error::{LockboxError, Result};
pub use lifecycle::{DocumentSession, LockState};
pub use record::{EncryptedRecord, RecordKind, SealedPayload};
pub use store::{MemoryStore, RecordId, RecordStore, RecordSummary, SqliteStore};
pub use wire::{ParsedData, UploadKind, WireRecord};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
