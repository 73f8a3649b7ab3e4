//! Payload codecs built on key derivation and the AEAD cipher.
//!
//! - **blob**: raw file bytes
//! - **name**: short text (original filename) under independent parameters
//! - **note**: title + content sealed together under one salt

pub mod blob;
pub mod name;
pub mod note;

pub use blob::{lock_blob, unlock_blob, SealedBlob, UnlockedBlob, DEFAULT_MIME_TYPE};
pub use name::{lock_name, unlock_name, SealedName};
pub use note::{lock_note, unlock_note, SealedNote};
