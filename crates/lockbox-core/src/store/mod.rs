//! Opaque record storage.
//!
//! - **traits**: the `RecordStore` interface
//! - **memory**: in-process store
//! - **sqlite**: single-file SQLite store

pub mod memory;
pub mod sqlite;
pub mod traits;
pub mod types;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::RecordStore;
pub use types::{RecordId, RecordSummary};

use crate::error::{LockboxError, Result};
use crate::record::EncryptedRecord;
use crate::wire::from_json;

/// Decode a body read back from a store.
///
/// Only valid bodies are ever written, so one that no longer decodes was
/// damaged at rest.
pub(crate) fn decode_stored(id: &RecordId, body: &str) -> Result<EncryptedRecord> {
    from_json(body).map_err(|err| {
        tracing::warn!(record_id = %id, error = %err, "stored record body does not decode");
        LockboxError::CorruptedOrTampered
    })
}
