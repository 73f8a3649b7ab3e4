//! Record store trait definition.
//!
//! The `RecordStore` trait is the only way this crate reaches persistence.
//! A store holds opaque encrypted records keyed by [`RecordId`]; it never
//! sees a password, a key or plaintext, and it cannot decrypt anything.

use std::sync::Arc;

use async_trait::async_trait;

use super::types::{RecordId, RecordSummary};
use crate::error::Result;
use crate::record::EncryptedRecord;

/// Opaque store for encrypted records.
///
/// Implementations must ensure:
/// - A record is written as a whole or not at all
/// - `overwrite` keeps the record id stable
/// - Failures surface as `LockboxError::Storage` or `LockboxError::NotFound`
///
/// Writes are last-write-wins. There is no version check, so two sessions
/// saving the same record will silently replace each other's work.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persist a new record.
    ///
    /// # Returns
    ///
    /// Returns the id assigned to the record.
    async fn store(&self, record: &EncryptedRecord) -> Result<RecordId>;

    /// Replace the record stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns `LockboxError::NotFound` if nothing is stored under `id`.
    async fn overwrite(&self, id: &RecordId, record: &EncryptedRecord) -> Result<()>;

    /// Fetch the record stored under `id`.
    ///
    /// # Errors
    ///
    /// - `NotFound` if nothing is stored under `id`
    /// - `CorruptedOrTampered` if the stored body no longer decodes
    /// - `Storage` if the store itself fails
    async fn fetch(&self, id: &RecordId) -> Result<EncryptedRecord>;

    /// List all records, newest first.
    async fn list(&self) -> Result<Vec<RecordSummary>>;
}

#[async_trait]
impl<S: RecordStore + ?Sized> RecordStore for Arc<S> {
    async fn store(&self, record: &EncryptedRecord) -> Result<RecordId> {
        (**self).store(record).await
    }

    async fn overwrite(&self, id: &RecordId, record: &EncryptedRecord) -> Result<()> {
        (**self).overwrite(id, record).await
    }

    async fn fetch(&self, id: &RecordId) -> Result<EncryptedRecord> {
        (**self).fetch(id).await
    }

    async fn list(&self) -> Result<Vec<RecordSummary>> {
        (**self).list().await
    }
}
