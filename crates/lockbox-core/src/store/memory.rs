//! In-process record store.
//!
//! Holds wire-form JSON bodies in a map, exactly what a remote store would
//! receive. Useful for tests and short-lived sessions.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::traits::RecordStore;
use super::types::{RecordId, RecordSummary};
use super::decode_stored;
use crate::error::{LockboxError, Result};
use crate::record::{EncryptedRecord, RecordKind};
use crate::wire::to_json;

struct StoredBody {
    kind: RecordKind,
    label: String,
    body: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Record store backed by a `HashMap`.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<RecordId, StoredBody>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw JSON body stored under `id`, as a remote operator would see it.
    pub fn raw_body(&self, id: &RecordId) -> Result<String> {
        let records = self.lock_records()?;
        records
            .get(id)
            .map(|stored| stored.body.clone())
            .ok_or_else(|| LockboxError::NotFound(format!("Record {}", id)))
    }

    /// Replace the raw JSON body stored under `id` without any checks.
    pub fn replace_raw_body(&self, id: &RecordId, body: String) -> Result<()> {
        let mut records = self.lock_records()?;
        let stored = records
            .get_mut(id)
            .ok_or_else(|| LockboxError::NotFound(format!("Record {}", id)))?;
        stored.body = body;
        Ok(())
    }

    fn lock_records(&self) -> Result<MutexGuard<'_, HashMap<RecordId, StoredBody>>> {
        self.records
            .lock()
            .map_err(|_| LockboxError::Storage("Memory store poisoned".to_string()))
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn store(&self, record: &EncryptedRecord) -> Result<RecordId> {
        let body = to_json(record)?;
        let now = Utc::now();
        let id = RecordId::new();
        self.lock_records()?.insert(
            id,
            StoredBody {
                kind: record.kind(),
                label: record.label.clone(),
                body,
                created_at: now,
                updated_at: now,
            },
        );
        Ok(id)
    }

    async fn overwrite(&self, id: &RecordId, record: &EncryptedRecord) -> Result<()> {
        let body = to_json(record)?;
        let mut records = self.lock_records()?;
        let stored = records
            .get_mut(id)
            .ok_or_else(|| LockboxError::NotFound(format!("Record {}", id)))?;
        stored.kind = record.kind();
        stored.label = record.label.clone();
        stored.body = body;
        stored.updated_at = Utc::now();
        Ok(())
    }

    async fn fetch(&self, id: &RecordId) -> Result<EncryptedRecord> {
        let body = self.raw_body(id)?;
        decode_stored(id, &body)
    }

    async fn list(&self) -> Result<Vec<RecordSummary>> {
        let records = self.lock_records()?;
        let mut summaries: Vec<RecordSummary> = records
            .iter()
            .map(|(id, stored)| RecordSummary {
                id: *id,
                kind: stored.kind,
                label: stored.label.clone(),
                created_at: stored.created_at,
                updated_at: stored.updated_at,
            })
            .collect();
        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(summaries)
    }
}
