//! SQLite record store.
//!
//! One table of wire-form JSON bodies. The database holds ciphertext and
//! public parameters only, so the file itself is not encrypted.

mod row;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};

use super::traits::RecordStore;
use super::types::{RecordId, RecordSummary};
use super::decode_stored;
use crate::error::{LockboxError, Result};
use crate::record::EncryptedRecord;
use crate::wire::to_json;

use row::SummaryRow;

/// Store format written into the `meta` table.
pub const FORMAT_VERSION: &str = "1";

/// SQLite-backed record store.
pub struct SqliteStore {
    path: Option<PathBuf>,
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) a store file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `LockboxError::Storage` if the file cannot be opened or was
    /// written by an incompatible format version.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        Self::init(conn, Some(path.to_path_buf()))
    }

    /// Open a throwaway store that lives only as long as this value.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?, None)
    }

    /// Path of the backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn init(conn: Connection, path: Option<PathBuf>) -> Result<Self> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS meta (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS records (
                id TEXT PRIMARY KEY,
                kind TEXT NOT NULL,
                label TEXT NOT NULL,
                body_json TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )?;
        conn.execute(
            "INSERT OR IGNORE INTO meta (key, value) VALUES ('format_version', ?)",
            [FORMAT_VERSION],
        )?;

        let version: String = conn.query_row(
            "SELECT value FROM meta WHERE key = 'format_version'",
            [],
            |row| row.get(0),
        )?;
        if version != FORMAT_VERSION {
            return Err(LockboxError::Storage(format!(
                "Unsupported store format version {} (expected {})",
                version, FORMAT_VERSION
            )));
        }

        Ok(Self {
            path,
            conn: Mutex::new(conn),
        })
    }

    /// Lock the database connection, returning an error if the mutex is poisoned.
    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| LockboxError::Storage("SQLite connection poisoned".to_string()))
    }
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn store(&self, record: &EncryptedRecord) -> Result<RecordId> {
        let body = to_json(record)?;
        let id = RecordId::new();
        let now = Utc::now().to_rfc3339();

        let conn = self.lock_conn()?;
        conn.execute(
            r#"
            INSERT INTO records (id, kind, label, body_json, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
            (
                id.to_string(),
                record.kind().as_str(),
                &record.label,
                &body,
                &now,
                &now,
            ),
        )?;
        Ok(id)
    }

    async fn overwrite(&self, id: &RecordId, record: &EncryptedRecord) -> Result<()> {
        let body = to_json(record)?;
        let now = Utc::now().to_rfc3339();

        let conn = self.lock_conn()?;
        let updated = conn.execute(
            "UPDATE records SET kind = ?, label = ?, body_json = ?, updated_at = ? WHERE id = ?",
            (
                record.kind().as_str(),
                &record.label,
                &body,
                &now,
                id.to_string(),
            ),
        )?;
        if updated == 0 {
            return Err(LockboxError::NotFound(format!("Record {}", id)));
        }
        Ok(())
    }

    async fn fetch(&self, id: &RecordId) -> Result<EncryptedRecord> {
        let body: Option<String> = {
            let conn = self.lock_conn()?;
            conn.query_row(
                "SELECT body_json FROM records WHERE id = ?",
                [id.to_string()],
                |row| row.get(0),
            )
            .optional()?
        };
        let body = body.ok_or_else(|| LockboxError::NotFound(format!("Record {}", id)))?;
        decode_stored(id, &body)
    }

    async fn list(&self) -> Result<Vec<RecordSummary>> {
        let rows = {
            let conn = self.lock_conn()?;
            let mut stmt = conn.prepare(
                r#"
                SELECT id, kind, label, created_at, updated_at
                FROM records
                ORDER BY created_at DESC, id
                "#,
            )?;
            let rows = stmt
                .query_map([], SummaryRow::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            rows
        };
        rows.into_iter().map(RecordSummary::try_from).collect()
    }
}
