//! Lock lifecycle of one protectable document.
//!
//! ```text
//!   Unlocked ──lock(password, label)──▶ LockedOpaque ◀──close()── UnlockedInMemory
//!                                          │                          ▲     │
//!                                          └──────unlock(password)────┘     │
//!                                                                   save() ─┘
//! ```
//!
//! The password needed to re-encrypt on save lives only inside the
//! `UnlockedInMemory` variant and is dropped with it. All key derivation and
//! AEAD work runs on the blocking thread pool. Every transition takes
//! `&mut self`, so a session can never have two saves (or a save and an
//! unlock) in flight at once.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

use crate::document::{lock_document, unlock_document, Protectable};
use crate::error::{LockboxError, Result};
use crate::record::EncryptedRecord;
use crate::store::{RecordId, RecordStore};

/// Where a document is in its lifecycle.
pub enum LockState<D> {
    /// Never locked. Plaintext only, nothing persisted.
    Unlocked { plaintext: D },
    /// Persisted and opaque. Only the encrypted record is held.
    LockedOpaque { id: RecordId, record: EncryptedRecord },
    /// Decrypted for editing. `record` is the last persisted version.
    UnlockedInMemory {
        id: RecordId,
        plaintext: D,
        password: SecretString,
        record: EncryptedRecord,
    },
}

impl<D> LockState<D> {
    pub fn name(&self) -> &'static str {
        match self {
            LockState::Unlocked { .. } => "unlocked",
            LockState::LockedOpaque { .. } => "locked",
            LockState::UnlockedInMemory { .. } => "unlocked-in-memory",
        }
    }
}

impl<D> fmt::Debug for LockState<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockState::Unlocked { .. } => f.write_str("Unlocked"),
            LockState::LockedOpaque { id, .. } => {
                f.debug_struct("LockedOpaque").field("id", id).finish()
            }
            LockState::UnlockedInMemory { id, .. } => f
                .debug_struct("UnlockedInMemory")
                .field("id", id)
                .field("password", &"[REDACTED]")
                .finish(),
        }
    }
}

/// An editing session over one document and the store it lives in.
pub struct DocumentSession<D, S> {
    store: S,
    state: LockState<D>,
}

impl<D, S> DocumentSession<D, S>
where
    D: Protectable + Clone,
    S: RecordStore,
{
    /// Start a session over a new, never-locked document.
    pub fn new(store: S, plaintext: D) -> Self {
        Self {
            store,
            state: LockState::Unlocked { plaintext },
        }
    }

    /// Start a session over a record already in the store.
    ///
    /// # Errors
    ///
    /// Returns `LockboxError::NotFound`, `LockboxError::CorruptedOrTampered`
    /// or `LockboxError::Storage` from the store, and
    /// `LockboxError::InvalidInput` if the record is not a `D`.
    pub async fn open(store: S, id: RecordId) -> Result<Self> {
        let record = store.fetch(&id).await?;
        if record.kind() != D::KIND {
            return Err(LockboxError::InvalidInput(format!(
                "Record {} holds a {}, expected a {}",
                id,
                record.kind(),
                D::KIND
            )));
        }
        tracing::debug!(record_id = %id, kind = %D::KIND, "opened locked document");
        Ok(Self {
            store,
            state: LockState::LockedOpaque { id, record },
        })
    }

    pub fn state(&self) -> &LockState<D> {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Store id, once the document has been locked.
    pub fn id(&self) -> Option<RecordId> {
        match &self.state {
            LockState::Unlocked { .. } => None,
            LockState::LockedOpaque { id, .. } | LockState::UnlockedInMemory { id, .. } => {
                Some(*id)
            }
        }
    }

    /// Last persisted record, once the document has been locked.
    pub fn record(&self) -> Option<&EncryptedRecord> {
        match &self.state {
            LockState::Unlocked { .. } => None,
            LockState::LockedOpaque { record, .. }
            | LockState::UnlockedInMemory { record, .. } => Some(record),
        }
    }

    /// Plaintext, when the document is readable.
    pub fn plaintext(&self) -> Option<&D> {
        match &self.state {
            LockState::Unlocked { plaintext } | LockState::UnlockedInMemory { plaintext, .. } => {
                Some(plaintext)
            }
            LockState::LockedOpaque { .. } => None,
        }
    }

    /// Mutable plaintext for editing. Changes persist only on `save()`.
    ///
    /// # Errors
    ///
    /// Returns `LockboxError::InvalidState` while the document is locked.
    pub fn plaintext_mut(&mut self) -> Result<&mut D> {
        match &mut self.state {
            LockState::Unlocked { plaintext } | LockState::UnlockedInMemory { plaintext, .. } => {
                Ok(plaintext)
            }
            LockState::LockedOpaque { .. } => Err(LockboxError::InvalidState(
                "Document is locked".to_string(),
            )),
        }
    }

    /// Lock a never-locked document and persist it as a new record.
    ///
    /// Plaintext and password are dropped on success. On failure the
    /// session stays `Unlocked`.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for an empty document or a password under policy
    /// - `InvalidState` if the document was already locked
    /// - `Storage` if the store rejects the write
    pub async fn lock(&mut self, password: &str, label: &str) -> Result<RecordId> {
        let document = match &self.state {
            LockState::Unlocked { plaintext } => plaintext.clone(),
            other => {
                return Err(LockboxError::InvalidState(format!(
                    "Cannot lock a document that is {}",
                    other.name()
                )))
            }
        };

        let secret = SecretString::from(password.to_owned());
        let label_owned = label.to_owned();
        let record = run_blocking(move || {
            lock_document(&document, secret.expose_secret(), &label_owned)
        })
        .await?;

        let id = self.store.store(&record).await?;
        tracing::info!(
            record_id = %id,
            kind = %D::KIND,
            label = %record.label,
            bytes = record.cipher_len(),
            "document locked"
        );
        self.state = LockState::LockedOpaque { id, record };
        Ok(id)
    }

    /// Unlock a locked document for editing.
    ///
    /// The verification digest is checked first; a mismatch fails fast
    /// without running key derivation. On failure the session stays locked
    /// and the caller may retry.
    ///
    /// # Errors
    ///
    /// - `WrongPassword` if the password does not match the record
    /// - `CorruptedOrTampered` if it matches but the record cannot be decrypted
    /// - `InvalidState` unless the document is `LockedOpaque`
    pub async fn unlock(&mut self, password: &str) -> Result<()> {
        let (id, record) = match &self.state {
            LockState::LockedOpaque { id, record } => (*id, record.clone()),
            other => {
                return Err(LockboxError::InvalidState(format!(
                    "Cannot unlock a document that is {}",
                    other.name()
                )))
            }
        };

        let secret = SecretString::from(password.to_owned());
        let (plaintext, record, password) = run_blocking(move || {
            let plaintext = unlock_document::<D>(&record, secret.expose_secret())?;
            Ok((plaintext, record, secret))
        })
        .await
        .inspect_err(|err| {
            tracing::warn!(record_id = %id, error = %err, "unlock failed");
        })?;

        tracing::info!(record_id = %id, kind = %D::KIND, "document unlocked");
        self.state = LockState::UnlockedInMemory {
            id,
            plaintext,
            password,
            record,
        };
        Ok(())
    }

    /// Re-encrypt the current plaintext under a fresh salt and nonce and
    /// overwrite the stored record under the same id.
    ///
    /// On failure nothing in the session changes.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the plaintext was emptied
    /// - `InvalidState` unless the document is `UnlockedInMemory`
    /// - `Storage` / `NotFound` from the store
    pub async fn save(&mut self) -> Result<()> {
        let (id, document, secret, label) = match &self.state {
            LockState::UnlockedInMemory {
                id,
                plaintext,
                password,
                record,
            } => (
                *id,
                plaintext.clone(),
                SecretString::from(password.expose_secret().to_owned()),
                record.label.clone(),
            ),
            other => {
                return Err(LockboxError::InvalidState(format!(
                    "Cannot save a document that is {}",
                    other.name()
                )))
            }
        };

        let fresh = run_blocking(move || {
            lock_document(&document, secret.expose_secret(), &label)
        })
        .await?;

        self.store.overwrite(&id, &fresh).await?;
        tracing::info!(
            record_id = %id,
            kind = %D::KIND,
            bytes = fresh.cipher_len(),
            "document re-encrypted"
        );
        if let LockState::UnlockedInMemory { record, .. } = &mut self.state {
            *record = fresh;
        }
        Ok(())
    }

    /// Drop plaintext and password, keeping only the last persisted record.
    ///
    /// Unsaved edits are discarded. Closing a locked document is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `LockboxError::InvalidState` for a never-locked document.
    pub fn close(&mut self) -> Result<()> {
        match &self.state {
            LockState::UnlockedInMemory { id, record, .. } => {
                let id = *id;
                let record = record.clone();
                self.state = LockState::LockedOpaque { id, record };
                tracing::debug!(record_id = %id, "document closed");
                Ok(())
            }
            LockState::LockedOpaque { .. } => Ok(()),
            LockState::Unlocked { .. } => Err(LockboxError::InvalidState(
                "Document was never locked".to_string(),
            )),
        }
    }
}

/// Run CPU-bound crypto on the blocking pool.
async fn run_blocking<T, F>(task: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| LockboxError::Crypto(format!("Crypto worker failed: {}", e)))?
}
