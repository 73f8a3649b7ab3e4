//! Error types for Lockbox core operations.
//!
//! Errors carry a coarse kind only. Nothing in here ever embeds plaintext,
//! passwords, key material or ciphertext; the CLI layer maps these to
//! user-facing messages and exit codes.

use thiserror::Error;

/// Result type alias for Lockbox operations.
pub type Result<T> = std::result::Result<T, LockboxError>;

/// Core error type for Lockbox operations.
#[derive(Debug, Error)]
pub enum LockboxError {
    /// Rejected before any crypto ran (empty payload, short password, bad hex)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The verification digest did not match the supplied password
    #[error("Incorrect password")]
    WrongPassword,

    /// The password verified but the record could not be decrypted
    #[error("Record is corrupted or has been tampered with")]
    CorruptedOrTampered,

    /// AEAD tag check failed (bad key, truncated or modified ciphertext)
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// Encrypt-side primitive failure
    #[error("Encryption error: {0}")]
    Crypto(String),

    /// Record store failure, passed through uninterpreted
    #[error("Storage error: {0}")]
    Storage(String),

    /// Record store has nothing under the requested id
    #[error("Not found: {0}")]
    NotFound(String),

    /// Lifecycle operation issued in a state that does not allow it
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl LockboxError {
    /// True for failures the user can retry with different input.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            LockboxError::InvalidInput(_) | LockboxError::WrongPassword
        )
    }
}

impl From<std::io::Error> for LockboxError {
    fn from(err: std::io::Error) -> Self {
        LockboxError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for LockboxError {
    fn from(err: serde_json::Error) -> Self {
        LockboxError::InvalidInput(format!("Malformed record JSON: {}", err))
    }
}

impl From<rusqlite::Error> for LockboxError {
    fn from(err: rusqlite::Error) -> Self {
        LockboxError::Storage(format!("SQLite error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_are_coarse() {
        assert_eq!(LockboxError::WrongPassword.to_string(), "Incorrect password");
        assert_eq!(
            LockboxError::CorruptedOrTampered.to_string(),
            "Record is corrupted or has been tampered with"
        );
        assert_eq!(
            LockboxError::AuthenticationFailed.to_string(),
            "Authentication failed"
        );
    }

    #[test]
    fn test_retryable_kinds() {
        assert!(LockboxError::WrongPassword.is_retryable());
        assert!(LockboxError::InvalidInput("short".into()).is_retryable());
        assert!(!LockboxError::CorruptedOrTampered.is_retryable());
        assert!(!LockboxError::Storage("down".into()).is_retryable());
    }
}
