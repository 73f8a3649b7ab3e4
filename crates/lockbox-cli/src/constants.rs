//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Resource not found (config, store, record).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Authentication failed (wrong password, too many attempts).
    pub const AUTH_FAILED: i32 = 5;

    /// Record is corrupted or has been tampered with.
    pub const INTEGRITY_FAILED: i32 = 6;

    /// General failure.
    pub const GENERAL: i32 = 1;
}

/// Environment variable holding the password for non-interactive use.
pub const PASSWORD_ENV: &str = "LOCKBOX_PASSWORD";

/// Environment variable overriding the log filter.
pub const LOG_ENV: &str = "LOCKBOX_LOG";

/// Log filter used when neither `LOCKBOX_LOG` nor the config sets one.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Interactive password attempts before giving up.
pub const MAX_PASSWORD_ATTEMPTS: u32 = 3;

/// Label used when none is given.
pub const DEFAULT_NOTE_LABEL: &str = "Note";
pub const DEFAULT_FILE_LABEL: &str = "File";
