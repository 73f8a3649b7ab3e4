//! Failures raised by the CLI itself, and the exit code for every error.

use std::path::PathBuf;

use lockbox_core::LockboxError;
use thiserror::Error;

use crate::constants::{exit_codes, PASSWORD_ENV};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Record store not found: {}\nHint: Run `lockbox init` to create one.", .0.display())]
    StoreMissing(PathBuf),

    #[error("Incorrect password.\nHint: Check the value of {}.", PASSWORD_ENV)]
    EnvPasswordRejected,

    #[error("Incorrect password.")]
    PasswordRejected,

    #[error("Too many failed password attempts.\nHint: A forgotten password cannot be recovered.")]
    TooManyAttempts,

    #[error("Password does not meet requirements: {0}")]
    WeakPassword(String),

    #[error("{} already exists. Use --force to overwrite.", .0.display())]
    WouldOverwrite(PathBuf),

    #[error("Failed to read {}: {}", .0.display(), .1)]
    UnreadableInput(PathBuf, #[source] std::io::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::StoreMissing(_) => exit_codes::NOT_FOUND,
            CliError::EnvPasswordRejected
            | CliError::PasswordRejected
            | CliError::TooManyAttempts => exit_codes::AUTH_FAILED,
            CliError::WeakPassword(_)
            | CliError::WouldOverwrite(_)
            | CliError::UnreadableInput(..) => exit_codes::INVALID_INPUT,
        }
    }
}

/// Exit code for any error surfaced from a command.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    if let Some(cli) = err.downcast_ref::<CliError>() {
        return cli.exit_code();
    }
    match err.downcast_ref::<LockboxError>() {
        Some(LockboxError::NotFound(_)) => exit_codes::NOT_FOUND,
        Some(LockboxError::InvalidInput(_)) => exit_codes::INVALID_INPUT,
        Some(LockboxError::WrongPassword) => exit_codes::AUTH_FAILED,
        Some(LockboxError::CorruptedOrTampered | LockboxError::AuthenticationFailed) => {
            exit_codes::INTEGRITY_FAILED
        }
        _ => exit_codes::GENERAL,
    }
}
