//! Password policy.
//!
//! Enforces minimum requirements for the password a record is locked with.

use crate::error::{LockboxError, Result};

/// Minimum password length in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Validate a password before locking with it.
///
/// # Requirements
///
/// - Not empty or only whitespace
/// - At least 6 characters long (Unicode scalar values, not bytes)
///
/// # Examples
///
/// ```
/// use lockbox_core::crypto::validate_password;
///
/// assert!(validate_password("correcthorse").is_ok());
/// assert!(validate_password("abc").is_err());
/// ```
pub fn validate_password(password: &str) -> Result<()> {
    if password.trim().is_empty() {
        return Err(LockboxError::InvalidInput(
            "Password cannot be empty".to_string(),
        ));
    }

    let length = password.chars().count();
    if length < MIN_PASSWORD_LENGTH {
        return Err(LockboxError::InvalidInput(format!(
            "Password must be at least {} characters (got {})",
            MIN_PASSWORD_LENGTH, length
        )));
    }

    Ok(())
}
