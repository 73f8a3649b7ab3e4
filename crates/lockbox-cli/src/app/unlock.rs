//! Password handling and unlocking with retry logic.

use lockbox_core::{DocumentSession, LockboxError, Protectable, RecordStore};

use crate::constants::MAX_PASSWORD_ATTEMPTS;
use crate::errors::CliError;
use crate::helpers::{env_password, prompt_password};

/// Unlock a session, re-prompting on a wrong password.
///
/// A password from the environment gets a single attempt.
pub async fn unlock_with_retry<D, S>(
    session: &mut DocumentSession<D, S>,
    interactive: bool,
) -> anyhow::Result<()>
where
    D: Protectable + Clone,
    S: RecordStore,
{
    if let Some(password) = env_password() {
        return session.unlock(&password).await.map_err(|err| -> anyhow::Error {
            match err {
                LockboxError::WrongPassword => CliError::EnvPasswordRejected.into(),
                other => other.into(),
            }
        });
    }

    for attempt in 1..=MAX_PASSWORD_ATTEMPTS {
        let password = prompt_password(interactive)?;
        match session.unlock(&password).await {
            Ok(()) => return Ok(()),
            Err(LockboxError::WrongPassword) if interactive => {
                let remaining = MAX_PASSWORD_ATTEMPTS - attempt;
                if remaining > 0 {
                    eprintln!("Incorrect password. {} attempts remaining.", remaining);
                }
            }
            Err(LockboxError::WrongPassword) => {
                return Err(CliError::PasswordRejected.into());
            }
            Err(err) => return Err(err.into()),
        }
    }

    Err(CliError::TooManyAttempts.into())
}
