//! Fast password pre-check.
//!
//! A SHA-256 digest of the raw password is stored next to each record so a
//! wrong password can be rejected without running PBKDF2 and the AEAD
//! decrypt. It is advisory only: `verify` returning true does not mean the
//! record will decrypt. The digest is independent of the record's salt and
//! nonce.

use std::fmt;

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::error::{LockboxError, Result};

/// Digest length in bytes.
pub const DIGEST_LENGTH: usize = 32;

/// Hex-encoded SHA-256 digest of a password.
#[derive(Clone, PartialEq, Eq)]
pub struct VerificationDigest([u8; DIGEST_LENGTH]);

impl VerificationDigest {
    /// Parse a digest from its hex transport form.
    pub fn from_hex(value: &str) -> Result<Self> {
        let bytes = hex::decode(value.trim()).map_err(|_| {
            LockboxError::InvalidInput("Password hash is not valid hex".to_string())
        })?;
        let bytes: [u8; DIGEST_LENGTH] = bytes.try_into().map_err(|_| {
            LockboxError::InvalidInput(format!(
                "Password hash must be {} bytes",
                DIGEST_LENGTH
            ))
        })?;
        Ok(Self(bytes))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for VerificationDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VerificationDigest([REDACTED])")
    }
}

/// Compute the verification digest of a password.
pub fn digest(password: &str) -> VerificationDigest {
    VerificationDigest(Sha256::digest(password.as_bytes()).into())
}

/// Recompute the digest of `password` and compare it in constant time.
pub fn verify(password: &str, expected: &VerificationDigest) -> bool {
    digest(password).0.ct_eq(&expected.0).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_is_stable() {
        assert_eq!(digest("correcthorse"), digest("correcthorse"));
        assert_eq!(digest("correcthorse").to_hex().len(), 64);
    }

    #[test]
    fn test_digest_matches_sha256() {
        // SHA-256("abc")
        assert_eq!(
            digest("abc").to_hex(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_verify() {
        let stored = digest("correcthorse");
        assert!(verify("correcthorse", &stored));
        assert!(!verify("correcthorsf", &stored));
        assert!(!verify("", &stored));
    }

    #[test]
    fn test_hex_round_trip() {
        let stored = digest("correcthorse");
        let parsed = VerificationDigest::from_hex(&stored.to_hex()).unwrap();
        assert_eq!(parsed, stored);
    }

    #[test]
    fn test_malformed_hex_rejected() {
        assert!(VerificationDigest::from_hex("zz").is_err());
        assert!(VerificationDigest::from_hex("abcd").is_err());
    }

    #[test]
    fn test_debug_redacts() {
        let stored = digest("correcthorse");
        let output = format!("{:?}", stored);
        assert!(!output.contains(&stored.to_hex()[..8]));
    }
}
