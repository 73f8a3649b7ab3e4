//! Public encryption parameters: salt and nonce.
//!
//! Both are generated fresh for every encryption transaction and travel
//! next to the ciphertext as lowercase hex. Neither is secret.

use std::fmt;

use crate::error::{LockboxError, Result};

/// Salt length in bytes.
pub const SALT_LENGTH: usize = 16;

/// AES-GCM nonce length in bytes (96 bits).
pub const NONCE_LENGTH: usize = 12;

/// Fill `buf` from the operating system CSPRNG.
pub(crate) fn fill_random(buf: &mut [u8]) -> Result<()> {
    getrandom::getrandom(buf)
        .map_err(|e| LockboxError::Crypto(format!("Random number generation failed: {}", e)))
}

/// Decode exactly `N` bytes of hex, naming the field in the error.
fn parse_fixed_hex<const N: usize>(value: &str, field: &str) -> Result<[u8; N]> {
    let bytes = hex::decode(value.trim())
        .map_err(|_| LockboxError::InvalidInput(format!("{} is not valid hex", field)))?;
    bytes.try_into().map_err(|bytes: Vec<u8>| {
        LockboxError::InvalidInput(format!(
            "{} must be {} bytes (got {})",
            field,
            N,
            bytes.len()
        ))
    })
}

/// Random salt mixed into key derivation. One per encryption transaction.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Salt([u8; SALT_LENGTH]);

impl Salt {
    /// Generate a fresh random salt.
    pub fn generate() -> Result<Self> {
        let mut bytes = [0u8; SALT_LENGTH];
        fill_random(&mut bytes)?;
        Ok(Self(bytes))
    }

    /// Parse a salt from its hex transport form.
    ///
    /// # Errors
    ///
    /// Returns `LockboxError::InvalidInput` if the value is not hex or is
    /// not exactly 16 bytes long.
    pub fn from_hex(value: &str) -> Result<Self> {
        parse_fixed_hex(value, "Salt").map(Self)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; SALT_LENGTH] {
        &self.0
    }
}

impl From<[u8; SALT_LENGTH]> for Salt {
    fn from(bytes: [u8; SALT_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl fmt::Debug for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Salt").field(&self.to_hex()).finish()
    }
}

/// AES-GCM nonce (IV). Must never repeat under the same key.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Nonce([u8; NONCE_LENGTH]);

impl Nonce {
    /// Generate a fresh random nonce.
    pub fn generate() -> Result<Self> {
        let mut bytes = [0u8; NONCE_LENGTH];
        fill_random(&mut bytes)?;
        Ok(Self(bytes))
    }

    /// Parse a nonce from its hex transport form.
    ///
    /// # Errors
    ///
    /// Returns `LockboxError::InvalidInput` if the value is not hex or is
    /// not exactly 12 bytes long.
    pub fn from_hex(value: &str) -> Result<Self> {
        parse_fixed_hex(value, "IV").map(Self)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; NONCE_LENGTH] {
        &self.0
    }

    /// Derive the nonce for one field of a multi-field payload.
    ///
    /// The field counter is XOR-ed big-endian into the last four bytes, so
    /// counter 0 yields the nonce itself and every other counter yields a
    /// distinct nonce. Fields sharing one salt (and therefore one key) each
    /// get their own nonce while only the base nonce is transported.
    pub fn for_field(&self, counter: u32) -> Nonce {
        let mut bytes = self.0;
        for (slot, mask) in bytes[NONCE_LENGTH - 4..]
            .iter_mut()
            .zip(counter.to_be_bytes())
        {
            *slot ^= mask;
        }
        Nonce(bytes)
    }
}

impl From<[u8; NONCE_LENGTH]> for Nonce {
    fn from(bytes: [u8; NONCE_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl fmt::Debug for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Nonce").field(&self.to_hex()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_salts_differ() {
        let a = Salt::generate().unwrap();
        let b = Salt::generate().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_salt_hex_is_lowercase_32_chars() {
        let salt = Salt::from([0xABu8; SALT_LENGTH]);
        let encoded = salt.to_hex();
        assert_eq!(encoded.len(), 32);
        assert_eq!(encoded, encoded.to_lowercase());
        assert_eq!(Salt::from_hex(&encoded).unwrap(), salt);
    }

    #[test]
    fn test_nonce_hex_is_24_chars() {
        let nonce = Nonce::generate().unwrap();
        assert_eq!(nonce.to_hex().len(), 24);
    }

    #[test]
    fn test_malformed_hex_rejected() {
        let result = Salt::from_hex("not-hex-at-all-not-hex-at-all-!!");
        assert!(matches!(result, Err(LockboxError::InvalidInput(_))));

        let result = Nonce::from_hex("zz");
        assert!(matches!(result, Err(LockboxError::InvalidInput(_))));
    }

    #[test]
    fn test_wrong_length_rejected() {
        let err = Salt::from_hex("abcd").unwrap_err();
        assert!(err.to_string().contains("must be 16 bytes (got 2)"));

        let err = Nonce::from_hex(&"00".repeat(16)).unwrap_err();
        assert!(err.to_string().contains("must be 12 bytes (got 16)"));
    }

    #[test]
    fn test_for_field_zero_is_identity() {
        let nonce = Nonce::generate().unwrap();
        assert_eq!(nonce.for_field(0), nonce);
    }

    #[test]
    fn test_for_field_counters_are_distinct() {
        let nonce = Nonce::from([0u8; NONCE_LENGTH]);
        let one = nonce.for_field(1);
        let two = nonce.for_field(2);
        assert_ne!(one, nonce);
        assert_ne!(one, two);
        assert_eq!(one.as_bytes()[NONCE_LENGTH - 1], 1);
        assert_eq!(&one.as_bytes()[..NONCE_LENGTH - 4], &[0u8; 8]);
    }
}
