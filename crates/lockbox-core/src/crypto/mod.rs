//! Cryptographic primitives for Lockbox.
//!
//! All primitives come from audited RustCrypto crates:
//! - **PBKDF2-HMAC-SHA256**: password stretching (100,000 iterations)
//! - **AES-256-GCM**: authenticated encryption with 96-bit nonces
//! - **SHA-256**: fast password verification digest
//!
//! ## Security Model
//!
//! - Every encryption transaction draws a fresh salt and a fresh nonce
//! - Keys are zeroized from memory on drop and never leave this process
//! - Only ciphertext and public parameters (salt, nonce, digest) are stored
//! - A lost password means the data is gone; there is no recovery path
//!
//! ## Threat Model
//!
//! We defend against:
//! - An operator of the record store reading or altering stored records
//! - Offline brute-force attacks on a stolen record (slowed by PBKDF2)
//!
//! We do NOT defend against:
//! - Compromised OS / keylogger
//! - Access to an unlocked editing session / memory
//! - Dictionary attacks on the verification digest of a weak password

pub mod cipher;
pub mod key;
pub mod params;
pub mod password;
pub mod verifier;

pub use cipher::{decrypt, encrypt, AuthenticatedCipher, TAG_LENGTH};
pub use key::{derive_key, derive_key_with_salt, DerivedKey, KEY_LENGTH, PBKDF2_ITERATIONS};
pub use params::{Nonce, Salt, NONCE_LENGTH, SALT_LENGTH};
pub use password::{validate_password, MIN_PASSWORD_LENGTH};
pub use verifier::{digest, verify, VerificationDigest};
