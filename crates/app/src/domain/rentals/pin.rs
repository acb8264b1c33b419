//! Rental PINs.
//!
//! PINs are four ASCII digits and are only ever persisted as a salted argon2id
//! hash. The plaintext is zeroed when dropped.

use std::fmt;

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use thiserror::Error;
use zeroize::Zeroize;

/// Number of digits in a rental PIN.
pub const PIN_LENGTH: usize = 4;

/// What the customer sees in place of a stored PIN.
pub const MASKED_PIN: &str = "••••";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PinError {
    #[error("PIN must be exactly 4 digits.")]
    InvalidFormat,

    #[error("failed to hash PIN: {0}")]
    Hashing(String),
}

/// A validated plaintext PIN.
#[derive(Clone)]
pub struct Pin(String);

impl Pin {
    /// Validate `input` against `^\d{4}$`.
    ///
    /// # Errors
    ///
    /// Returns [`PinError::InvalidFormat`] for anything other than four ASCII digits.
    pub fn parse(input: &str) -> Result<Self, PinError> {
        if input.len() == PIN_LENGTH && input.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(input.to_string()))
        } else {
            Err(PinError::InvalidFormat)
        }
    }

    /// Hash with a fresh random salt.
    ///
    /// # Errors
    ///
    /// Returns [`PinError::Hashing`] when argon2 rejects its parameters.
    pub fn hash(&self) -> Result<PinHash, PinError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = Argon2::default()
            .hash_password(self.0.as_bytes(), &salt)
            .map_err(|e| PinError::Hashing(e.to_string()))?;

        Ok(PinHash(hash.to_string()))
    }
}

impl fmt::Debug for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pin(**redacted**)")
    }
}

impl Drop for Pin {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// PHC-formatted argon2id hash of a PIN.
#[derive(Clone, PartialEq, Eq)]
pub struct PinHash(String);

impl PinHash {
    /// Interpret the stored `pin_code` column. Empty means no PIN has been set.
    #[must_use]
    pub fn from_stored(value: Option<String>) -> Option<Self> {
        value.filter(|value| !value.is_empty()).map(Self)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check `pin` against this hash. Malformed hashes never verify.
    #[cfg(test)]
    pub(crate) fn verify(&self, pin: &Pin) -> bool {
        use argon2::password_hash::{PasswordHash, PasswordVerifier};

        PasswordHash::new(&self.0).is_ok_and(|parsed| {
            Argon2::default()
                .verify_password(pin.0.as_bytes(), &parsed)
                .is_ok()
        })
    }
}

impl fmt::Debug for PinHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PinHash(**redacted**)")
    }
}
