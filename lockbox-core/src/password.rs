//! Stored password
//!
//! The password is a plain byte string. It is replaced as a whole when an
//! update session completes and never edited in place.

use heapless::Vec;

use crate::config::{DEFAULT_PASSWORD, MAX_PASSWORD_LEN};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Reasons a byte string cannot become a password
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PasswordError {
    /// No bytes entered
    Empty,
    /// More than [`MAX_PASSWORD_LEN`] bytes
    TooLong,
}

/// Lock password, 1 to [`MAX_PASSWORD_LEN`] bytes
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Password {
    bytes: Vec<u8, MAX_PASSWORD_LEN>,
}

impl Password {
    /// Build a password from raw bytes
    pub fn new(bytes: &[u8]) -> Result<Self, PasswordError> {
        if bytes.is_empty() {
            return Err(PasswordError::Empty);
        }

        let mut stored = Vec::new();
        stored
            .extend_from_slice(bytes)
            .map_err(|_| PasswordError::TooLong)?;
        Ok(Self { bytes: stored })
    }

    /// Check an entered sequence
    ///
    /// The whole sequence must equal the password: same length, same bytes.
    pub fn matches(&self, entry: &[u8]) -> bool {
        self.bytes.as_slice() == entry
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false for a constructed password
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl Default for Password {
    fn default() -> Self {
        let mut bytes = Vec::new();
        let _ = bytes.extend_from_slice(DEFAULT_PASSWORD);
        Self { bytes }
    }
}
