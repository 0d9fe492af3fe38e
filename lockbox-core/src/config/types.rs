//! Lock configuration

use crate::password::Password;

use super::timing::MorseTiming;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum password length in bytes
pub const MAX_PASSWORD_LEN: usize = 12;

/// Password installed at startup
pub const DEFAULT_PASSWORD: &[u8] = b"2000";

/// Capacity of each input queue
pub const QUEUE_CAPACITY: usize = 12;

/// Duty applied while a dot or dash is on
///
/// Clamped to the output's maximum, so anything above it means "full on".
pub const SIGNAL_ON_DUTY: u32 = 60_000;

/// Complete controller configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LockConfig {
    /// Morse timing table
    pub timing: MorseTiming,
    /// Duty while the signal is on
    pub on_duty: u32,
    /// Capacity of the keypad and serial queues
    pub queue_capacity: usize,
    /// Password installed at startup
    pub password: Password,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            timing: MorseTiming::DEFAULT,
            on_duty: SIGNAL_ON_DUTY,
            queue_capacity: QUEUE_CAPACITY,
            password: Password::default(),
        }
    }
}
