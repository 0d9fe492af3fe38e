//! Board configuration
//!
//! Constants are generated by build.rs from lockbox.toml after validation.

use defmt::*;
use lockbox_core::config::{LockConfig, MorseTiming};
use lockbox_core::Password;

include!(concat!(env!("OUT_DIR"), "/lockbox_config.rs"));

/// Morse timing table for this board
pub const MORSE_TIMING: MorseTiming = MorseTiming {
    dot_ms: DOT_MS,
    dash_ms: DASH_MS,
    element_gap_ms: ELEMENT_GAP_MS,
    letter_gap_ms: LETTER_GAP_MS,
    word_gap_ms: WORD_GAP_MS,
    distinct_gaps: DISTINCT_GAPS,
};

/// Assemble the lock configuration
pub fn lock_config() -> LockConfig {
    let password = match Password::new(DEFAULT_PASSWORD) {
        Ok(password) => password,
        Err(e) => {
            // Rejected by build.rs already
            error!("Invalid default password: {}", e);
            Password::default()
        }
    };

    LockConfig {
        timing: MORSE_TIMING,
        on_duty: ON_DUTY,
        queue_capacity: QUEUE_CAPACITY,
        password,
    }
}
