//! Morse signalling timing

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Duration of a dot (ms)
pub const DOT_DURATION_MS: u64 = 150;
/// Duration of a dash (ms)
pub const DASH_DURATION_MS: u64 = 800;
/// Pause after every dot or dash (ms)
pub const ELEMENT_GAP_MS: u64 = 500;
/// Pause for a letter separator when distinct gaps are enabled (ms)
pub const LETTER_GAP_MS: u64 = 1000;
/// Pause for a word separator when distinct gaps are enabled (ms)
pub const WORD_GAP_MS: u64 = 1400;

/// Timing table used by the sequence scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MorseTiming {
    /// Dot on-time (ms)
    pub dot_ms: u64,
    /// Dash on-time (ms)
    pub dash_ms: u64,
    /// Gap after each element (ms)
    pub element_gap_ms: u64,
    /// Gap for a `' '` separator (ms), only used with `distinct_gaps`
    pub letter_gap_ms: u64,
    /// Gap for a `'/'` separator (ms), only used with `distinct_gaps`
    pub word_gap_ms: u64,
    /// Give separators their own gap lengths
    ///
    /// Off by default: every separator then costs one more element gap.
    pub distinct_gaps: bool,
}

impl MorseTiming {
    /// Stock timing
    pub const DEFAULT: Self = Self {
        dot_ms: DOT_DURATION_MS,
        dash_ms: DASH_DURATION_MS,
        element_gap_ms: ELEMENT_GAP_MS,
        letter_gap_ms: LETTER_GAP_MS,
        word_gap_ms: WORD_GAP_MS,
        distinct_gaps: false,
    };

    /// Gap length after a letter separator
    pub fn letter_gap(&self) -> u64 {
        if self.distinct_gaps {
            self.letter_gap_ms
        } else {
            self.element_gap_ms
        }
    }

    /// Gap length after a word separator
    pub fn word_gap(&self) -> u64 {
        if self.distinct_gaps {
            self.word_gap_ms
        } else {
            self.element_gap_ms
        }
    }
}

impl Default for MorseTiming {
    fn default() -> Self {
        Self::DEFAULT
    }
}
