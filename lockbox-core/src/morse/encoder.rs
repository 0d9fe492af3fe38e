//! Morse encoder state machine
//!
//! Walks a pattern one symbol at a time. The encoder knows nothing about
//! time: every call to [`MorseEncoder::advance`] is one transition, and the
//! [`SequenceScheduler`](super::SequenceScheduler) decides when it is due.
//!
//! ```text
//!            start                   advance
//! Idle/End ────────▶ Dot/Dash ──────────────▶ Gap
//!                       ▲                      │ advance
//!                       └──── '.' / '-' ───────┤
//!                                ' ' / '/' ────┘ (stay in Gap)
//!                        end / other ─────────▶ End
//! ```

use crate::traits::DutyCycleOutput;

/// Encoder phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Nothing started yet
    Idle,
    /// Output on for a dot
    Dot,
    /// Output on for a dash
    Dash,
    /// Output off between symbols
    Gap,
    /// Sequence finished or stopped
    End,
}

/// Which pause a gap stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GapKind {
    /// After a dot or dash
    Element,
    /// On a `' '` separator
    Letter,
    /// On a `'/'` separator
    Word,
}

/// Pattern player
///
/// Borrows the pattern for as long as it plays. Output writes happen only
/// when the on/off state actually changes, with [`stop`](Self::stop) as
/// the one exception.
#[derive(Debug)]
pub struct MorseEncoder<'a> {
    sequence: &'a [u8],
    /// Position in `sequence`, at most `sequence.len()`
    index: usize,
    phase: Phase,
    on_duty: u32,
    output_on: bool,
}

impl<'a> MorseEncoder<'a> {
    /// Create an idle encoder that lights the output at `on_duty`
    pub const fn new(on_duty: u32) -> Self {
        Self {
            sequence: &[],
            index: 0,
            phase: Phase::Idle,
            on_duty,
            output_on: false,
        }
    }

    /// Begin playing `pattern` from its first symbol
    ///
    /// Replaces any sequence in progress.
    pub fn start<O>(&mut self, pattern: &'a str, out: &mut O)
    where
        O: DutyCycleOutput + ?Sized,
    {
        self.sequence = pattern.as_bytes();
        self.index = 0;
        self.enter_symbol(out);
    }

    /// Run one transition
    ///
    /// No-op while `Idle` or `End`.
    pub fn advance<O>(&mut self, out: &mut O)
    where
        O: DutyCycleOutput + ?Sized,
    {
        match self.phase {
            Phase::Dot | Phase::Dash => {
                self.phase = Phase::Gap;
                self.set_output(false, out);
            }
            Phase::Gap => {
                if self.index < self.sequence.len() {
                    self.index += 1;
                }
                self.enter_symbol(out);
            }
            Phase::Idle | Phase::End => {}
        }
    }

    /// Silence the output and finish, whatever the phase
    pub fn stop<O>(&mut self, out: &mut O)
    where
        O: DutyCycleOutput + ?Sized,
    {
        self.phase = Phase::End;
        self.output_on = false;
        out.set_duty(0);
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Still playing
    pub fn is_active(&self) -> bool {
        matches!(self.phase, Phase::Dot | Phase::Dash | Phase::Gap)
    }

    pub fn is_output_on(&self) -> bool {
        self.output_on
    }

    /// Kind of the current gap, `None` outside `Gap`
    pub fn gap_kind(&self) -> Option<GapKind> {
        if self.phase != Phase::Gap {
            return None;
        }

        Some(match self.sequence.get(self.index) {
            Some(b' ') => GapKind::Letter,
            Some(b'/') => GapKind::Word,
            _ => GapKind::Element,
        })
    }

    fn enter_symbol<O>(&mut self, out: &mut O)
    where
        O: DutyCycleOutput + ?Sized,
    {
        let (phase, on) = match self.sequence.get(self.index) {
            Some(b'.') => (Phase::Dot, true),
            Some(b'-') => (Phase::Dash, true),
            Some(b' ') | Some(b'/') => (Phase::Gap, false),
            // Terminator or an unknown character
            _ => (Phase::End, false),
        };
        self.phase = phase;
        self.set_output(on, out);
    }

    fn set_output<O>(&mut self, on: bool, out: &mut O)
    where
        O: DutyCycleOutput + ?Sized,
    {
        if on == self.output_on {
            return;
        }

        let duty = if on {
            self.on_duty.min(u32::from(out.max_duty())) as u16
        } else {
            0
        };
        out.set_duty(duty);
        self.output_on = on;
    }
}
