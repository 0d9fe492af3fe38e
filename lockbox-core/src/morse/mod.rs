//! Morse signalling
//!
//! A pattern string (`.` dot, `-` dash, `' '` letter separator, `/` word
//! separator) is played on a duty-cycle output. The [`MorseEncoder`] holds
//! the state machine; the [`SequenceScheduler`] owns it and advances it from
//! a periodic tick so nothing ever blocks on a signal.

pub mod encoder;
pub mod message;
pub mod scheduler;
pub mod text;

pub use encoder::{GapKind, MorseEncoder, Phase};
pub use message::{Message, MorseCommand, CLOSE_PATTERN, OPEN_PATTERN, SOS_PATTERN};
pub use scheduler::SequenceScheduler;
pub use text::{encode_text, TextError};
