//! Lock logic
//!
//! Turns the command stream from the input multiplexer into lock state
//! changes, status screens and Morse requests. The controller never touches
//! the signal directly: it hands back a [`LockEvent`] and the caller maps
//! it to a [`MorseCommand`](crate::morse::MorseCommand).

pub mod controller;
pub mod events;
pub mod status;

pub use controller::{shadow, LockController};
pub use events::{Command, LockEvent};
pub use status::{LockState, LockStatus};
