//! Board-agnostic core logic for the keypad lock controller
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (keypad, byte source, duty-cycle output, status display)
//! - Bounded byte queues backing each input source
//! - Input multiplexing of keypad and serial bytes into one command stream
//! - Morse signalling state machine and its tick-driven scheduler
//! - Lock logic (password validation, password update, alarm flag)
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod input;
pub mod lock;
pub mod morse;
pub mod password;
pub mod queue;
pub mod traits;

pub use input::{InputMultiplexer, END_OF_INPUT};
pub use lock::{LockController, LockEvent, LockState, LockStatus};
pub use morse::{Message, MorseCommand, Phase, SequenceScheduler};
pub use password::Password;
pub use queue::{ByteQueue, CapacityError};
