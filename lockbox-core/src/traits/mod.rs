//! Hardware abstraction traits
//!
//! These traits define the interface between the lock logic and the
//! hardware-specific implementations in `lockbox-drivers`.

pub mod display;
pub mod input;
pub mod signal;

pub use display::StatusDisplay;
pub use input::{ByteSource, Keypad, NoSource};
pub use signal::DutyCycleOutput;
