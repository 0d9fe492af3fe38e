//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in lockbox-core on top of `embedded-hal` and `embedded-io`:
//!
//! - Matrix keypad scanning (row drive, column sense)
//! - PWM duty-cycle output for the Morse signal
//! - Serial byte source for the peripheral link
//! - Serial status display (text menus over a UART)

#![no_std]
#![deny(unsafe_code)]

pub mod display;
pub mod keypad;
pub mod pwm;
pub mod serial;

pub use display::SerialStatusDisplay;
pub use keypad::{KeypadError, MatrixKeypad, KEYMAP_4X4};
pub use pwm::PwmSignal;
pub use serial::SerialSource;
