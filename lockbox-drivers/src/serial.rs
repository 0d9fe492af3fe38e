//! Serial byte source
//!
//! Pulls received bytes from any `embedded-io` reader that can tell whether
//! data is waiting, so a poll never blocks.

use embedded_io::{Read, ReadReady};
use lockbox_core::traits::ByteSource;

/// Non-blocking byte source over a serial receiver
pub struct SerialSource<R> {
    rx: R,
    /// Failed reads
    errors: u32,
}

impl<R: Read + ReadReady> SerialSource<R> {
    pub fn new(rx: R) -> Self {
        Self { rx, errors: 0 }
    }

    /// Number of failed readiness checks or reads
    pub fn errors(&self) -> u32 {
        self.errors
    }

    fn fail(&mut self) -> Option<u8> {
        self.errors = self.errors.wrapping_add(1);
        None
    }
}

impl<R: Read + ReadReady> ByteSource for SerialSource<R> {
    fn read_byte(&mut self) -> Option<u8> {
        match self.rx.read_ready() {
            Ok(true) => {}
            Ok(false) => return None,
            Err(_) => return self.fail(),
        }

        let mut byte = [0u8; 1];
        match self.rx.read(&mut byte) {
            Ok(1) => Some(byte[0]),
            Ok(_) => None,
            Err(_) => self.fail(),
        }
    }
}
