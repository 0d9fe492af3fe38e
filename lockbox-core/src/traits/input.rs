//! Input source traits
//!
//! Both sources produce single bytes. Neither may block: "nothing yet" is
//! reported as `None` and the caller polls again on its next iteration.

/// Keypad scanner
pub trait Keypad {
    /// Scan the keypad once
    ///
    /// Returns the key code of a newly pressed key, or `None` when no key
    /// was pressed since the previous scan.
    fn scan(&mut self) -> Option<u8>;
}

/// Peripheral byte receiver (serial link, radio bridge, etc.)
pub trait ByteSource {
    /// Take at most one received byte
    fn read_byte(&mut self) -> Option<u8>;
}

/// A source with nothing attached
///
/// Useful when bytes are delivered from an interrupt handler through
/// [`InputMultiplexer::receive`](crate::input::InputMultiplexer::receive)
/// instead of being polled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSource;

impl ByteSource for NoSource {
    fn read_byte(&mut self) -> Option<u8> {
        None
    }
}
