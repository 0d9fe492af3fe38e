//! Input multiplexing
//!
//! Merges keypad presses and serial bytes into one command stream. Each
//! source is backed by its own [`ByteQueue`]; the multiplexer owns both
//! queues and both drivers.
//!
//! ```text
//! Keypad::scan ──▶ keypad queue ──┐
//!                                 ├──▶ poll_raw() / poll() / next_key()
//! ByteSource / receive() ──▶ serial queue ──┘
//! ```

use crate::queue::{ByteQueue, CapacityError, DEFAULT_QUEUE_MAX};
use crate::traits::{ByteSource, Keypad};

/// Sentinel returned in place of an end-of-input key
pub const END_OF_INPUT: u8 = 0xFF;

/// Check whether a raw byte terminates an entry (`*` or `#`)
pub const fn is_end_key(byte: u8) -> bool {
    byte == b'*' || byte == b'#'
}

/// Map a raw byte to its command value
///
/// End-of-input keys collapse to [`END_OF_INPUT`]; everything else passes
/// through unchanged.
pub const fn to_command(byte: u8) -> u8 {
    if is_end_key(byte) {
        END_OF_INPUT
    } else {
        byte
    }
}

/// Keypad + serial input multiplexer
pub struct InputMultiplexer<K, S, const MAX: usize = DEFAULT_QUEUE_MAX> {
    keypad: K,
    source: S,
    keypad_queue: ByteQueue<MAX>,
    serial_queue: ByteQueue<MAX>,
    /// Bytes lost to a full queue
    dropped: u32,
}

impl<K, S, const MAX: usize> InputMultiplexer<K, S, MAX>
where
    K: Keypad,
    S: ByteSource,
{
    /// Create a multiplexer with two queues of `capacity` bytes each
    pub fn new(keypad: K, source: S, capacity: usize) -> Result<Self, CapacityError> {
        Ok(Self {
            keypad,
            source,
            keypad_queue: ByteQueue::new(capacity)?,
            serial_queue: ByteQueue::new(capacity)?,
            dropped: 0,
        })
    }

    /// Deliver a byte received by the peripheral
    ///
    /// Producer entry point for interrupt-style delivery. A full queue
    /// drops the byte and returns `false`; the producer is never stalled.
    pub fn receive(&mut self, byte: u8) -> bool {
        let stored = self.serial_queue.put(byte);
        if !stored {
            self.dropped = self.dropped.wrapping_add(1);
        }
        stored
    }

    /// Run one polling iteration and return the raw byte it produced
    ///
    /// Takes at most one byte from the byte source into the serial queue,
    /// then scans the keypad. A pressed key goes through the keypad queue
    /// and is returned; otherwise one queued serial byte is returned.
    pub fn poll_raw(&mut self) -> Option<u8> {
        if !self.serial_queue.is_full() {
            if let Some(byte) = self.source.read_byte() {
                self.receive(byte);
            }
        }

        if let Some(key) = self.keypad.scan() {
            if !self.keypad_queue.put(key) {
                self.dropped = self.dropped.wrapping_add(1);
            }
            return self.keypad_queue.get();
        }

        self.serial_queue.get()
    }

    /// Run one polling iteration and return the command byte it produced
    ///
    /// Same as [`poll_raw`](Self::poll_raw) with `*` and `#` reported as
    /// [`END_OF_INPUT`].
    pub fn poll(&mut self) -> Option<u8> {
        self.poll_raw().map(to_command)
    }

    /// Wait for the next command byte
    ///
    /// Spins on [`poll`](Self::poll) without sleeping and without a
    /// timeout. Only suitable for a bare-metal main loop that has nothing
    /// else to do; schedulers should call `poll` and yield between calls.
    pub fn next_key(&mut self) -> u8 {
        loop {
            if let Some(byte) = self.poll() {
                return byte;
            }
            core::hint::spin_loop();
        }
    }

    /// Discard everything queued from both sources
    pub fn reset(&mut self) {
        self.keypad_queue.reset();
        self.serial_queue.reset();
    }

    /// Bytes waiting in either queue
    pub fn pending(&self) -> usize {
        self.keypad_queue.size() + self.serial_queue.size()
    }

    /// Total bytes dropped because a queue was full
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    pub fn keypad(&self) -> &K {
        &self.keypad
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn keypad_mut(&mut self) -> &mut K {
        &mut self.keypad
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}
