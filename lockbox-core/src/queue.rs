//! Bounded byte queue
//!
//! Fixed-capacity FIFO with wraparound indices. Each input source gets its
//! own instance. Access is exclusive through `&mut self`, so a queue that an
//! interrupt handler writes into must be shared behind a critical-section
//! mutex by whoever owns it.

/// Largest capacity a queue can be created with unless another maximum is
/// chosen through the const parameter.
pub const DEFAULT_QUEUE_MAX: usize = 64;

/// Queue created with an invalid capacity
///
/// This is a configuration bug and is expected to surface at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CapacityError {
    /// Capacity that was asked for
    pub requested: usize,
    /// Largest capacity the queue type supports
    pub max: usize,
}

/// Fixed-capacity byte FIFO
///
/// `MAX` sizes the backing storage; the usable capacity is chosen per
/// instance at construction and never changes afterwards.
///
/// All operations are O(1) and never allocate.
#[derive(Debug, Clone)]
pub struct ByteQueue<const MAX: usize = DEFAULT_QUEUE_MAX> {
    buf: [u8; MAX],
    capacity: usize,
    /// Next slot to read
    head: usize,
    /// Next slot to write
    tail: usize,
    count: usize,
}

impl<const MAX: usize> ByteQueue<MAX> {
    /// Create an empty queue holding up to `capacity` bytes
    ///
    /// Fails if `capacity` is zero or larger than `MAX`.
    pub const fn new(capacity: usize) -> Result<Self, CapacityError> {
        if capacity == 0 || capacity > MAX {
            return Err(CapacityError {
                requested: capacity,
                max: MAX,
            });
        }

        Ok(Self {
            buf: [0; MAX],
            capacity,
            head: 0,
            tail: 0,
            count: 0,
        })
    }

    /// Append a byte
    ///
    /// Returns `false` and leaves the queue untouched when it is full.
    pub fn put(&mut self, byte: u8) -> bool {
        if self.is_full() {
            return false;
        }

        self.buf[self.tail] = byte;
        self.tail = self.advance(self.tail);
        self.count += 1;
        true
    }

    /// Remove the oldest byte
    ///
    /// `None` means "nothing yet", never a fault.
    pub fn get(&mut self) -> Option<u8> {
        if self.is_empty() {
            return None;
        }

        let byte = self.buf[self.head];
        self.head = self.advance(self.head);
        self.count -= 1;
        Some(byte)
    }

    /// Number of bytes waiting
    pub fn size(&self) -> usize {
        self.count
    }

    /// Capacity chosen at construction
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.count == self.capacity
    }

    /// Drop all queued bytes
    ///
    /// The backing storage is not cleared; `count` alone gates visibility.
    pub fn reset(&mut self) {
        self.head = 0;
        self.tail = 0;
        self.count = 0;
    }

    fn advance(&self, idx: usize) -> usize {
        let next = idx + 1;
        if next == self.capacity {
            0
        } else {
            next
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_capacity() {
        let result = ByteQueue::<8>::new(0);
        assert_eq!(
            result.err(),
            Some(CapacityError {
                requested: 0,
                max: 8
            })
        );
    }

    #[test]
    fn test_rejects_capacity_above_max() {
        let result = ByteQueue::<8>::new(9);
        assert_eq!(
            result.err(),
            Some(CapacityError {
                requested: 9,
                max: 8
            })
        );
    }

    #[test]
    fn test_fill_to_capacity() {
        let mut queue = ByteQueue::<16>::new(12).unwrap();

        for i in 0..12 {
            assert!(queue.put(i));
        }
        assert_eq!(queue.size(), 12);
        assert!(queue.is_full());

        // Full: put fails and nothing changes
        assert!(!queue.put(99));
        assert_eq!(queue.size(), 12);
        assert_eq!(queue.get(), Some(0));
    }

    #[test]
    fn test_get_from_empty() {
        let mut queue = ByteQueue::<4>::new(4).unwrap();
        assert!(queue.is_empty());
        assert_eq!(queue.get(), None);
        assert_eq!(queue.size(), 0);
    }

    #[test]
    fn test_wrap_around() {
        let mut queue = ByteQueue::<4>::new(3).unwrap();

        assert!(queue.put(1));
        assert!(queue.put(2));
        assert!(queue.put(3));
        assert_eq!(queue.get(), Some(1));
        assert_eq!(queue.get(), Some(2));

        // Tail wraps to slot 0
        assert!(queue.put(4));
        assert!(queue.put(5));
        assert!(!queue.put(6));

        assert_eq!(queue.get(), Some(3));
        assert_eq!(queue.get(), Some(4));
        assert_eq!(queue.get(), Some(5));
        assert_eq!(queue.get(), None);
    }

    #[test]
    fn test_capacity_one() {
        let mut queue = ByteQueue::<1>::new(1).unwrap();

        assert!(queue.put(b'x'));
        assert!(!queue.put(b'y'));
        assert_eq!(queue.get(), Some(b'x'));
        assert!(queue.put(b'z'));
        assert_eq!(queue.get(), Some(b'z'));
    }

    #[test]
    fn test_reset() {
        let mut queue = ByteQueue::<8>::new(8).unwrap();
        queue.put(1);
        queue.put(2);
        queue.get();

        queue.reset();
        assert_eq!(queue.size(), 0);
        assert_eq!(queue.get(), None);

        // Usable again from slot 0
        assert!(queue.put(7));
        assert_eq!(queue.get(), Some(7));
    }

    #[test]
    fn test_const_construction() {
        const QUEUE: Result<ByteQueue<12>, CapacityError> = ByteQueue::new(12);
        assert!(QUEUE.is_ok());
    }
}
