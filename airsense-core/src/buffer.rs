//! Bounded Sample History
//!
//! Each measured quantity keeps its last `N` samples for smoothing and
//! scoring. `N` is a const generic, so a manager's entire history lives
//! inline in the struct and nothing is allocated per reading.
//!
//! ## Eviction
//!
//! `heapless::Deque` refuses a push when full. Sensor history wants the
//! reverse: the newest sample always goes in and the oldest falls out.
//!
//! ```text
//! N = 4, after pushing a b c d e f
//!
//!   slots   [ e | f | c | d ]
//!                     ↑
//!                    head (oldest)
//!
//!   logical order: c d e f
//! ```
//!
//! Ordered copies for statistics come out as `heapless::Vec` through
//! [`CircularBuffer::snapshot`].
//!
//! ```rust
//! use airsense_core::buffer::CircularBuffer;
//!
//! let mut history: CircularBuffer<f64, 3> = CircularBuffer::new();
//! for value in [1.0, 2.0, 3.0, 4.0, 5.0] {
//!     history.push(value);
//! }
//!
//! assert_eq!(history.snapshot().as_slice(), &[3.0, 4.0, 5.0]);
//! assert_eq!(history.last(), Some(&5.0));
//! ```

use heapless::Vec;

/// Fixed-capacity FIFO that overwrites its oldest entry
///
/// Invariants: `head < N` whenever `N > 0`, and `len <= N`. Slots
/// `head .. head + len` (mod `N`) hold `Some`.
#[derive(Debug, Clone)]
pub struct CircularBuffer<T: Copy, const N: usize> {
    slots: [Option<T>; N],
    head: usize,
    len: usize,
}

impl<T: Copy, const N: usize> CircularBuffer<T, N> {
    /// Empty history
    pub const fn new() -> Self {
        Self {
            slots: [None; N],
            head: 0,
            len: 0,
        }
    }

    /// Append `value`, evicting the oldest entry when full
    ///
    /// With `N == 0` the value is dropped.
    pub fn push(&mut self, value: T) {
        if N == 0 {
            return;
        }

        if self.len == N {
            self.slots[self.head] = Some(value);
            self.head = (self.head + 1) % N;
        } else {
            self.slots[self.physical(self.len)] = Some(value);
            self.len += 1;
        }
    }

    /// Entries held
    pub fn len(&self) -> usize {
        self.len
    }

    /// Entries held when full
    pub const fn capacity(&self) -> usize {
        N
    }

    /// True when nothing has been pushed since creation or `clear`
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True once the next push will evict
    pub fn is_full(&self) -> bool {
        N > 0 && self.len == N
    }

    /// Newest entry
    pub fn last(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|i| self.get(i))
    }

    /// Entries, oldest first
    pub fn iter(&self) -> CircularBufferIter<'_, T, N> {
        CircularBufferIter {
            buffer: self,
            front: 0,
        }
    }

    /// Ordered copy, oldest first
    pub fn snapshot(&self) -> Vec<T, N> {
        self.iter().copied().collect()
    }

    /// Forget every entry
    pub fn clear(&mut self) {
        self.slots = [None; N];
        self.head = 0;
        self.len = 0;
    }

    /// Entry at logical position `i` (0 = oldest)
    fn get(&self, i: usize) -> Option<&T> {
        if i >= self.len {
            return None;
        }
        self.slots[self.physical(i)].as_ref()
    }

    fn physical(&self, i: usize) -> usize {
        (self.head + i) % N
    }
}

/// Oldest-to-newest iterator over a [`CircularBuffer`]
pub struct CircularBufferIter<'a, T: Copy, const N: usize> {
    buffer: &'a CircularBuffer<T, N>,
    front: usize,
}

impl<'a, T: Copy, const N: usize> Iterator for CircularBufferIter<'a, T, N> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.buffer.get(self.front)?;
        self.front += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.buffer.len - self.front.min(self.buffer.len);
        (left, Some(left))
    }
}

impl<T: Copy, const N: usize> ExactSizeIterator for CircularBufferIter<'_, T, N> {}

impl<T: Copy, const N: usize> Default for CircularBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}
