//! Fixed-capacity chunks of pregenerated values
//!
//! A [`Chunk`] is a singly-cursored buffer of values consumed in index
//! order. It carries no synchronization of its own: exclusivity is
//! guaranteed by the hand-off protocol, which moves whole chunks between
//! the facade and one producer via `std::mem::swap` and never aliases them.
//!
//! # Invariants
//!
//! - `is_empty() ⇔ cursor == len`
//! - `is_full() ⇔ cursor == 0 && len == capacity`
//! - The cursor only moves forward between refills; `refill()` rewrites
//!   every slot and resets the cursor to 0.
//!
//! A freshly constructed chunk is empty and not full, so the first
//! consumer call always forces a hand-off.

/// Fixed-capacity buffer of pregenerated values, consumed front to back
#[derive(Debug)]
pub struct Chunk<T> {
    values: Vec<T>,
    cursor: usize,
    capacity: usize,
}

impl<T: Copy> Chunk<T> {
    /// Create an empty chunk with the given capacity
    ///
    /// Storage is allocated once, here. The chunk starts with nothing to
    /// consume; the first `refill()` populates all slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
            cursor: 0,
            capacity,
        }
    }

    /// Capacity fixed at construction
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// True when every generated value has been consumed
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.cursor == self.values.len()
    }

    /// True when all slots are generated and none consumed
    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.cursor == 0 && self.values.len() == self.capacity
    }

    /// Return the value at the cursor and advance
    ///
    /// Callers must guarantee the chunk is not empty; the facade checks
    /// `is_empty()` before every call.
    #[inline(always)]
    pub fn next(&mut self) -> T {
        debug_assert!(!self.is_empty(), "next() on an exhausted chunk");
        let value = self.values[self.cursor];
        self.cursor += 1;
        value
    }

    /// Rewrite all slots from the generator and reset the cursor
    ///
    /// The generator is invoked exactly `capacity` times, in slot order.
    /// No partial-fill state is observable outside this call.
    pub fn refill<F: FnMut() -> T>(&mut self, mut generator: F) {
        self.values.clear();
        for _ in 0..self.capacity {
            self.values.push(generator());
        }
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_chunk_is_empty_not_full() {
        let chunk: Chunk<u64> = Chunk::new(8);
        assert!(chunk.is_empty());
        assert!(!chunk.is_full());
        assert_eq!(chunk.capacity(), 8);
    }

    #[test]
    fn test_refill_makes_full() {
        let mut chunk: Chunk<u64> = Chunk::new(4);
        let mut counter = 0u64;
        chunk.refill(|| {
            counter += 1;
            counter
        });
        assert!(chunk.is_full());
        assert!(!chunk.is_empty());
        assert_eq!(counter, 4);
    }

    #[test]
    fn test_consume_in_generation_order() {
        let mut chunk: Chunk<u64> = Chunk::new(4);
        let mut counter = 0u64;
        chunk.refill(|| {
            counter += 1;
            counter * 10
        });
        assert_eq!(chunk.next(), 10);
        assert_eq!(chunk.next(), 20);
        assert_eq!(chunk.next(), 30);
        assert_eq!(chunk.next(), 40);
        assert!(chunk.is_empty());
    }

    #[test]
    fn test_empty_after_exactly_capacity_calls() {
        let capacity = 16;
        let mut chunk: Chunk<u32> = Chunk::new(capacity);
        chunk.refill(|| 7);
        for i in 0..capacity {
            assert!(!chunk.is_empty(), "exhausted after only {} draws", i);
            chunk.next();
        }
        assert!(chunk.is_empty());
        assert!(!chunk.is_full());
    }

    #[test]
    fn test_partially_consumed_is_neither() {
        let mut chunk: Chunk<u32> = Chunk::new(3);
        chunk.refill(|| 1);
        chunk.next();
        assert!(!chunk.is_empty());
        assert!(!chunk.is_full());
    }

    #[test]
    fn test_refill_overwrites_previous_values() {
        let mut chunk: Chunk<u64> = Chunk::new(2);
        chunk.refill(|| 1);
        chunk.next();
        chunk.next();
        chunk.refill(|| 2);
        assert!(chunk.is_full());
        assert_eq!(chunk.next(), 2);
        assert_eq!(chunk.next(), 2);
    }
}
