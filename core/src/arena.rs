//! Bounded per-frame storage.
//!
//! [`FrameArena<T>`] holds at most `capacity` items for the current frame
//! generation. Starting a new generation clears the items but keeps the
//! allocation, and every index handed out remembers the generation it
//! belongs to so that a stale index from a previous frame resolves to
//! nothing instead of aliasing a newer item.
//!
//! ```
//! use pinewood_core::arena::FrameArena;
//!
//! let mut arena = FrameArena::with_capacity(2);
//! arena.begin_generation();
//! let first = arena.push("a").unwrap();
//! arena.push("b").unwrap();
//! assert!(arena.push("c").is_none()); // full: dropped
//! assert_eq!(arena.dropped(), 1);
//!
//! arena.begin_generation();
//! assert!(arena.is_empty());
//! assert!(arena.get(first).is_none()); // previous frame
//! ```

/// Index into a [`FrameArena`], valid for one generation only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArenaIndex {
    generation: u64,
    slot: u32,
}

impl ArenaIndex {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn slot(&self) -> usize {
        self.slot as usize
    }
}

/// Fixed-capacity item list tied to a frame generation.
#[derive(Debug)]
pub struct FrameArena<T> {
    items: Vec<T>,
    capacity: usize,
    generation: u64,
    dropped: usize,
}

impl<T> FrameArena<T> {
    /// Create an empty arena at generation 0.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
            generation: 0,
            dropped: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Remaining free slots this generation.
    pub fn remaining(&self) -> usize {
        self.capacity - self.items.len()
    }

    /// Number of pushes rejected this generation.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Read and reset the drop counter.
    pub fn take_dropped(&mut self) -> usize {
        std::mem::take(&mut self.dropped)
    }

    /// Start a new generation: clears items and the drop counter.
    pub fn begin_generation(&mut self) -> u64 {
        self.items.clear();
        self.dropped = 0;
        self.generation += 1;
        self.generation
    }

    /// Append an item. Returns `None` (and drops the item) when full.
    pub fn push(&mut self, item: T) -> Option<ArenaIndex> {
        if self.is_full() {
            self.dropped += 1;
            return None;
        }
        let slot = self.items.len() as u32;
        self.items.push(item);
        Some(ArenaIndex {
            generation: self.generation,
            slot,
        })
    }

    /// Count items rejected before they reached the arena.
    pub fn record_dropped(&mut self, count: usize) {
        self.dropped += count;
    }

    /// Append as many items as fit; returns how many were rejected.
    pub fn extend<I: IntoIterator<Item = T>>(&mut self, items: I) -> usize {
        let mut rejected = 0;
        for item in items {
            if self.push(item).is_none() {
                rejected += 1;
            }
        }
        rejected
    }

    /// Resolve an index from the current generation.
    pub fn get(&self, index: ArenaIndex) -> Option<&T> {
        if index.generation != self.generation {
            return None;
        }
        self.items.get(index.slot())
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Move the current items out, leaving the arena empty in the same
    /// generation. The arena keeps its allocation.
    pub fn drain_items(&mut self) -> Vec<T> {
        self.items.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty() {
        let arena = FrameArena::<u32>::with_capacity(4);
        assert!(arena.is_empty());
        assert_eq!(arena.generation(), 0);
        assert_eq!(arena.remaining(), 4);
    }

    #[test]
    fn test_push_until_full() {
        let mut arena = FrameArena::with_capacity(3);
        for i in 0..3 {
            assert!(arena.push(i).is_some());
        }
        assert!(arena.is_full());
        assert!(arena.push(99).is_none());
        assert_eq!(arena.len(), 3);
        assert_eq!(arena.dropped(), 1);
        assert_eq!(arena.as_slice(), &[0, 1, 2]);
    }

    #[test]
    fn test_begin_generation_clears() {
        let mut arena = FrameArena::with_capacity(2);
        arena.push(1);
        arena.push(2);
        arena.push(3);
        let generation = arena.begin_generation();
        assert_eq!(generation, 1);
        assert!(arena.is_empty());
        assert_eq!(arena.dropped(), 0);
    }

    #[test]
    fn test_stale_index_rejected() {
        let mut arena = FrameArena::with_capacity(2);
        let idx = arena.push(7).unwrap();
        assert_eq!(arena.get(idx), Some(&7));

        arena.begin_generation();
        arena.push(8);
        assert_eq!(idx.slot(), 0);
        assert!(arena.get(idx).is_none());
    }

    #[test]
    fn test_extend_counts_rejections() {
        let mut arena = FrameArena::with_capacity(2);
        assert_eq!(arena.extend(0..5), 3);
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.dropped(), 3);
    }

    #[test]
    fn test_take_dropped_resets() {
        let mut arena = FrameArena::with_capacity(1);
        arena.extend(0..3);
        arena.record_dropped(1);
        assert_eq!(arena.take_dropped(), 3);
        assert_eq!(arena.dropped(), 0);
        assert_eq!(arena.generation(), 0);
    }

    #[test]
    fn test_zero_capacity() {
        let mut arena = FrameArena::with_capacity(0);
        assert!(arena.push(1).is_none());
        assert!(arena.is_empty());
    }

    #[test]
    fn test_drain_keeps_generation() {
        let mut arena = FrameArena::with_capacity(4);
        arena.begin_generation();
        arena.extend([1, 2]);
        let items = arena.drain_items();
        assert_eq!(items, vec![1, 2]);
        assert!(arena.is_empty());
        assert_eq!(arena.generation(), 1);
    }
}
