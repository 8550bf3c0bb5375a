//! Indexed binary min-heap with decrease-key.
//!
//! [`std::collections::BinaryHeap`] cannot change the priority of an entry
//! already in the heap. A* needs exactly that when it finds a cheaper path
//! to a node that is still open, so this heap keeps a position index from
//! each key to its slot and re-sifts in place.
//!
//! Entries are ordered by `f` ascending, then by insertion sequence, which
//! makes pop order fully deterministic for equal `f`.

use std::collections::HashMap;

/// One heap slot.
#[derive(Debug, Clone, Copy)]
struct Entry {
    /// Caller-provided key (an arena index in [`SearchEngine`](crate::SearchEngine)).
    key: usize,
    /// Priority: lower pops first.
    f: f64,
    /// Insertion sequence number used to break ties.
    seq: u64,
}

impl Entry {
    /// Whether `self` should pop before `other`.
    fn precedes(&self, other: &Self) -> bool {
        self.f
            .total_cmp(&other.f)
            .then(self.seq.cmp(&other.seq))
            .is_lt()
    }
}

/// A binary min-heap over `usize` keys with O(log n) decrease-key.
#[derive(Debug, Clone, Default)]
pub struct IndexedHeap {
    /// Heap-ordered entries.
    entries: Vec<Entry>,
    /// Key -> slot in `entries`.
    positions: HashMap<usize, usize>,
    /// Next insertion sequence number.
    next_seq: u64,
}

impl IndexedHeap {
    /// Create an empty heap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries in the heap.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the heap is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `key` is currently in the heap.
    pub fn contains(&self, key: usize) -> bool {
        self.positions.contains_key(&key)
    }

    /// Insert `key` with priority `f`.
    ///
    /// If `key` is already present this behaves like [`decrease`](Self::decrease)
    /// and keeps the lower of the two priorities.
    pub fn push(&mut self, key: usize, f: f64) {
        if self.contains(key) {
            self.decrease(key, f);
            return;
        }
        let seq = self.next_seq;
        self.next_seq = self.next_seq.saturating_add(1);
        let slot = self.entries.len();
        self.entries.push(Entry { key, f, seq });
        self.positions.insert(key, slot);
        self.sift_up(slot);
    }

    /// Remove and return the key with the lowest priority.
    pub fn pop(&mut self) -> Option<usize> {
        let last = self.entries.len().checked_sub(1)?;
        self.swap(0, last);
        let entry = self.entries.pop()?;
        self.positions.remove(&entry.key);
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        Some(entry.key)
    }

    /// Lower the priority of `key` to `f`.
    ///
    /// Returns `false` if the key is absent or `f` is not lower than the
    /// current priority. The entry keeps its original insertion sequence.
    pub fn decrease(&mut self, key: usize, f: f64) -> bool {
        let Some(&slot) = self.positions.get(&key) else {
            return false;
        };
        let Some(entry) = self.entries.get_mut(slot) else {
            return false;
        };
        if f.total_cmp(&entry.f).is_ge() {
            return false;
        }
        entry.f = f;
        self.sift_up(slot);
        true
    }

    fn precedes(&self, a: usize, b: usize) -> bool {
        match (self.entries.get(a), self.entries.get(b)) {
            (Some(x), Some(y)) => x.precedes(y),
            _ => false,
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b || a >= self.entries.len() || b >= self.entries.len() {
            return;
        }
        self.entries.swap(a, b);
        for slot in [a, b] {
            if let Some(entry) = self.entries.get(slot) {
                self.positions.insert(entry.key, slot);
            }
        }
    }

    fn sift_up(&mut self, mut slot: usize) {
        while let Some(parent) = slot.checked_sub(1).map(|s| s / 2) {
            if !self.precedes(slot, parent) {
                break;
            }
            self.swap(slot, parent);
            slot = parent;
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        loop {
            let Some(left) = slot.checked_mul(2).and_then(|s| s.checked_add(1)) else {
                break;
            };
            let right = left.saturating_add(1);
            let mut best = slot;
            if self.precedes(left, best) {
                best = left;
            }
            if self.precedes(right, best) {
                best = right;
            }
            if best == slot {
                break;
            }
            self.swap(slot, best);
            slot = best;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(heap: &mut IndexedHeap) -> Vec<usize> {
        let mut out = Vec::new();
        while let Some(key) = heap.pop() {
            out.push(key);
        }
        out
    }

    #[test]
    fn pops_in_priority_order() {
        let mut heap = IndexedHeap::new();
        heap.push(1, 5.0);
        heap.push(2, 1.0);
        heap.push(3, 3.0);
        heap.push(4, 4.0);
        heap.push(5, 2.0);
        assert_eq!(drain(&mut heap), vec![2, 5, 3, 4, 1]);
        assert!(heap.is_empty());
    }

    #[test]
    fn ties_break_by_insertion_order() {
        let mut heap = IndexedHeap::new();
        heap.push(9, 1.0);
        heap.push(3, 1.0);
        heap.push(7, 1.0);
        assert_eq!(drain(&mut heap), vec![9, 3, 7]);
    }

    #[test]
    fn decrease_key_reorders() {
        let mut heap = IndexedHeap::new();
        heap.push(1, 10.0);
        heap.push(2, 20.0);
        heap.push(3, 30.0);
        assert!(heap.decrease(3, 5.0));
        assert_eq!(heap.pop(), Some(3));
    }

    #[test]
    fn decrease_rejects_higher_priority() {
        let mut heap = IndexedHeap::new();
        heap.push(1, 10.0);
        assert!(!heap.decrease(1, 11.0));
        assert!(!heap.decrease(42, 1.0));
    }

    #[test]
    fn infinite_priorities_sort_last() {
        let mut heap = IndexedHeap::new();
        heap.push(1, f64::INFINITY);
        heap.push(2, 0.0);
        assert_eq!(drain(&mut heap), vec![2, 1]);
    }

    #[test]
    fn contains_tracks_membership() {
        let mut heap = IndexedHeap::new();
        heap.push(4, 1.0);
        assert!(heap.contains(4));
        let _ = heap.pop();
        assert!(!heap.contains(4));
    }
}
