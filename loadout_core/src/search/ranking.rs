//! Bounded top-K accumulator
//!
//! Entries are ordered by score, then by enumeration index, so keeping the
//! K greatest entries gives exactly the tail of a stable ascending sort of
//! everything evaluated, no matter how the work was split.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

#[derive(Debug, Clone)]
struct Entry<T> {
    score: f64,
    index: u64,
    value: T,
}

impl<T> Entry<T> {
    fn key_cmp(&self, score: f64, index: u64) -> Ordering {
        self.score
            .total_cmp(&score)
            .then_with(|| self.index.cmp(&index))
    }
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key_cmp(other.score, other.index)
    }
}

/// Keeps the `capacity` highest-scoring values seen
#[derive(Debug, Clone)]
pub struct TopK<T> {
    capacity: usize,
    // Min-heap: the root is the weakest kept entry
    heap: BinaryHeap<Reverse<Entry<T>>>,
}

impl<T> TopK<T> {
    pub fn new(capacity: usize) -> Self {
        TopK {
            capacity,
            heap: BinaryHeap::with_capacity(capacity.saturating_add(1).min(1024)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Whether a value with this key would be kept
    pub fn accepts(&self, score: f64, index: u64) -> bool {
        if self.capacity == 0 {
            return false;
        }
        if self.heap.len() < self.capacity {
            return true;
        }
        match self.heap.peek() {
            Some(Reverse(weakest)) => weakest.key_cmp(score, index) == Ordering::Less,
            None => true,
        }
    }

    /// Offer a value; returns whether it was kept
    pub fn push(&mut self, score: f64, index: u64, value: T) -> bool {
        if !self.accepts(score, index) {
            return false;
        }
        self.heap.push(Reverse(Entry { score, index, value }));
        if self.heap.len() > self.capacity {
            self.heap.pop();
        }
        true
    }

    /// Fold another accumulator into this one
    pub fn merge(&mut self, other: TopK<T>) {
        for Reverse(entry) in other.heap {
            self.push(entry.score, entry.index, entry.value);
        }
    }

    /// Kept values in ascending order, best last
    pub fn into_sorted_vec(self) -> Vec<T> {
        let mut entries: Vec<Entry<T>> = self.heap.into_iter().map(|Reverse(e)| e).collect();
        entries.sort();
        entries.into_iter().map(|e| e.value).collect()
    }
}
