//! Max-priority wrapper
//!
//! Turns the min-oriented [`SimpleBinaryHeap`] into a max-heap by storing
//! every key wrapped in [`Reverse`], which inverts the ordering the same way
//! negating a numeric key would.
//!
//! It carries no algorithm of its own and exists as a reference: extracting
//! everything from a `MaxHeap` filled with negated keys must produce the
//! negation of what the forests produce.
//!
//! # Example
//!
//! ```rust
//! use mergeable_heaps::max_heap::MaxHeap;
//!
//! let mut heap = MaxHeap::new();
//! heap.push(5);
//! heap.push(10);
//! heap.push(1);
//! assert_eq!(heap.peek(), Some(&10));
//! assert_eq!(heap.pop(), Some(10));
//! assert_eq!(heap.len(), 2);
//! ```

use crate::simple_binary::SimpleBinaryHeap;
use crate::traits::Heap;
use std::cmp::Reverse;
use std::fmt;

/// A max-heap delegating to a [`SimpleBinaryHeap`] of reversed keys
#[derive(Debug, Clone)]
pub struct MaxHeap<K: Ord> {
    heap: SimpleBinaryHeap<Reverse<K>>,
}

impl<K: Ord> MaxHeap<K> {
    /// Creates a new empty heap
    pub fn new() -> Self {
        Self {
            heap: SimpleBinaryHeap::new(),
        }
    }

    /// Builds a heap from existing keys in O(n)
    pub fn from_vec(data: Vec<K>) -> Self {
        Self {
            heap: SimpleBinaryHeap::from_vec(data.into_iter().map(Reverse).collect()),
        }
    }

    /// Returns true if the heap is empty
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns the number of keys in the heap
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Pushes a key onto the heap
    pub fn push(&mut self, key: K) {
        self.heap.push(Reverse(key));
    }

    /// Returns the largest key without removing it
    pub fn peek(&self) -> Option<&K> {
        self.heap.peek().map(|Reverse(key)| key)
    }

    /// Removes and returns the largest key
    pub fn pop(&mut self) -> Option<K> {
        self.heap.pop().map(|Reverse(key)| key)
    }
}

impl<K: Ord> Default for MaxHeap<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> Extend<K> for MaxHeap<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.push(key);
        }
    }
}

/// Lists the keys in heap layout order, largest first, e.g. `[10, 8, 5, 1, 3]`
impl<K: Ord + fmt::Display> fmt::Display for MaxHeap<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, Reverse(key)) in self.heap.as_slice().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key}")?;
        }
        write!(f, "]")
    }
}
