//! Simple Binary Heap implementation
//!
//! A straightforward array-backed binary min-heap. It serves as the plain
//! baseline the forests are checked against, and as the primitive behind
//! [`MaxHeap`](crate::max_heap::MaxHeap).
//!
//! # Time Complexity
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | `push`    | O(log n)   |
//! | `pop`     | O(log n)   |
//! | `peek`    | O(1)       |
//! | `merge`   | O(m log(n + m)) |
//! | `from_vec`| O(n)       |
//!
//! # Example
//!
//! ```rust
//! use mergeable_heaps::Heap;
//! use mergeable_heaps::simple_binary::SimpleBinaryHeap;
//!
//! let mut heap = SimpleBinaryHeap::new();
//! heap.push(3);
//! heap.push(1);
//! heap.push(2);
//!
//! assert_eq!(heap.peek(), Some(&1));
//! assert_eq!(heap.pop(), Some(1));
//! assert_eq!(heap.pop(), Some(2));
//! assert_eq!(heap.pop(), Some(3));
//! assert_eq!(heap.pop(), None);
//! ```

use crate::traits::{Heap, MergeableHeap};

/// A simple binary min-heap
#[derive(Debug, Clone)]
pub struct SimpleBinaryHeap<K: Ord> {
    /// Keys in implicit binary-tree layout: children of `i` are `2i+1`, `2i+2`
    data: Vec<K>,
}

impl<K: Ord> Heap<K> for SimpleBinaryHeap<K> {
    fn new() -> Self {
        Self { data: Vec::new() }
    }

    fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn push(&mut self, key: K) {
        self.data.push(key);
        self.sift_up(self.data.len() - 1);
    }

    fn peek(&self) -> Option<&K> {
        self.data.first()
    }

    fn pop(&mut self) -> Option<K> {
        if self.data.is_empty() {
            return None;
        }

        let last_idx = self.data.len() - 1;
        self.data.swap(0, last_idx);
        let result = self.data.pop();

        if !self.data.is_empty() {
            self.sift_down(0);
        }

        result
    }
}

impl<K: Ord> MergeableHeap<K> for SimpleBinaryHeap<K> {
    fn merge(&mut self, other: Self) {
        for key in other.data {
            self.push(key);
        }
    }
}

impl<K: Ord> SimpleBinaryHeap<K> {
    /// Builds a heap from arbitrary keys in O(n) by sifting down every
    /// internal node, last first
    pub fn from_vec(data: Vec<K>) -> Self {
        let mut heap = Self { data };
        for index in (0..heap.data.len() / 2).rev() {
            heap.sift_down(index);
        }
        heap
    }

    /// Returns the keys in heap order (the implicit binary-tree layout)
    pub fn as_slice(&self) -> &[K] {
        &self.data
    }

    /// Consumes the heap, returning the keys in heap order
    pub fn into_vec(self) -> Vec<K> {
        self.data
    }

    /// Move element at index up to maintain heap property
    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.data[index] < self.data[parent] {
                self.data.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    /// Move element at index down to maintain heap property
    fn sift_down(&mut self, mut index: usize) {
        let len = self.data.len();
        loop {
            let left = 2 * index + 1;
            let right = 2 * index + 2;
            let mut smallest = index;

            if left < len && self.data[left] < self.data[smallest] {
                smallest = left;
            }
            if right < len && self.data[right] < self.data[smallest] {
                smallest = right;
            }

            if smallest != index {
                self.data.swap(index, smallest);
                index = smallest;
            } else {
                break;
            }
        }
    }
}

impl<K: Ord> Default for SimpleBinaryHeap<K> {
    fn default() -> Self {
        Self::new()
    }
}
