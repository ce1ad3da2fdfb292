//! Common traits for mergeable heap data structures
//!
//! This module provides a two-tier trait hierarchy:
//!
//! - [`Heap`]: Base trait for min-heaps over a totally ordered key
//! - [`MergeableHeap`]: Extended trait adding union of two heaps
//!
//! Finding or extracting the minimum of an empty heap is reported as `None`,
//! never as a sentinel key.

use thiserror::Error;

/// Error type for heap operations
///
/// `InvalidHandle` is returned by handle lookups. The remaining variants are
/// reported by the `validate` methods when a structural invariant is broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeapError {
    /// The handle no longer refers to a node (its key was extracted)
    #[error("handle is no longer valid (element was removed)")]
    InvalidHandle,
    /// A child key is smaller than its parent's key
    #[error("heap order violated: a child is smaller than its parent")]
    HeapOrder,
    /// A sibling ring or chain is not closed or not doubly consistent
    #[error("sibling links are inconsistent")]
    BrokenRing,
    /// A node's degree does not match the children reachable from it
    #[error("degree {recorded} recorded but {actual} children found")]
    DegreeMismatch { recorded: usize, actual: usize },
    /// A node's parent link does not point at the node holding it
    #[error("parent link does not match the owning node")]
    ParentMismatch,
    /// Two roots share the same degree
    #[error("two roots share degree {0}")]
    DuplicateRootDegree(usize),
    /// Root degrees are not strictly ascending along the root list
    #[error("root degrees are not ascending")]
    RootDegreeOrder,
    /// The cached minimum is not the smallest root
    #[error("minimum pointer does not reference the smallest root")]
    StaleMinimum,
    /// The element count disagrees with the reachable node count
    #[error("length {recorded} recorded but {actual} nodes reachable")]
    LengthMismatch { recorded: usize, actual: usize },
}

/// A handle to an element in the heap
///
/// This is an opaque type that identifies a specific element in the heap.
pub trait Handle: Clone + PartialEq + Eq {}

/// Base trait for min-heap data structures
///
/// The API mirrors Rust's `BinaryHeap`, except that these heaps are
/// min-oriented: `push` inserts a key, `peek` returns the smallest key and
/// `pop` removes it.
///
/// # Example
///
/// ```rust
/// use mergeable_heaps::Heap;
/// use mergeable_heaps::fibonacci::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// heap.push(3);
/// heap.push(1);
/// heap.push(2);
///
/// assert_eq!(heap.peek(), Some(&1));
/// assert_eq!(heap.pop(), Some(1));
/// ```
pub trait Heap<K: Ord> {
    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of keys in the heap
    fn len(&self) -> usize;

    /// Inserts a key
    ///
    /// # Time Complexity
    /// O(1) for the Fibonacci heap, O(log n) for the binomial and binary heaps.
    fn push(&mut self, key: K);

    /// Returns the minimum key without removing it, or `None` if empty
    ///
    /// # Time Complexity
    /// O(1) for the Fibonacci and binary heaps, O(log n) for the binomial heap.
    fn peek(&self) -> Option<&K>;

    /// Removes and returns the minimum key, or `None` if empty
    ///
    /// # Time Complexity
    /// O(log n), amortized for the Fibonacci heap.
    fn pop(&mut self) -> Option<K>;
}

/// Heaps that support union with another heap of the same type
///
/// # Example
///
/// ```rust
/// use mergeable_heaps::{Heap, MergeableHeap};
/// use mergeable_heaps::binomial::BinomialHeap;
///
/// let mut a = BinomialHeap::new();
/// a.push(10);
/// a.push(20);
///
/// let mut b = BinomialHeap::new();
/// b.push(5);
/// b.push(15);
///
/// a.merge(b);
/// assert_eq!(a.len(), 4);
/// assert_eq!(a.pop(), Some(5));
/// ```
pub trait MergeableHeap<K: Ord>: Heap<K> {
    /// Merges another heap into this one, consuming the other heap
    ///
    /// # Time Complexity
    /// O(log n) for the binomial heap, O(m log(n + m)) for the binary heap.
    fn merge(&mut self, other: Self);
}
