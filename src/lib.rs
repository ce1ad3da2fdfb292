//! Mergeable Priority Queues for Rust
//!
//! This crate provides two forest-based min-heaps that implement the same
//! contract with different amortized-cost tradeoffs.
//!
//! # Features
//!
//! - **Fibonacci Heap**: O(1) insert and find-min; O(log n) amortized extract-min
//! - **Binomial Heap**: O(log n) insert, find-min, extract-min and union
//! - **Simple Binary Heap**: array-backed baseline, plus a [`max_heap::MaxHeap`]
//!   wrapper built on it
//!
//! Finding or extracting the minimum of an empty heap yields `None`.
//!
//! # Example
//!
//! ```rust
//! use mergeable_heaps::fibonacci::FibonacciHeap;
//! use mergeable_heaps::binomial::BinomialHeap;
//! use mergeable_heaps::Heap;
//!
//! let mut fib = FibonacciHeap::new();
//! let mut binomial = BinomialHeap::new();
//! for key in [5, 3, 8, 1, 10] {
//!     fib.push(key);
//!     binomial.push(key);
//! }
//! assert_eq!(fib.pop(), Some(1));
//! assert_eq!(binomial.pop(), Some(1));
//! ```

pub mod binomial;
pub mod fibonacci;
pub mod max_heap;
pub mod simple_binary;
pub mod traits;

// Re-export the main traits for convenience
pub use traits::{Handle, Heap, HeapError, MergeableHeap};
