//! Fibonacci Heap implementation
//!
//! A Fibonacci heap is a data structure for priority queue operations with:
//! - O(1) insert and find-min
//! - O(log n) amortized extract-min
//!
//! The structure consists of a collection of heap-ordered trees. Roots are linked
//! in a circular doubly linked list. The heap maintains the minimum node pointer.
//!
//! Nodes live in a [`SlotMap`] arena. Every `left`, `right`, `parent` and
//! `child` link is a generational [`NodeKey`] into that arena, so ring surgery
//! is a sequence of key rewrites and a handle to an extracted node can be
//! detected instead of dangling.
//!
//! **Lazy insertion**: `insert` only splices a singleton into the root ring.
//! All structural cleanup is deferred to `extract_min`, which promotes the
//! children of the removed minimum and then consolidates the root ring so that
//! no two roots share a degree.

use crate::traits::{Handle, Heap, HeapError};
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::fmt;
use tracing::{debug, trace};

new_key_type! {
    /// Arena key for a Fibonacci heap node
    struct NodeKey;
}

/// Handle to an element in a Fibonacci heap
///
/// Handles stay cheap to copy and are checked against the arena on use: once
/// the element is extracted, lookups through the handle report
/// [`HeapError::InvalidHandle`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct FibonacciHandle {
    node: NodeKey,
}

impl Handle for FibonacciHandle {}

struct Node<K> {
    key: K,
    /// Number of children in this node's child ring
    degree: usize,
    parent: Option<NodeKey>,
    /// Entry point into the circular child ring
    child: Option<NodeKey>,
    left: NodeKey,
    right: NodeKey,
}

/// Fibonacci Heap
///
/// # Example
///
/// ```rust
/// use mergeable_heaps::fibonacci::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// let handle = heap.insert(5);
/// heap.insert(3);
/// assert_eq!(heap.find_min(), Some(&3));
/// assert_eq!(heap.get(&handle), Ok(&5));
/// assert_eq!(heap.extract_min(), Some(3));
/// ```
pub struct FibonacciHeap<K> {
    nodes: SlotMap<NodeKey, Node<K>>,
    min: Option<NodeKey>,
    len: usize,
}

impl<K: Ord> Heap<K> for FibonacciHeap<K> {
    fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            min: None,
            len: 0,
        }
    }

    fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    fn len(&self) -> usize {
        self.len
    }

    fn push(&mut self, key: K) {
        self.insert(key);
    }

    fn peek(&self) -> Option<&K> {
        self.find_min()
    }

    fn pop(&mut self) -> Option<K> {
        self.extract_min()
    }
}

impl<K: Ord> FibonacciHeap<K> {
    /// Creates a new empty heap
    pub fn new() -> Self {
        <Self as Heap<K>>::new()
    }

    /// Returns true if the heap holds no keys
    pub fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    /// Returns the number of keys in the heap
    pub fn len(&self) -> usize {
        self.len
    }

    /// Inserts a key, returning a handle to its node
    ///
    /// **Time Complexity**: O(1)
    ///
    /// The new singleton is spliced into the root ring to the right of the
    /// current minimum. No consolidation happens here.
    pub fn insert(&mut self, key: K) -> FibonacciHandle {
        let node = self.nodes.insert_with_key(|node| Node {
            key,
            degree: 0,
            parent: None,
            child: None,
            left: node,
            right: node,
        });

        match self.min {
            Some(min) => {
                self.splice_after(min, node);
                if self.nodes[node].key < self.nodes[min].key {
                    self.min = Some(node);
                }
            }
            None => self.min = Some(node),
        }

        self.len += 1;
        FibonacciHandle { node }
    }

    /// Returns the minimum key without removing it
    ///
    /// **Time Complexity**: O(1)
    pub fn find_min(&self) -> Option<&K> {
        self.min.map(|min| &self.nodes[min].key)
    }

    /// Removes and returns the minimum key
    ///
    /// **Time Complexity**: O(log n) amortized
    ///
    /// **Algorithm**:
    /// 1. Splice every child of the minimum into the root ring, clearing parents
    /// 2. Unlink the minimum from the root ring
    /// 3. If other roots remain, point `min` at the former right neighbour and
    ///    consolidate, which also recomputes the true minimum
    pub fn extract_min(&mut self) -> Option<K> {
        let min = self.min?;

        if let Some(first) = self.nodes[min].child.take() {
            let mut current = first;
            loop {
                let next = self.nodes[current].right;
                self.nodes[current].parent = None;
                self.splice_after(min, current);
                if next == first {
                    break;
                }
                current = next;
            }
        }

        let right = self.nodes[min].right;
        if right == min {
            self.min = None;
        } else {
            self.unlink(min);
            self.min = Some(right);
        }

        let removed = self.nodes.remove(min);
        self.len -= 1;

        if self.min.is_some() {
            self.consolidate();
        }

        removed.map(|node| node.key)
    }

    /// Looks up the key behind a handle
    ///
    /// Returns [`HeapError::InvalidHandle`] once the element has been extracted.
    pub fn get(&self, handle: &FibonacciHandle) -> Result<&K, HeapError> {
        self.nodes
            .get(handle.node)
            .map(|node| &node.key)
            .ok_or(HeapError::InvalidHandle)
    }

    /// Returns true if the handle's element is still in the heap
    pub fn contains(&self, handle: &FibonacciHandle) -> bool {
        self.nodes.contains_key(handle.node)
    }

    /// Returns whether the handle's node currently sits in the root ring
    ///
    /// `None` if the element has been extracted.
    pub fn is_root(&self, handle: &FibonacciHandle) -> Option<bool> {
        self.nodes.get(handle.node).map(|node| node.parent.is_none())
    }

    /// Returns the number of trees in the root ring
    pub fn root_count(&self) -> usize {
        self.min.map_or(0, |min| self.ring(min).count())
    }

    /// Removes every key from the heap
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.min = None;
        self.len = 0;
    }

    /// Checks every structural invariant by walking the whole forest
    ///
    /// Verifies ring integrity (`left.right == node` and `right.left == node`),
    /// heap order, that each degree matches its child ring, parent links,
    /// that `min` references the smallest root, and that the reachable node
    /// count matches `len()`.
    pub fn validate(&self) -> Result<(), HeapError> {
        let Some(min) = self.min else {
            if self.len != 0 || !self.nodes.is_empty() {
                return Err(HeapError::LengthMismatch {
                    recorded: self.len,
                    actual: 0,
                });
            }
            return Ok(());
        };

        let roots = self.checked_ring(min)?;
        let min_key = &self.nodes[min].key;
        for &root in &roots {
            let node = &self.nodes[root];
            if node.parent.is_some() {
                return Err(HeapError::ParentMismatch);
            }
            if node.key < *min_key {
                return Err(HeapError::StaleMinimum);
            }
        }

        let mut reachable = 0;
        let mut stack = roots;
        while let Some(current) = stack.pop() {
            reachable += 1;
            let node = &self.nodes[current];
            let children = match node.child {
                Some(child) => self.checked_ring(child)?,
                None => Vec::new(),
            };
            if children.len() != node.degree {
                return Err(HeapError::DegreeMismatch {
                    recorded: node.degree,
                    actual: children.len(),
                });
            }
            for &child in &children {
                let child_node = &self.nodes[child];
                if child_node.parent != Some(current) {
                    return Err(HeapError::ParentMismatch);
                }
                if child_node.key < node.key {
                    return Err(HeapError::HeapOrder);
                }
            }
            stack.extend(children);
        }

        if reachable != self.len || self.len != self.nodes.len() {
            return Err(HeapError::LengthMismatch {
                recorded: self.len,
                actual: reachable,
            });
        }
        Ok(())
    }

    /// Merges same-degree roots until every root degree is unique
    ///
    /// The ring is snapshotted first because linking rewrites it. Each root is
    /// then carried up through a degree table: whenever the slot for its
    /// degree is occupied the two trees are linked and the search moves one
    /// degree higher. The surviving trees form the new root ring, and the
    /// minimum is recomputed while rebuilding it.
    ///
    /// Tie-break: a root already in the table keeps parenthood unless the
    /// incoming root's key is strictly smaller.
    fn consolidate(&mut self) {
        let Some(start) = self.min else {
            return;
        };

        let roots: SmallVec<[NodeKey; 16]> = self.ring(start).collect();
        let roots_before = roots.len();
        let mut by_degree: SmallVec<[Option<NodeKey>; 32]> = SmallVec::new();

        for root in roots {
            let mut tree = root;
            let mut degree = self.nodes[tree].degree;
            loop {
                if degree >= by_degree.len() {
                    by_degree.resize(degree + 1, None);
                }
                let Some(other) = by_degree[degree].take() else {
                    break;
                };
                let (parent, child) = if self.nodes[tree].key < self.nodes[other].key {
                    (tree, other)
                } else {
                    (other, tree)
                };
                self.link(child, parent);
                tree = parent;
                degree += 1;
            }
            by_degree[degree] = Some(tree);
        }

        self.min = None;
        let mut roots_after = 0;
        for root in by_degree.into_iter().flatten() {
            roots_after += 1;
            match self.min {
                Some(min) => {
                    self.splice_after(min, root);
                    if self.nodes[root].key < self.nodes[min].key {
                        self.min = Some(root);
                    }
                }
                None => {
                    let node = &mut self.nodes[root];
                    node.left = root;
                    node.right = root;
                    self.min = Some(root);
                }
            }
        }

        debug!(roots_before, roots_after, len = self.len, "consolidated root ring");
    }

    /// Makes `child` a child of `parent`
    ///
    /// Detaches `child` from its current ring, splices it into the child ring
    /// of `parent` (starting one if `parent` is a leaf) and bumps the degree.
    /// Keys are not inspected; the caller has already chosen the parent.
    fn link(&mut self, child: NodeKey, parent: NodeKey) {
        self.unlink(child);
        match self.nodes[parent].child {
            Some(first) => self.splice_after(first, child),
            None => self.nodes[parent].child = Some(child),
        }
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].degree += 1;
        trace!(degree = self.nodes[parent].degree, "linked tree under smaller root");
    }

    /// Inserts `node` into the ring holding `anchor`, directly to its right
    fn splice_after(&mut self, anchor: NodeKey, node: NodeKey) {
        let right = self.nodes[anchor].right;
        {
            let inserted = &mut self.nodes[node];
            inserted.left = anchor;
            inserted.right = right;
        }
        self.nodes[right].left = node;
        self.nodes[anchor].right = node;
    }

    /// Removes `node` from its ring, leaving it as a singleton ring
    fn unlink(&mut self, node: NodeKey) {
        let (left, right) = {
            let removed = &self.nodes[node];
            (removed.left, removed.right)
        };
        self.nodes[left].right = right;
        self.nodes[right].left = left;
        let removed = &mut self.nodes[node];
        removed.left = node;
        removed.right = node;
    }

    /// Iterates a ring starting at `start`, following `right` links
    fn ring(&self, start: NodeKey) -> Ring<'_, K> {
        Ring {
            nodes: &self.nodes,
            start,
            next: Some(start),
        }
    }

    /// Collects a ring while checking link consistency and termination
    fn checked_ring(&self, start: NodeKey) -> Result<Vec<NodeKey>, HeapError> {
        let mut members = Vec::new();
        let mut current = start;
        loop {
            let node = self.nodes.get(current).ok_or(HeapError::BrokenRing)?;
            let left = self.nodes.get(node.left).ok_or(HeapError::BrokenRing)?;
            let right = self.nodes.get(node.right).ok_or(HeapError::BrokenRing)?;
            if left.right != current || right.left != current {
                return Err(HeapError::BrokenRing);
            }
            members.push(current);
            if members.len() > self.nodes.len() {
                return Err(HeapError::BrokenRing);
            }
            current = node.right;
            if current == start {
                return Ok(members);
            }
        }
    }
}

/// Iterator over the members of one circular ring
struct Ring<'a, K> {
    nodes: &'a SlotMap<NodeKey, Node<K>>,
    start: NodeKey,
    next: Option<NodeKey>,
}

impl<K> Iterator for Ring<'_, K> {
    type Item = NodeKey;

    fn next(&mut self) -> Option<NodeKey> {
        let current = self.next?;
        let right = self.nodes[current].right;
        self.next = (right != self.start).then_some(right);
        Some(current)
    }
}

impl<K: Ord> Default for FibonacciHeap<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> Extend<K> for FibonacciHeap<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord> FromIterator<K> for FibonacciHeap<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut heap = Self::new();
        heap.extend(iter);
        heap
    }
}

impl<K: Ord + fmt::Debug> fmt::Debug for FibonacciHeap<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FibonacciHeap")
            .field("len", &self.len)
            .field("roots", &self.root_count())
            .field("min", &self.find_min())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        let mut heap = FibonacciHeap::new();
        assert!(heap.is_empty());
        assert_eq!(heap.len(), 0);

        heap.insert(5);
        heap.insert(3);
        heap.insert(7);

        assert_eq!(heap.len(), 3);
        assert_eq!(heap.find_min(), Some(&3));

        assert_eq!(heap.extract_min(), Some(3));
        assert_eq!(heap.find_min(), Some(&5));
        heap.validate().unwrap();
    }

    #[test]
    fn test_empty_heap() {
        let mut heap: FibonacciHeap<i32> = FibonacciHeap::new();
        assert_eq!(heap.find_min(), None);
        assert_eq!(heap.extract_min(), None);
        assert_eq!(heap.root_count(), 0);
        heap.validate().unwrap();
    }

    #[test]
    fn test_insert_is_lazy() {
        let mut heap = FibonacciHeap::new();
        for key in [9, 4, 7, 1, 8] {
            heap.insert(key);
        }
        // Nothing is linked until an extraction happens
        assert_eq!(heap.root_count(), 5);
        heap.validate().unwrap();

        assert_eq!(heap.extract_min(), Some(1));
        // Four roots of degree 0 collapse into one tree of degree 2
        assert_eq!(heap.root_count(), 1);
        heap.validate().unwrap();
    }

    #[test]
    fn test_consolidation_leaves_unique_degrees() {
        let mut heap: FibonacciHeap<i32> = (0..33).rev().collect();
        assert_eq!(heap.extract_min(), Some(0));
        // 32 remaining nodes consolidate into a single degree-5 tree
        assert_eq!(heap.root_count(), 1);

        assert_eq!(heap.extract_min(), Some(1));
        // 31 = 16 + 8 + 4 + 2 + 1
        assert_eq!(heap.root_count(), 5);
        heap.validate().unwrap();
    }

    #[test]
    fn test_handles_track_extraction() {
        let mut heap = FibonacciHeap::new();
        let h1 = heap.insert(10);
        let h2 = heap.insert(20);

        assert_eq!(heap.get(&h1), Ok(&10));
        assert_eq!(heap.is_root(&h2), Some(true));

        assert_eq!(heap.extract_min(), Some(10));
        assert!(!heap.contains(&h1));
        assert_eq!(heap.get(&h1), Err(HeapError::InvalidHandle));
        assert_eq!(heap.is_root(&h1), None);
        assert_eq!(heap.get(&h2), Ok(&20));
    }

    #[test]
    fn test_stale_handle_not_confused_with_reused_slot() {
        let mut heap = FibonacciHeap::new();
        let old = heap.insert(1);
        assert_eq!(heap.extract_min(), Some(1));

        let new = heap.insert(2);
        assert_ne!(old, new);
        assert_eq!(heap.get(&old), Err(HeapError::InvalidHandle));
        assert_eq!(heap.get(&new), Ok(&2));
    }

    #[test]
    fn test_equal_keys_leave_one_root() {
        let mut heap = FibonacciHeap::new();
        heap.insert(0);
        let a = heap.insert(5);
        let b = heap.insert(5);

        assert_eq!(heap.extract_min(), Some(0));
        assert_eq!(heap.root_count(), 1);
        let roots = [heap.is_root(&a), heap.is_root(&b)];
        assert!(roots.contains(&Some(true)));
        assert!(roots.contains(&Some(false)));
        heap.validate().unwrap();
    }

    #[test]
    fn test_children_promoted_on_extract() {
        let mut heap: FibonacciHeap<i32> = [4, 2, 6, 1, 3, 5, 7, 0].into_iter().collect();
        assert_eq!(heap.extract_min(), Some(0));
        // 7 nodes consolidate to degrees 0, 1, 2
        assert_eq!(heap.root_count(), 3);
        heap.validate().unwrap();

        // Extracting a degree-2 root pushes its children back into the ring
        assert_eq!(heap.extract_min(), Some(1));
        heap.validate().unwrap();
        assert_eq!(heap.len(), 6);
    }

    #[test]
    fn test_clear() {
        let mut heap: FibonacciHeap<i32> = (0..10).collect();
        let handle = heap.insert(42);
        heap.extract_min();
        heap.clear();
        assert!(heap.is_empty());
        assert_eq!(heap.len(), 0);
        assert!(!heap.contains(&handle));
        heap.validate().unwrap();
    }
}
