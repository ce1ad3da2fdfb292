//! Binomial Heap implementation
//!
//! A binomial heap is a collection of binomial trees with:
//! - O(log n) insert, find-min and extract-min
//! - O(log n) union
//!
//! # Algorithm Overview
//!
//! A binomial heap maintains a singly linked root list of binomial trees, where:
//! - Each tree satisfies the heap property
//! - Root degrees are strictly ascending, so at most one tree per degree
//! - This is analogous to the binary representation of n
//!
//! **Binomial Tree Bₖ**: Recursively defined:
//! - B₀ is a single node
//! - Bₖ is formed by linking two B_{k-1} trees
//! - Bₖ has exactly 2ᵏ nodes, and its children have degrees k-1, k-2, ..., 0
//!
//! **Key Operations**: everything is built on [`BinomialHeap::union`]:
//! - **Insert**: union with a single-node heap
//! - **Extract-min**: unlink the minimum root, reverse its child chain into a
//!   root list, and union that back in
//! - **Union**: merge both root lists by degree, then link equal-degree
//!   neighbours like carries in binary addition
//!
//! There is no cached minimum pointer; find-min scans the O(log n) roots.

use crate::traits::{Heap, HeapError, MergeableHeap};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::{debug, trace};

/// Type alias for node reference (strong reference)
type NodeRef<K> = Rc<RefCell<Node<K>>>;

/// Type alias for optional node reference
type NodePtr<K> = Option<NodeRef<K>>;

/// Type alias for weak node reference (for parent links)
type WeakNodeRef<K> = Weak<RefCell<Node<K>>>;

/// Internal node structure for binomial heap
///
/// **Memory Model**: Strong references flow from roots downward (child, sibling).
/// Weak references flow upward (parent) to avoid reference cycles.
///
/// The child chain starts at the highest-degree child and descends to degree 0.
/// The root list runs the other way, from the lowest degree upward.
struct Node<K> {
    key: K,
    /// Parent node - weak reference to avoid cycles (None if root)
    parent: Option<WeakNodeRef<K>>,
    /// Highest-degree child (None if leaf)
    child: NodePtr<K>,
    /// Next node in the root list or in the parent's child chain
    sibling: NodePtr<K>,
    /// Number of children; a Bₖ root has degree k
    degree: usize,
}

/// Binomial Heap
///
/// # Example
///
/// ```rust
/// use mergeable_heaps::binomial::BinomialHeap;
///
/// let mut a = BinomialHeap::new();
/// a.insert(10);
/// a.insert(20);
///
/// let mut b = BinomialHeap::new();
/// b.insert(5);
/// b.insert(15);
/// b.insert(30);
///
/// let mut heap = a.union(b);
/// assert_eq!(heap.get_min(), Some(&5));
/// assert_eq!(heap.extract_min(), Some(5));
/// assert_eq!(heap.extract_min(), Some(10));
/// ```
pub struct BinomialHeap<K> {
    /// Lowest-degree root
    head: NodePtr<K>,
}

// No manual Drop needed - Rc handles cleanup automatically when strong refs go to 0

impl<K: Ord> Heap<K> for BinomialHeap<K> {
    fn new() -> Self {
        Self { head: None }
    }

    fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    fn len(&self) -> usize {
        BinomialHeap::len(self)
    }

    fn push(&mut self, key: K) {
        self.insert(key);
    }

    fn peek(&self) -> Option<&K> {
        self.get_min()
    }

    fn pop(&mut self) -> Option<K> {
        self.extract_min()
    }
}

impl<K: Ord> MergeableHeap<K> for BinomialHeap<K> {
    /// Merges another heap into this heap
    ///
    /// **Time Complexity**: O(log n) worst-case
    fn merge(&mut self, mut other: Self) {
        self.head = Self::union_root_lists(self.head.take(), other.head.take());
    }
}

impl<K: Ord> BinomialHeap<K> {
    /// Creates a new empty heap
    pub fn new() -> Self {
        <Self as Heap<K>>::new()
    }

    /// Returns true if the heap holds no keys
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns the number of keys in the heap
    ///
    /// Derived from the root list: a root of degree k carries 2ᵏ keys.
    pub fn len(&self) -> usize {
        self.roots().map(|root| 1usize << root.borrow().degree).sum()
    }

    /// Returns the degrees along the root list, lowest first
    pub fn root_degrees(&self) -> Vec<usize> {
        self.roots().map(|root| root.borrow().degree).collect()
    }

    /// Inserts a new key
    ///
    /// **Time Complexity**: O(log n) worst-case, O(1) when no carry occurs
    ///
    /// The key is wrapped as a B₀ tree and unioned with the current roots.
    pub fn insert(&mut self, key: K) {
        let node = Rc::new(RefCell::new(Node {
            key,
            parent: None,
            child: None,
            sibling: None,
            degree: 0,
        }));
        self.head = Self::union_root_lists(self.head.take(), Some(node));
    }

    /// Returns the minimum key by scanning the root list
    ///
    /// **Time Complexity**: O(log n)
    pub fn get_min(&self) -> Option<&K> {
        let mut best = self.head.clone()?;
        let mut current = best.borrow().sibling.clone();
        while let Some(node) = current {
            if node.borrow().key < best.borrow().key {
                best = Rc::clone(&node);
            }
            current = node.borrow().sibling.clone();
        }

        // SAFETY: The node is kept alive by the root list owned by `self`, and
        // the returned reference borrows `self` immutably, so no method can
        // relink or mutably borrow the node while the reference exists.
        let node_ptr = best.as_ptr();
        unsafe { Some(&(*node_ptr).key) }
    }

    /// Removes and returns the minimum key
    ///
    /// **Time Complexity**: O(log n) worst-case
    ///
    /// **Algorithm**:
    /// 1. Find the minimum root and unlink it from the root list
    /// 2. Reverse its child chain: children are stored highest degree first,
    ///    but a root list must run lowest degree first
    /// 3. Union the reversed children back into the remaining roots
    pub fn extract_min(&mut self) -> Option<K> {
        let min = self.detach_min()?;

        let mut children: NodePtr<K> = None;
        let mut promoted = 0usize;
        let mut child = min.borrow_mut().child.take();
        while let Some(node) = child {
            {
                let mut node_ref = node.borrow_mut();
                child = node_ref.sibling.take();
                node_ref.sibling = children;
                node_ref.parent = None;
            }
            children = Some(node);
            promoted += 1;
        }

        self.head = Self::union_root_lists(self.head.take(), children);
        debug!(promoted, "unioned children of extracted minimum");

        // The root list no longer references `min` and its children only hold
        // weak parent links, so this is the last strong reference.
        let node = Rc::try_unwrap(min)
            .ok()
            .expect("min node should have no other strong references")
            .into_inner();
        Some(node.key)
    }

    /// Unions two heaps, consuming both
    ///
    /// **Time Complexity**: O(log n) worst-case
    pub fn union(mut self, mut other: Self) -> Self {
        Self {
            head: Self::union_root_lists(self.head.take(), other.head.take()),
        }
    }

    /// Removes every key from the heap
    pub fn clear(&mut self) {
        self.head = None;
    }

    /// Checks every structural invariant by walking the whole forest
    ///
    /// Verifies strictly ascending root degrees, heap order, binomial shape
    /// (a degree-k node has children of degrees k-1 down to 0) and parent links.
    pub fn validate(&self) -> Result<(), HeapError> {
        let mut last_degree: Option<usize> = None;
        let mut pending: Vec<NodeRef<K>> = Vec::new();

        for root in self.roots() {
            let root_ref = root.borrow();
            if root_ref.parent.is_some() {
                return Err(HeapError::ParentMismatch);
            }
            match last_degree {
                Some(last) if last == root_ref.degree => {
                    return Err(HeapError::DuplicateRootDegree(last));
                }
                Some(last) if last > root_ref.degree => return Err(HeapError::RootDegreeOrder),
                _ => {}
            }
            last_degree = Some(root_ref.degree);
            drop(root_ref);
            pending.push(root);
        }

        let mut reachable = 0usize;
        while let Some(node) = pending.pop() {
            reachable += 1;
            let node_ref = node.borrow();
            let mut expected = node_ref.degree;
            let mut current = node_ref.child.clone();
            while let Some(child) = current {
                let child_ref = child.borrow();
                let owner = child_ref.parent.as_ref().and_then(Weak::upgrade);
                if !owner.is_some_and(|owner| Rc::ptr_eq(&owner, &node)) {
                    return Err(HeapError::ParentMismatch);
                }
                if child_ref.key < node_ref.key {
                    return Err(HeapError::HeapOrder);
                }
                if expected == 0 || child_ref.degree != expected - 1 {
                    return Err(HeapError::DegreeMismatch {
                        recorded: node_ref.degree,
                        actual: node_ref.degree - expected + 1,
                    });
                }
                expected -= 1;
                current = child_ref.sibling.clone();
                drop(child_ref);
                pending.push(child);
            }
            if expected != 0 {
                return Err(HeapError::DegreeMismatch {
                    recorded: node_ref.degree,
                    actual: node_ref.degree - expected,
                });
            }
        }

        let recorded = self.len();
        if reachable != recorded {
            return Err(HeapError::LengthMismatch {
                recorded,
                actual: reachable,
            });
        }
        Ok(())
    }

    /// Finds the minimum root and unlinks it from the root list
    fn detach_min(&mut self) -> Option<NodeRef<K>> {
        let mut min = self.head.clone()?;
        let mut min_prev: NodePtr<K> = None;
        let mut prev = Rc::clone(&min);
        let mut current = min.borrow().sibling.clone();

        while let Some(node) = current {
            if node.borrow().key < min.borrow().key {
                min = Rc::clone(&node);
                min_prev = Some(Rc::clone(&prev));
            }
            current = node.borrow().sibling.clone();
            prev = node;
        }

        let after = min.borrow_mut().sibling.take();
        match min_prev {
            Some(prev) => prev.borrow_mut().sibling = after,
            None => self.head = after,
        }
        Some(min)
    }

    /// Unions two root lists into one with strictly ascending, unique degrees
    ///
    /// **Algorithm**: merge the lists by degree, then walk the result with
    /// `prev`, `x` and `next = x.sibling`:
    /// - degrees differ, or three roots of the same degree are in a row:
    ///   advance (the last two of a triple are paired on the next step)
    /// - `x.key <= next.key`: `x` absorbs `next` and stays put, since the
    ///   grown tree may collide with the following root
    /// - otherwise `next` absorbs `x`, taking its place in the list
    ///
    /// This is binary addition with carries over the degree sequence.
    fn union_root_lists(h1: NodePtr<K>, h2: NodePtr<K>) -> NodePtr<K> {
        let mut head = Self::merge_root_lists(h1, h2)?;
        let mut prev: NodePtr<K> = None;
        let mut x = Rc::clone(&head);

        loop {
            let Some(next) = x.borrow().sibling.clone() else {
                break;
            };

            let advance = {
                let x_ref = x.borrow();
                let next_ref = next.borrow();
                x_ref.degree != next_ref.degree
                    || next_ref
                        .sibling
                        .as_ref()
                        .is_some_and(|third| third.borrow().degree == x_ref.degree)
            };

            if advance {
                prev = Some(x);
                x = next;
            } else if x.borrow().key <= next.borrow().key {
                let after = next.borrow_mut().sibling.take();
                x.borrow_mut().sibling = after;
                Self::link(next, &x);
            } else {
                match &prev {
                    Some(prev) => prev.borrow_mut().sibling = Some(Rc::clone(&next)),
                    None => head = Rc::clone(&next),
                }
                Self::link(x, &next);
                x = next;
            }
        }

        Some(head)
    }

    /// Merges two root lists by ascending degree
    ///
    /// Like merging two sorted linked lists. Equal degrees may end up adjacent;
    /// resolving them is left to [`Self::union_root_lists`]. On equal degrees
    /// the root from `a` comes first.
    fn merge_root_lists(mut a: NodePtr<K>, mut b: NodePtr<K>) -> NodePtr<K> {
        let mut head: NodePtr<K> = None;
        let mut tail: NodePtr<K> = None;

        loop {
            let node = match (a.take(), b.take()) {
                (Some(x), Some(y)) => {
                    if x.borrow().degree <= y.borrow().degree {
                        a = x.borrow_mut().sibling.take();
                        b = Some(y);
                        x
                    } else {
                        b = y.borrow_mut().sibling.take();
                        a = Some(x);
                        y
                    }
                }
                // The remainder is already a linked list; append it whole
                (Some(rest), None) | (None, Some(rest)) => {
                    Self::append(&mut head, &mut tail, rest);
                    break;
                }
                (None, None) => break,
            };
            Self::append(&mut head, &mut tail, node);
        }

        head
    }

    fn append(head: &mut NodePtr<K>, tail: &mut NodePtr<K>, node: NodeRef<K>) {
        match tail.as_ref() {
            Some(last) => last.borrow_mut().sibling = Some(Rc::clone(&node)),
            None => *head = Some(Rc::clone(&node)),
        }
        *tail = Some(node);
    }

    /// Links `child` beneath `parent`
    ///
    /// **Time Complexity**: O(1)
    ///
    /// `child` is pushed onto the front of the parent's child chain, which
    /// keeps the chain in descending degree order because both trees had the
    /// same degree. The caller has already ensured `parent.key <= child.key`.
    fn link(child: NodeRef<K>, parent: &NodeRef<K>) {
        let mut parent_ref = parent.borrow_mut();
        {
            let mut child_ref = child.borrow_mut();
            child_ref.parent = Some(Rc::downgrade(parent));
            child_ref.sibling = parent_ref.child.take();
        }
        parent_ref.degree += 1;
        trace!(degree = parent_ref.degree, "linked binomial trees");
        parent_ref.child = Some(child);
    }

    fn roots(&self) -> Siblings<K> {
        Siblings {
            next: self.head.clone(),
        }
    }
}

/// Iterator over a sibling chain
struct Siblings<K> {
    next: NodePtr<K>,
}

impl<K> Iterator for Siblings<K> {
    type Item = NodeRef<K>;

    fn next(&mut self) -> Option<NodeRef<K>> {
        let current = self.next.take()?;
        self.next = current.borrow().sibling.clone();
        Some(current)
    }
}

impl<K: Ord> Default for BinomialHeap<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> Extend<K> for BinomialHeap<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord> FromIterator<K> for BinomialHeap<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut heap = Self::new();
        heap.extend(iter);
        heap
    }
}

/// Renders the forest as an indented outline, one line per node
impl<K: fmt::Display> fmt::Display for BinomialHeap<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_chain(self.head.clone(), 0, f)
    }
}

fn fmt_chain<K: fmt::Display>(
    mut current: NodePtr<K>,
    depth: usize,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    while let Some(node) = current {
        let node_ref = node.borrow();
        writeln!(
            f,
            "{:indent$}Key: {}, Degree: {}",
            "",
            node_ref.key,
            node_ref.degree,
            indent = depth * 2
        )?;
        fmt_chain(node_ref.child.clone(), depth + 1, f)?;
        current = node_ref.sibling.clone();
    }
    Ok(())
}

impl<K: Ord + fmt::Debug> fmt::Debug for BinomialHeap<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinomialHeap")
            .field("len", &self.len())
            .field("root_degrees", &self.root_degrees())
            .field("min", &self.get_min())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn singleton(key: i32, degree: usize) -> NodeRef<i32> {
        Rc::new(RefCell::new(Node {
            key,
            parent: None,
            child: None,
            sibling: None,
            degree,
        }))
    }

    fn chain(nodes: &[NodeRef<i32>]) -> NodePtr<i32> {
        for pair in nodes.windows(2) {
            pair[0].borrow_mut().sibling = Some(Rc::clone(&pair[1]));
        }
        nodes.first().cloned()
    }

    #[test]
    fn test_merge_root_lists_orders_by_degree() {
        let a = chain(&[singleton(1, 0), singleton(2, 2), singleton(3, 3)]);
        let b = chain(&[singleton(4, 0), singleton(5, 1), singleton(6, 3)]);

        let merged = BinomialHeap::merge_root_lists(a, b);
        let heap = BinomialHeap { head: merged };
        let keys: Vec<i32> = heap.roots().map(|n| n.borrow().key).collect();
        // Equal degrees keep the first list's root ahead
        assert_eq!(keys, vec![1, 4, 5, 2, 3, 6]);
        assert_eq!(heap.root_degrees(), vec![0, 0, 1, 2, 3, 3]);
    }

    #[test]
    fn test_merge_root_lists_with_empty_side() {
        let a = chain(&[singleton(7, 0), singleton(8, 1)]);
        let merged = BinomialHeap::merge_root_lists(None, a);
        let heap = BinomialHeap { head: merged };
        assert_eq!(heap.root_degrees(), vec![0, 1]);
        assert!(BinomialHeap::<i32>::merge_root_lists(None, None).is_none());
    }

    #[test]
    fn test_root_degrees_follow_binary_representation() {
        let mut heap = BinomialHeap::new();
        for key in 0..13 {
            heap.insert(key);
        }
        // 13 = 0b1101
        assert_eq!(heap.root_degrees(), vec![0, 2, 3]);
        assert_eq!(heap.len(), 13);
        heap.validate().unwrap();
    }

    #[test]
    fn test_union_scenario() {
        let a: BinomialHeap<i32> = [10, 20].into_iter().collect();
        let b: BinomialHeap<i32> = [5, 15, 30].into_iter().collect();

        let mut heap = a.union(b);
        assert_eq!(heap.root_degrees(), vec![0, 2]);
        heap.validate().unwrap();

        let mut out = Vec::new();
        while let Some(key) = heap.extract_min() {
            out.push(key);
            heap.validate().unwrap();
        }
        assert_eq!(out, vec![5, 10, 15, 20, 30]);
    }

    #[test]
    fn test_three_equal_degrees_in_a_row() {
        // 3 + 3 merges to degrees [0, 0, 1, 1]; the carry from the first pair
        // produces three degree-1 trees in a row
        let a: BinomialHeap<i32> = [1, 2, 3].into_iter().collect();
        let b: BinomialHeap<i32> = [4, 5, 6].into_iter().collect();
        let heap = a.union(b);
        assert_eq!(heap.root_degrees(), vec![1, 2]);
        assert_eq!(heap.len(), 6);
        heap.validate().unwrap();
    }

    #[test]
    fn test_extract_min_reverses_children() {
        let mut heap: BinomialHeap<i32> = (1..=8).collect();
        assert_eq!(heap.root_degrees(), vec![3]);

        assert_eq!(heap.extract_min(), Some(1));
        // Children of degrees 2, 1, 0 become the new root list
        assert_eq!(heap.root_degrees(), vec![0, 1, 2]);
        heap.validate().unwrap();
    }

    #[test]
    fn test_empty_heap() {
        let mut heap: BinomialHeap<i32> = BinomialHeap::new();
        assert!(heap.is_empty());
        assert_eq!(heap.len(), 0);
        assert_eq!(heap.get_min(), None);
        assert_eq!(heap.extract_min(), None);
        heap.validate().unwrap();
    }

    #[test]
    fn test_display_outline() {
        let heap: BinomialHeap<i32> = [10, 20, 5].into_iter().collect();
        let rendered = heap.to_string();
        assert_eq!(
            rendered,
            "Key: 5, Degree: 0\nKey: 10, Degree: 1\n  Key: 20, Degree: 0\n"
        );
    }

    #[test]
    fn test_extract_min_never_reports_empty_early() {
        let mut heap: BinomialHeap<i32> = (0..100).map(|i| (i * 37) % 100).collect();
        for expected in 0..100 {
            assert_eq!(heap.len(), (100 - expected) as usize);
            assert_eq!(heap.extract_min(), Some(expected));
        }
        assert_eq!(heap.extract_min(), None);
    }

    #[test]
    fn test_clear() {
        let mut heap: BinomialHeap<i32> = (0..20).collect();
        heap.clear();
        assert!(heap.is_empty());
        assert_eq!(heap.get_min(), None);
    }
}
