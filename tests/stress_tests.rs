//! Extreme stress tests that really push the heaps to their limits
//!
//! These tests perform large numbers of operations in various patterns
//! to catch edge cases and verify correctness under load.

use mergeable_heaps::binomial::BinomialHeap;
use mergeable_heaps::fibonacci::FibonacciHeap;
use mergeable_heaps::{Heap, MergeableHeap};

/// Test massive numbers of inserts and pops
fn test_massive_operations<H: Heap<i32>>() {
    let mut heap = H::new();

    for i in 0..10_000 {
        heap.push(i);
    }
    assert_eq!(heap.len(), 10_000);

    for i in 0..10_000 {
        assert_eq!(heap.pop(), Some(i));
    }
    assert!(heap.is_empty());
}

/// Test alternating insert and pop
fn test_alternating_ops<H: Heap<i32>>() {
    let mut heap = H::new();

    // Insert-insert-pop pattern; the smaller key of each pair is popped
    for i in 0..2000 {
        heap.push(i * 2 + 1);
        heap.push(i * 2);
        assert_eq!(heap.pop(), Some(i));
    }
    assert_eq!(heap.len(), 2000);

    let mut last = i32::MIN;
    while let Some(key) = heap.pop() {
        assert!(key >= last);
        last = key;
    }
}

/// Test many duplicates interleaved with distinct keys
fn test_many_duplicates<H: Heap<i32>>() {
    let mut heap = H::new();
    for i in 0..3000 {
        heap.push(i % 7);
    }

    let mut counts = [0usize; 7];
    let mut last = i32::MIN;
    while let Some(key) = heap.pop() {
        assert!(key >= last);
        last = key;
        counts[key as usize] += 1;
    }
    assert_eq!(counts.iter().sum::<usize>(), 3000);
}

/// Test sawtooth: grow, shrink by half, grow again
fn test_sawtooth<H: Heap<i32>>() {
    let mut heap = H::new();
    let mut expected_len = 0;
    for round in 0..20 {
        for i in 0..500 {
            heap.push((i * 31 + round * 17) % 1009);
        }
        expected_len += 500;
        let mut last = i32::MIN;
        for _ in 0..250 {
            let key = heap.pop().unwrap();
            assert!(key >= last);
            last = key;
        }
        expected_len -= 250;
        assert_eq!(heap.len(), expected_len);
    }
}

/// Test merge with large heaps
fn test_large_merge<H: MergeableHeap<i32>>() {
    let mut heap1 = H::new();
    let mut heap2 = H::new();

    for i in 0..5000 {
        heap1.push(i * 2);
        heap2.push(i * 2 + 1);
    }

    heap1.merge(heap2);
    assert_eq!(heap1.len(), 10_000);

    for i in 0..10_000 {
        assert_eq!(heap1.pop(), Some(i));
    }
}

/// Test a chain of merges into one accumulator
fn test_many_small_merges<H: MergeableHeap<i32>>() {
    let mut acc = H::new();
    for chunk in 0..200 {
        let mut small = H::new();
        for i in 0..7 {
            small.push(chunk * 7 + i);
        }
        acc.merge(small);
    }
    assert_eq!(acc.len(), 1400);
    for i in 0..1400 {
        assert_eq!(acc.pop(), Some(i));
    }
}

#[test]
fn test_fibonacci_massive() {
    test_massive_operations::<FibonacciHeap<i32>>();
}

#[test]
fn test_binomial_massive() {
    test_massive_operations::<BinomialHeap<i32>>();
}

#[test]
fn test_fibonacci_alternating() {
    test_alternating_ops::<FibonacciHeap<i32>>();
}

#[test]
fn test_binomial_alternating() {
    test_alternating_ops::<BinomialHeap<i32>>();
}

#[test]
fn test_fibonacci_duplicates() {
    test_many_duplicates::<FibonacciHeap<i32>>();
}

#[test]
fn test_binomial_duplicates() {
    test_many_duplicates::<BinomialHeap<i32>>();
}

#[test]
fn test_fibonacci_sawtooth() {
    test_sawtooth::<FibonacciHeap<i32>>();
}

#[test]
fn test_binomial_sawtooth() {
    test_sawtooth::<BinomialHeap<i32>>();
}

#[test]
fn test_binomial_large_merge() {
    test_large_merge::<BinomialHeap<i32>>();
}

#[test]
fn test_binomial_many_small_merges() {
    test_many_small_merges::<BinomialHeap<i32>>();
}

#[test]
fn test_fibonacci_validate_under_churn() {
    let mut heap = FibonacciHeap::new();
    for i in 0..600 {
        heap.insert((i * 37) % 101);
        if i % 3 == 2 {
            heap.extract_min();
            heap.validate().unwrap();
        }
    }
    assert_eq!(heap.len(), 400);
    heap.validate().unwrap();
}

#[test]
fn test_binomial_validate_under_churn() {
    let mut heap = BinomialHeap::new();
    for i in 0..600 {
        heap.insert((i * 37) % 101);
        if i % 3 == 2 {
            heap.extract_min();
            heap.validate().unwrap();
        }
    }
    assert_eq!(heap.len(), 400);
    heap.validate().unwrap();
}
