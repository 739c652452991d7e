//! Frontiers with loop detection.
//!
//! Both frontiers key their visited set by node fingerprint in a `BTreeSet`
//! (first seen wins) and track a size high-water mark.

use std::cmp::{Ordering, Reverse};
use std::collections::{BTreeSet, BinaryHeap, VecDeque};

use neurosym_kernel::proof::hash::ContentHash;

use crate::contract::Fingerprint;
use crate::policy::DedupMode;

#[derive(Debug)]
struct Visited {
    mode: DedupMode,
    seen: BTreeSet<ContentHash>,
}

impl Visited {
    fn new(mode: DedupMode) -> Self {
        Self {
            mode,
            seen: BTreeSet::new(),
        }
    }

    /// Returns `false` if the fingerprint was already recorded.
    fn insert(&mut self, fingerprint: &ContentHash) -> bool {
        match self.mode {
            DedupMode::Off => true,
            DedupMode::Structural => self.seen.insert(fingerprint.clone()),
        }
    }
}

/// FIFO frontier for breadth-first search.
#[derive(Debug)]
pub struct FifoFrontier<N> {
    queue: VecDeque<(N, u32)>,
    visited: Visited,
    high_water: u64,
}

impl<N: Fingerprint> FifoFrontier<N> {
    #[must_use]
    pub fn new(dedup: DedupMode) -> Self {
        Self {
            queue: VecDeque::new(),
            visited: Visited::new(dedup),
            high_water: 0,
        }
    }

    /// Enqueue `node` at `depth`.
    ///
    /// Returns `false` if its fingerprint was already visited (node not added).
    pub fn push(&mut self, node: N, depth: u32) -> bool {
        if !self.visited.insert(node.fingerprint()) {
            return false;
        }
        self.queue.push_back((node, depth));
        self.high_water = self.high_water.max(self.queue.len() as u64);
        true
    }

    #[must_use]
    pub fn pop(&mut self) -> Option<(N, u32)> {
        self.queue.pop_front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }
}

/// Ordering key: lowest cost first, then earliest discovery.
#[derive(Debug, Clone, Copy)]
pub struct FrontierKey {
    pub cost: f64,
    pub creation_order: u64,
}

impl PartialEq for FrontierKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierKey {}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost
            .total_cmp(&other.cost)
            .then(self.creation_order.cmp(&other.creation_order))
    }
}

#[derive(Debug)]
struct FrontierEntry<N> {
    key: Reverse<FrontierKey>,
    node: N,
    depth: u32,
}

impl<N> PartialEq for FrontierEntry<N> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<N> Eq for FrontierEntry<N> {}

impl<N> PartialOrd for FrontierEntry<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<N> Ord for FrontierEntry<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

/// Priority frontier for bounded best-first search.
///
/// `BinaryHeap` is a max-heap, so entries are keyed by `Reverse<FrontierKey>`.
/// Creation order is assigned on push and is unique, so pops are totally
/// ordered even among equal costs.
#[derive(Debug)]
pub struct BestFirstFrontier<N> {
    heap: BinaryHeap<FrontierEntry<N>>,
    visited: Visited,
    next_creation_order: u64,
    high_water: u64,
}

impl<N: Fingerprint> BestFirstFrontier<N> {
    #[must_use]
    pub fn new(dedup: DedupMode) -> Self {
        Self {
            heap: BinaryHeap::new(),
            visited: Visited::new(dedup),
            next_creation_order: 0,
            high_water: 0,
        }
    }

    /// Push `node` at `depth` with priority `cost`.
    ///
    /// Returns `false` if its fingerprint was already visited (node not added).
    pub fn push(&mut self, node: N, depth: u32, cost: f64) -> bool {
        if !self.visited.insert(node.fingerprint()) {
            return false;
        }
        let key = FrontierKey {
            cost,
            creation_order: self.next_creation_order,
        };
        self.next_creation_order += 1;
        self.heap.push(FrontierEntry {
            key: Reverse(key),
            node,
            depth,
        });
        self.high_water = self.high_water.max(self.heap.len() as u64);
        true
    }

    /// Pop the lowest-cost node with its depth and key.
    #[must_use]
    pub fn pop(&mut self) -> Option<(N, u32, FrontierKey)> {
        self.heap.pop().map(|e| (e.node, e.depth, e.key.0))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }
}
