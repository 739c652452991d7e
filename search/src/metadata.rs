//! Per-node metadata computed once per search session.
//!
//! [`MemoizedMetadata`] caches by node fingerprint and never evicts; a cache
//! lives exactly as long as the search that owns it.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::marker::PhantomData;

use neurosym_kernel::proof::hash::ContentHash;

use crate::contract::Fingerprint;
use crate::cost::CostFunction;

/// Derives a value from a node. Must be a pure function of node content.
pub trait MetadataComputer<N> {
    type Value;

    fn compute(&self, node: &N) -> Self::Value;
}

impl<N, M, F> MetadataComputer<N> for F
where
    F: Fn(&N) -> M,
{
    type Value = M;

    fn compute(&self, node: &N) -> M {
        self(node)
    }
}

/// Metadata for strategies that ignore it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMetadataComputer;

impl<N> MetadataComputer<N> for NoMetadataComputer {
    type Value = ();

    fn compute(&self, _node: &N) {}
}

/// Fingerprint-keyed cache in front of a [`MetadataComputer`].
pub struct MemoizedMetadata<N, C: MetadataComputer<N>> {
    computer: C,
    cache: HashMap<ContentHash, C::Value>,
    hits: u64,
    misses: u64,
    _node: PhantomData<fn(&N)>,
}

impl<N: Fingerprint, C: MetadataComputer<N>> MemoizedMetadata<N, C> {
    #[must_use]
    pub fn new(computer: C) -> Self {
        Self {
            computer,
            cache: HashMap::new(),
            hits: 0,
            misses: 0,
            _node: PhantomData,
        }
    }

    /// The cached value for `node`, computing it on first sight.
    pub fn get(&mut self, node: &N) -> &C::Value {
        match self.cache.entry(node.fingerprint().clone()) {
            Entry::Occupied(e) => {
                self.hits += 1;
                e.into_mut()
            }
            Entry::Vacant(e) => {
                self.misses += 1;
                e.insert(self.computer.compute(node))
            }
        }
    }

    #[must_use]
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Number of computations performed; equals the number of distinct nodes seen.
    #[must_use]
    pub fn misses(&self) -> u64 {
        self.misses
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl<N, C> CostFunction<N> for MemoizedMetadata<N, C>
where
    N: Fingerprint,
    C: MetadataComputer<N, Value = f64>,
{
    fn cost(&mut self, node: &N) -> f64 {
        *self.get(node)
    }
}

impl<N, C> std::fmt::Debug for MemoizedMetadata<N, C>
where
    C: MetadataComputer<N>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoizedMetadata")
            .field("entries", &self.cache.len())
            .field("hits", &self.hits)
            .field("misses", &self.misses)
            .finish_non_exhaustive()
    }
}
