//! Search graph contract.
//!
//! Strategies are written against [`SearchGraph`] only, so they work for any
//! graph representation. A graph is a pure generator: it owns no frontier
//! and no visited set, which lets one graph value serve several concurrent
//! search sessions.

use neurosym_kernel::proof::hash::ContentHash;

/// Structural identity of a node, used for visited sets and metadata caches.
///
/// Two nodes must have equal fingerprints iff they are equivalent.
pub trait Fingerprint {
    fn fingerprint(&self) -> &ContentHash;
}

/// An implicit, lazily expanded graph with a goal predicate.
///
/// # Contract
///
/// - `expand_node` is deterministic: the same node yields the same children
///   in the same order.
/// - `expand_node` returning no children is a dead end, not a failure.
/// - `is_goal_node` errors come from the caller's predicate and are handed
///   back to the strategy's consumer unchanged.
pub trait SearchGraph {
    type Node: Fingerprint + Clone;
    type Error;

    /// The root every search starts from.
    fn initial_node(&self) -> Self::Node;

    /// Successors of `node`, in the graph's declared order.
    fn expand_node(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// Whether `node` is an accepted solution.
    ///
    /// # Errors
    ///
    /// Whatever the goal predicate reports.
    fn is_goal_node(&self, node: &Self::Node) -> Result<bool, Self::Error>;
}

impl<G: SearchGraph + ?Sized> SearchGraph for &G {
    type Node = G::Node;
    type Error = G::Error;

    fn initial_node(&self) -> Self::Node {
        (**self).initial_node()
    }

    fn expand_node(&self, node: &Self::Node) -> Vec<Self::Node> {
        (**self).expand_node(node)
    }

    fn is_goal_node(&self, node: &Self::Node) -> Result<bool, Self::Error> {
        (**self).is_goal_node(node)
    }
}
