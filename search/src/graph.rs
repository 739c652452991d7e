//! The implicit program graph induced by a DSL and a target type.

use log::trace;
use neurosym_kernel::dsl::Dsl;
use neurosym_kernel::types::{Type, TypeWithEnvironment};

use crate::contract::SearchGraph;
use crate::node::DslSearchNode;

/// Lazily expanded graph of partial programs of type `target`.
///
/// Holds no traversal state; strategies own their frontier and visited set,
/// so one graph can back any number of searches.
pub struct DslSearchGraph<'d, V, G> {
    dsl: &'d Dsl<V>,
    target: TypeWithEnvironment,
    goal: G,
}

impl<'d, V, G> DslSearchGraph<'d, V, G> {
    /// A bare [`Type`] target starts in the empty environment.
    #[must_use]
    pub fn new(dsl: &'d Dsl<V>, target: impl Into<TypeWithEnvironment>, goal: G) -> Self {
        Self {
            dsl,
            target: target.into(),
            goal,
        }
    }

    #[must_use]
    pub fn dsl(&self) -> &'d Dsl<V> {
        self.dsl
    }

    #[must_use]
    pub fn target(&self) -> &Type {
        self.target.ty()
    }
}

impl<'d, V, G, E> SearchGraph for DslSearchGraph<'d, V, G>
where
    G: Fn(&DslSearchNode<'d, V>) -> Result<bool, E>,
{
    type Node = DslSearchNode<'d, V>;
    type Error = E;

    fn initial_node(&self) -> DslSearchNode<'d, V> {
        DslSearchNode::root(self.dsl, self.target.clone())
    }

    /// One child per production returning the selected hole's type, in
    /// declaration order. Complete nodes have no children.
    fn expand_node(&self, node: &DslSearchNode<'d, V>) -> Vec<DslSearchNode<'d, V>> {
        let Some(hole) = node.selected_hole() else {
            return Vec::new();
        };
        let children: Vec<DslSearchNode<'d, V>> = self
            .dsl
            .productions_returning(hole.ty())
            .filter_map(|p| node.fill_selected(p.symbol(), p.signature().arguments()))
            .collect();
        if children.is_empty() {
            trace!("dead end at {node}: no production returns {}", hole.ty());
        }
        children
    }

    fn is_goal_node(&self, node: &DslSearchNode<'d, V>) -> Result<bool, E> {
        (self.goal)(node)
    }
}
