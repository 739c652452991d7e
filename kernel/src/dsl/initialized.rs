//! `InitializedSExpression`: a program whose every node carries fresh
//! production state.

use super::production::ProductionState;

/// A program tree annotated with per-use-site production state.
///
/// Produced by [`super::Dsl::initialize`]; consumed by [`super::Dsl::compute`].
#[derive(Debug, Clone, PartialEq)]
pub struct InitializedSExpression<V> {
    pub symbol: String,
    pub children: Vec<InitializedSExpression<V>>,
    pub state: ProductionState<V>,
}

impl<V> InitializedSExpression<V> {
    /// Number of nodes carrying parameterized state.
    #[must_use]
    pub fn parameterized_count(&self) -> usize {
        let own = usize::from(matches!(self.state, ProductionState::Parameterized(_)));
        own + self
            .children
            .iter()
            .map(InitializedSExpression::parameterized_count)
            .sum::<usize>()
    }
}
