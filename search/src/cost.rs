//! Caller-supplied node costs for best-first search.

/// Priority of a node; lower pops first. Ordered with [`f64::total_cmp`].
///
/// Takes `&mut self` so implementations may cache; see
/// [`crate::metadata::MemoizedMetadata`].
pub trait CostFunction<N> {
    fn cost(&mut self, node: &N) -> f64;
}

impl<N, F> CostFunction<N> for F
where
    F: FnMut(&N) -> f64,
{
    fn cost(&mut self, node: &N) -> f64 {
        self(node)
    }
}

/// Every node costs the same; best-first order degrades to discovery order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroCost;

impl<N> CostFunction<N> for ZeroCost {
    fn cost(&mut self, _node: &N) -> f64 {
        0.0
    }
}
