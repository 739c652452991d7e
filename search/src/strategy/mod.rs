//! Search strategies over any [`SearchGraph`](crate::contract::SearchGraph).
//!
//! Each strategy is an iterator of `Result<Node, Error>`: `Ok` items are goal
//! nodes, `Err` items are goal predicate failures. Exhaustion ends the
//! sequence; it is not an error. Strategies are pull-based and single
//! threaded. Dropping the iterator is the only cancellation.

mod best_first;
mod breadth_first;

pub use best_first::{bounded_astar, BoundedAStar};
pub use breadth_first::{bfs, Bfs};

use crate::error::SearchError;

/// The first item of a strategy's sequence.
///
/// Breadth-first search over a grammar with unbounded expansion never ends
/// when no goal exists; bound it with
/// [`SearchPolicy::max_expansions`](crate::policy::SearchPolicy) before
/// calling this.
///
/// # Errors
///
/// [`SearchError::NoSolutionFound`] if the sequence is empty, and
/// [`SearchError::Goal`] if the goal predicate failed first.
pub fn first_solution<N, E>(
    mut results: impl Iterator<Item = Result<N, E>>,
) -> Result<N, SearchError<E>> {
    match results.next() {
        Some(Ok(node)) => Ok(node),
        Some(Err(e)) => Err(SearchError::Goal(e)),
        None => Err(SearchError::NoSolutionFound),
    }
}
