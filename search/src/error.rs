//! Typed search errors.
//!
//! Exhausting a frontier is not an error: strategies simply end their
//! sequence. [`SearchError::NoSolutionFound`] only appears when a caller
//! asks for a first result through [`crate::strategy::first_solution`].

use std::convert::Infallible;

/// Search failure. `E` is the goal predicate's error type.
#[derive(Debug, thiserror::Error)]
pub enum SearchError<E = Infallible> {
    /// A policy option the strategies cannot honor.
    #[error("unsupported policy mode: {detail}")]
    UnsupportedPolicyMode { detail: String },
    /// The sequence ended without a goal node.
    #[error("no solution found")]
    NoSolutionFound,
    /// The goal predicate failed.
    #[error("goal predicate failed")]
    Goal(#[source] E),
}
