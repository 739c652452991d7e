//! Neurosym Search: type-directed enumeration of DSL programs.
//!
//! This crate depends only on `neurosym_kernel`.
//!
//! # Crate dependency graph
//!
//! ```text
//! neurosym_kernel  ←  neurosym_search
//! (types, programs,    (graph, frontiers,
//!  DSL, hashing)        strategies)
//! ```
//!
//! # Key types
//!
//! - [`SearchGraph`]: implicit graph contract the strategies run on
//! - [`DslSearchGraph`]: partial programs of a target type, filled hole by hole
//! - [`DslSearchNode`]: a partial program and its open holes
//! - [`Bfs`] / [`BoundedAStar`]: lazy goal iterators
//! - [`SearchPolicy`]: depth bound, expansion budget, dedup mode
//! - [`MemoizedMetadata`]: per-session fingerprint-keyed cache

#![forbid(unsafe_code)]

pub mod contract;
pub mod cost;
pub mod error;
pub mod frontier;
pub mod graph;
pub mod metadata;
pub mod node;
pub mod policy;
pub mod stats;
pub mod strategy;

pub use contract::{Fingerprint, SearchGraph};
pub use cost::{CostFunction, ZeroCost};
pub use error::SearchError;
pub use graph::DslSearchGraph;
pub use metadata::{MemoizedMetadata, MetadataComputer, NoMetadataComputer};
pub use node::{DslSearchNode, Hole};
pub use policy::{DedupMode, SearchPolicy};
pub use stats::{SearchStats, TerminationReason};
pub use strategy::{bfs, bounded_astar, first_solution, Bfs, BoundedAStar};
