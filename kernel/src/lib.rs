//! Neurosym kernel: typed grammars and the symbolic program model.
//!
//! # Module dependency direction
//!
//! `types` ← `programs` ← `dsl`, with `proof` under `programs` and `dsl`
//!
//! `proof` holds canonical JSON and domain-separated hashing and depends on
//! nothing internal. `dsl` is the only module that knows about evaluation;
//! everything it evaluates is opaque to the search layer.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod dsl;
pub mod programs;
pub mod proof;
pub mod types;
