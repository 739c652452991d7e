//! Grammars of typed productions and program evaluation through them.

pub mod catalog;
pub mod error;
pub mod initialized;
pub mod production;

pub use catalog::Dsl;
pub use error::{BoxError, DslError};
pub use initialized::InitializedSExpression;
pub use production::{Params, Production, ProductionState};
