//! Type terms, typing environments and production type signatures.
//!
//! Hole filling is exact structural equality on [`Type`]: there is no
//! subtyping and no unification. Environments travel with hole types but
//! take no part in matching.

pub mod environment;
pub mod render;
pub mod signature;
pub mod term;

pub use environment::{
    Environment, EnvironmentConflict, PermissiveEnvironment, TypeEnvironment, TypeWithEnvironment,
};
pub use render::{parse_type, render_type, TypeParseError};
pub use signature::{matches, TypeSignature};
pub use term::Type;
