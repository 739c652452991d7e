//! `TypeSignature`: the functional type of a production.

use super::term::Type;

/// Ordered argument types plus one return type. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeSignature {
    arguments: Vec<Type>,
    return_type: Type,
}

impl TypeSignature {
    #[must_use]
    pub fn new(arguments: Vec<Type>, return_type: Type) -> Self {
        Self {
            arguments,
            return_type,
        }
    }

    /// A nullary signature (a constant production).
    #[must_use]
    pub fn constant(return_type: Type) -> Self {
        Self::new(Vec::new(), return_type)
    }

    #[must_use]
    pub fn arguments(&self) -> &[Type] {
        &self.arguments
    }

    #[must_use]
    pub fn return_type(&self) -> &Type {
        &self.return_type
    }

    #[must_use]
    pub fn arity(&self) -> usize {
        self.arguments.len()
    }

    /// Whether a production with this signature can fill a hole of `target`.
    #[must_use]
    pub fn matches(&self, target: &Type) -> bool {
        matches(&self.return_type, target)
    }

    /// The signature as an arrow type.
    #[must_use]
    pub fn as_arrow(&self) -> Type {
        Type::arrow(self.arguments.clone(), self.return_type.clone())
    }

    /// Recover a signature from an arrow type. Non-arrow types become
    /// nullary signatures returning that type.
    #[must_use]
    pub fn from_type(ty: Type) -> Self {
        match ty {
            Type::Arrow { inputs, output } => Self::new(inputs, *output),
            other => Self::constant(other),
        }
    }
}

impl std::fmt::Display for TypeSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&super::render::render_type(&self.as_arrow()))
    }
}

/// Exact structural match of a candidate return type against a hole type.
#[must_use]
pub fn matches(candidate_return_type: &Type, target_type: &Type) -> bool {
    candidate_return_type == target_type
}
