//! Typing environments for holes.
//!
//! An [`Environment`] maps de Bruijn indices to the types of the variables in
//! scope. Index 0 is the innermost binding. [`Environment::child`] enters a
//! binder and shifts existing indices up; [`Environment::parent`] leaves it
//! and shifts them back down.

use std::collections::BTreeMap;

use super::render::render_type;
use super::Type;

/// Two environments disagree about the type bound at an index.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("variable {index} is bound to {existing}, not {found}")]
pub struct EnvironmentConflict {
    pub index: usize,
    pub existing: Type,
    pub found: Type,
}

/// Variable types by de Bruijn index. Indices need not be contiguous.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Environment {
    elements: BTreeMap<usize, Type>,
}

impl Environment {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Enter a binder introducing `new_types`.
    ///
    /// The last of `new_types` gets index 0; existing indices move up by
    /// `new_types.len()`.
    #[must_use]
    pub fn child(&self, new_types: &[Type]) -> Self {
        let shift = new_types.len();
        let mut elements: BTreeMap<usize, Type> = self
            .elements
            .iter()
            .map(|(i, ty)| (i + shift, ty.clone()))
            .collect();
        for (i, ty) in new_types.iter().rev().enumerate() {
            elements.insert(i, ty.clone());
        }
        Self { elements }
    }

    /// Leave the binder that introduced `new_types`. Inverse of [`Self::child`].
    ///
    /// # Errors
    ///
    /// Returns [`EnvironmentConflict`] if a popped index is bound to a type
    /// other than the one the binder introduced.
    pub fn parent(&self, new_types: &[Type]) -> Result<Self, EnvironmentConflict> {
        for (index, found) in new_types.iter().rev().enumerate() {
            if let Some(existing) = self.elements.get(&index) {
                if existing != found {
                    return Err(EnvironmentConflict {
                        index,
                        existing: existing.clone(),
                        found: found.clone(),
                    });
                }
            }
        }
        let shift = new_types.len();
        let elements = self
            .elements
            .range(shift..)
            .map(|(i, ty)| (i - shift, ty.clone()))
            .collect();
        Ok(Self { elements })
    }

    /// Union of two environments.
    ///
    /// # Errors
    ///
    /// Returns [`EnvironmentConflict`] at the first index both bind to
    /// different types.
    pub fn merge(&self, other: &Self) -> Result<Self, EnvironmentConflict> {
        let mut elements = self.elements.clone();
        for (&index, found) in &other.elements {
            match elements.get(&index) {
                Some(existing) if existing != found => {
                    return Err(EnvironmentConflict {
                        index,
                        existing: existing.clone(),
                        found: found.clone(),
                    });
                }
                Some(_) => {}
                None => {
                    elements.insert(index, found.clone());
                }
            }
        }
        Ok(Self { elements })
    }

    /// Left-to-right [`Self::merge`] of every environment.
    ///
    /// # Errors
    ///
    /// Returns the first [`EnvironmentConflict`] encountered.
    pub fn merge_all<'a>(
        environments: impl IntoIterator<Item = &'a Environment>,
    ) -> Result<Self, EnvironmentConflict> {
        environments
            .into_iter()
            .try_fold(Self::empty(), |acc, env| acc.merge(env))
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Type> {
        self.elements.get(&index)
    }

    #[must_use]
    pub fn contains_type_at(&self, ty: &Type, index: usize) -> bool {
        self.elements.get(&index) == Some(ty)
    }

    /// One past the highest bound index; 0 when nothing is bound.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.keys().next_back().map_or(0, |i| i + 1)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Canonical JSON form: `[[index, type], ...]` in index order.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        self.elements
            .iter()
            .map(|(i, ty)| serde_json::json!([i, ty.to_json_value()]))
            .collect()
    }
}

/// `0=int,1=f`
impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (n, (i, ty)) in self.elements.iter().enumerate() {
            if n > 0 {
                f.write_str(",")?;
            }
            write!(f, "{i}={}", render_type(ty))?;
        }
        Ok(())
    }
}

/// An environment that admits every variable at every index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PermissiveEnvironment;

/// The environment a hole is typed in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeEnvironment {
    Strict(Environment),
    Permissive(PermissiveEnvironment),
}

impl TypeEnvironment {
    /// See [`Environment::child`]. Permissive environments are unchanged.
    #[must_use]
    pub fn child(&self, new_types: &[Type]) -> Self {
        match self {
            Self::Strict(env) => Self::Strict(env.child(new_types)),
            Self::Permissive(p) => Self::Permissive(*p),
        }
    }

    /// See [`Environment::parent`]. Permissive environments are unchanged.
    ///
    /// # Errors
    ///
    /// As [`Environment::parent`].
    pub fn parent(&self, new_types: &[Type]) -> Result<Self, EnvironmentConflict> {
        match self {
            Self::Strict(env) => env.parent(new_types).map(Self::Strict),
            Self::Permissive(p) => Ok(Self::Permissive(*p)),
        }
    }

    #[must_use]
    pub fn contains_type_at(&self, ty: &Type, index: usize) -> bool {
        match self {
            Self::Strict(env) => env.contains_type_at(ty, index),
            Self::Permissive(_) => true,
        }
    }

    /// Permissive environments report length 0.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Strict(env) => env.len(),
            Self::Permissive(_) => 0,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            Self::Strict(env) => serde_json::json!({"strict": env.to_json_value()}),
            Self::Permissive(_) => serde_json::json!("permissive"),
        }
    }
}

impl Default for TypeEnvironment {
    fn default() -> Self {
        Self::Strict(Environment::empty())
    }
}

impl From<Environment> for TypeEnvironment {
    fn from(env: Environment) -> Self {
        Self::Strict(env)
    }
}

impl From<PermissiveEnvironment> for TypeEnvironment {
    fn from(p: PermissiveEnvironment) -> Self {
        Self::Permissive(p)
    }
}

/// A type together with the environment it must be inhabited in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeWithEnvironment {
    ty: Type,
    env: TypeEnvironment,
}

impl TypeWithEnvironment {
    #[must_use]
    pub fn new(ty: Type, env: impl Into<TypeEnvironment>) -> Self {
        Self {
            ty,
            env: env.into(),
        }
    }

    /// `ty` in a permissive environment.
    #[must_use]
    pub fn permissive(ty: Type) -> Self {
        Self::new(ty, PermissiveEnvironment)
    }

    #[must_use]
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    #[must_use]
    pub fn env(&self) -> &TypeEnvironment {
        &self.env
    }

    /// `ty` in the same environment.
    #[must_use]
    pub fn with_type(&self, ty: Type) -> Self {
        Self {
            ty,
            env: self.env.clone(),
        }
    }

    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({"type": self.ty.to_json_value(), "env": self.env.to_json_value()})
    }
}

/// A type in the empty strict environment.
impl From<Type> for TypeWithEnvironment {
    fn from(ty: Type) -> Self {
        Self::new(ty, Environment::empty())
    }
}
