//! `Dsl`: a named catalog of productions.
//!
//! Productions keep their declaration order. That order is the expansion
//! order for every hole and therefore fixes BFS traversal order and A*
//! tie-breaks.

use std::collections::HashMap;

use log::debug;

use super::error::DslError;
use super::initialized::InitializedSExpression;
use super::production::Production;
use crate::programs::SExpression;
use crate::proof::canon::{canonical_json_bytes, CanonError};
use crate::proof::hash::{canonical_hash, ContentHash};
use crate::proof::hash_domain::HashDomain;
use crate::types::Type;

/// A named set of typed productions, queryable by return type.
#[derive(Debug, Clone)]
pub struct Dsl<V> {
    name: String,
    productions: Vec<Production<V>>,
    by_symbol: HashMap<String, usize>,
}

impl<V> Dsl<V> {
    /// Build a DSL from productions in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`DslError::DuplicateSymbol`] if two productions share a symbol.
    pub fn new(name: impl Into<String>, productions: Vec<Production<V>>) -> Result<Self, DslError> {
        let name = name.into();
        let mut by_symbol = HashMap::with_capacity(productions.len());
        for (i, production) in productions.iter().enumerate() {
            if by_symbol.insert(production.symbol().to_string(), i).is_some() {
                return Err(DslError::DuplicateSymbol {
                    symbol: production.symbol().to_string(),
                });
            }
        }
        debug!("built DSL {name:?} with {} productions", productions.len());
        Ok(Self {
            name,
            productions,
            by_symbol,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All productions in declaration order.
    #[must_use]
    pub fn productions(&self) -> &[Production<V>] {
        &self.productions
    }

    #[must_use]
    pub fn production(&self, symbol: &str) -> Option<&Production<V>> {
        self.by_symbol.get(symbol).map(|&i| &self.productions[i])
    }

    /// Productions that can fill a hole of type `ty`, in declaration order.
    /// Empty when nothing matches; that is a dead end, not an error.
    pub fn productions_returning<'a>(
        &'a self,
        ty: &'a Type,
    ) -> impl Iterator<Item = &'a Production<V>> + 'a {
        self.productions
            .iter()
            .filter(move |p| p.signature().matches(ty))
    }

    /// Symbols in declaration order.
    #[must_use]
    pub fn symbols(&self) -> Vec<&str> {
        self.productions.iter().map(Production::symbol).collect()
    }

    /// Symbols of nullary productions; the `should_not_be_leaf` set the
    /// parser needs to read this DSL's programs back.
    #[must_use]
    pub fn nullary_symbols(&self) -> std::collections::HashSet<&str> {
        self.productions
            .iter()
            .filter(|p| p.signature().arity() == 0)
            .map(Production::symbol)
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.productions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.productions.is_empty()
    }

    /// Whether every symbol in `program` is one of this DSL's productions.
    #[must_use]
    pub fn program_has_no_holes(&self, program: &SExpression) -> bool {
        program
            .symbols()
            .into_iter()
            .all(|s| self.by_symbol.contains_key(s))
    }

    /// Content digest over `(symbol, signature)` pairs in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if canonical serialization fails.
    pub fn catalog_digest(&self) -> Result<ContentHash, CanonError> {
        let entries: Vec<serde_json::Value> = self
            .productions
            .iter()
            .map(|p| {
                serde_json::json!({
                    "parameterized": p.is_parameterized(),
                    "signature": p.signature().as_arrow().to_json_value(),
                    "symbol": p.symbol(),
                })
            })
            .collect();
        let value = serde_json::json!({"entries": entries, "name": self.name});
        Ok(canonical_hash(
            HashDomain::DslCatalog,
            &canonical_json_bytes(&value)?,
        ))
    }

    /// Attach fresh production state to every node of a complete program.
    ///
    /// # Errors
    ///
    /// - [`DslError::HoleInProgram`] if the program contains a `$` hole.
    /// - [`DslError::UnknownSymbol`] for any other symbol outside the DSL.
    /// - [`DslError::ArityMismatch`] if a node's child count disagrees with
    ///   its production's signature.
    pub fn initialize(&self, program: &SExpression) -> Result<InitializedSExpression<V>, DslError> {
        if program.is_hole() {
            return Err(DslError::HoleInProgram {
                symbol: program.symbol().to_string(),
            });
        }
        let production = self
            .production(program.symbol())
            .ok_or_else(|| DslError::UnknownSymbol {
                symbol: program.symbol().to_string(),
            })?;
        if production.signature().arity() != program.children().len() {
            return Err(DslError::ArityMismatch {
                symbol: program.symbol().to_string(),
                expected: production.signature().arity(),
                actual: program.children().len(),
            });
        }
        let children = program
            .children()
            .iter()
            .map(|child| self.initialize(child))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(InitializedSExpression {
            symbol: program.symbol().to_string(),
            children,
            state: production.initialize(),
        })
    }

    /// Evaluate an initialized program bottom-up.
    ///
    /// # Errors
    ///
    /// Propagates [`DslError`] from any node, including evaluator failures
    /// as [`DslError::Compute`].
    pub fn compute(&self, program: &InitializedSExpression<V>) -> Result<V, DslError> {
        let production = self
            .production(&program.symbol)
            .ok_or_else(|| DslError::UnknownSymbol {
                symbol: program.symbol.clone(),
            })?;
        let inputs = program
            .children
            .iter()
            .map(|child| self.compute(child))
            .collect::<Result<Vec<_>, _>>()?;
        production.compute(&program.state, &inputs)
    }

    /// `initialize` then `compute`.
    ///
    /// # Errors
    ///
    /// See [`Dsl::initialize`] and [`Dsl::compute`].
    pub fn evaluate(&self, program: &SExpression) -> Result<V, DslError> {
        self.compute(&self.initialize(program)?)
    }
}
