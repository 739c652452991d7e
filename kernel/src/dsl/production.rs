//! `Production`: one typed grammar rule with delegated semantics.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::error::{BoxError, DslError};
use crate::types::TypeSignature;

/// Named parameters threaded into a parameterized production's computation.
pub type Params<V> = BTreeMap<String, V>;

type ComputeFn<V> = Arc<dyn Fn(&[V], &Params<V>) -> Result<V, BoxError> + Send + Sync>;
type InitFn<V> = Arc<dyn Fn() -> Params<V> + Send + Sync>;

/// Per-use-site state returned by [`Production::initialize`].
#[derive(Debug, Clone, PartialEq)]
pub enum ProductionState<V> {
    Stateless,
    Parameterized(Params<V>),
}

enum Kind<V> {
    Stateless,
    Parameterized(InitFn<V>),
}

/// A grammar rule: symbol, type signature, state initializer, computation.
///
/// `compute` must be deterministic for a fixed state and inputs. The search
/// engine never calls it; goal predicates and callers do, through
/// [`super::Dsl::compute`].
pub struct Production<V> {
    symbol: String,
    signature: TypeSignature,
    kind: Kind<V>,
    compute: ComputeFn<V>,
}

impl<V> Production<V> {
    /// A production with no parameters.
    pub fn stateless<F>(symbol: impl Into<String>, signature: TypeSignature, compute: F) -> Self
    where
        F: Fn(&[V]) -> Result<V, BoxError> + Send + Sync + 'static,
    {
        Self {
            symbol: symbol.into(),
            signature,
            kind: Kind::Stateless,
            compute: Arc::new(move |inputs, _params| compute(inputs)),
        }
    }

    /// A production whose computation receives freshly initialized named
    /// parameters (e.g. the weights of a neural module).
    pub fn parameterized<I, F>(
        symbol: impl Into<String>,
        signature: TypeSignature,
        initializer: I,
        compute: F,
    ) -> Self
    where
        I: Fn() -> Params<V> + Send + Sync + 'static,
        F: Fn(&[V], &Params<V>) -> Result<V, BoxError> + Send + Sync + 'static,
    {
        Self {
            symbol: symbol.into(),
            signature,
            kind: Kind::Parameterized(Arc::new(initializer)),
            compute: Arc::new(compute),
        }
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[must_use]
    pub fn signature(&self) -> &TypeSignature {
        &self.signature
    }

    #[must_use]
    pub fn is_parameterized(&self) -> bool {
        matches!(self.kind, Kind::Parameterized(_))
    }

    /// Fresh state for one use-site. Never shared between use-sites.
    #[must_use]
    pub fn initialize(&self) -> ProductionState<V> {
        match &self.kind {
            Kind::Stateless => ProductionState::Stateless,
            Kind::Parameterized(init) => ProductionState::Parameterized(init()),
        }
    }

    /// Apply the production to positional inputs under `state`.
    ///
    /// # Errors
    ///
    /// - [`DslError::ArityMismatch`] if `inputs` does not match the signature.
    /// - [`DslError::StateMismatch`] if `state` is of the other kind.
    /// - [`DslError::Compute`] if the computation itself fails.
    pub fn compute(&self, state: &ProductionState<V>, inputs: &[V]) -> Result<V, DslError> {
        if inputs.len() != self.signature.arity() {
            return Err(DslError::ArityMismatch {
                symbol: self.symbol.clone(),
                expected: self.signature.arity(),
                actual: inputs.len(),
            });
        }
        let result = match (&self.kind, state) {
            (Kind::Stateless, ProductionState::Stateless) => (self.compute)(inputs, &Params::new()),
            (Kind::Parameterized(_), ProductionState::Parameterized(params)) => {
                (self.compute)(inputs, params)
            }
            _ => {
                return Err(DslError::StateMismatch {
                    symbol: self.symbol.clone(),
                })
            }
        };
        result.map_err(|source| DslError::Compute {
            symbol: self.symbol.clone(),
            source,
        })
    }
}

impl<V> Clone for Production<V> {
    fn clone(&self) -> Self {
        Self {
            symbol: self.symbol.clone(),
            signature: self.signature.clone(),
            kind: match &self.kind {
                Kind::Stateless => Kind::Stateless,
                Kind::Parameterized(init) => Kind::Parameterized(Arc::clone(init)),
            },
            compute: Arc::clone(&self.compute),
        }
    }
}

impl<V> std::fmt::Debug for Production<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Production")
            .field("symbol", &self.symbol)
            .field("signature", &self.signature.to_string())
            .field("parameterized", &self.is_parameterized())
            .finish_non_exhaustive()
    }
}
