//! Partial programs as search nodes.

use std::sync::Arc;

use neurosym_kernel::dsl::{Dsl, DslError};
use neurosym_kernel::programs::{SExpression, VARIABLE_MARKER};
use neurosym_kernel::proof::hash::{canonical_hash, ContentHash};
use neurosym_kernel::proof::hash_domain::HashDomain;
use neurosym_kernel::types::{Type, TypeEnvironment, TypeWithEnvironment};

use crate::contract::Fingerprint;

/// A typed placeholder awaiting substitution.
///
/// The hole's type lives here, not in the tree: the tree only carries the
/// placeholder leaf `$<id>` at `path`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hole {
    id: u32,
    ty: TypeWithEnvironment,
    path: Vec<usize>,
}

impl Hole {
    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// The type a filling production must return.
    #[must_use]
    pub fn ty(&self) -> &Type {
        self.ty.ty()
    }

    /// The variables in scope at this hole.
    #[must_use]
    pub fn environment(&self) -> &TypeEnvironment {
        self.ty.env()
    }

    #[must_use]
    pub fn type_with_environment(&self) -> &TypeWithEnvironment {
        &self.ty
    }

    /// Child indices from the root to the placeholder leaf.
    #[must_use]
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// The placeholder symbol, e.g. `$3`.
    #[must_use]
    pub fn symbol(&self) -> String {
        format!("{VARIABLE_MARKER}{}", self.id)
    }

    #[must_use]
    pub fn placeholder(&self) -> SExpression {
        SExpression::leaf(self.symbol())
    }
}

/// A partial program plus its open holes, tied to the DSL and target type
/// it was built from.
///
/// `holes[0]` is always the next hole to expand. Equality and hashing use
/// the program only (holes included as placeholder leaves); the hole list,
/// DSL and target are derived or shared data.
pub struct DslSearchNode<'d, V> {
    dsl: &'d Dsl<V>,
    target: Arc<Type>,
    program: SExpression,
    holes: Vec<Hole>,
    next_hole_id: u32,
    fingerprint: ContentHash,
}

impl<'d, V> DslSearchNode<'d, V> {
    /// A single hole of type `target`, in the target's environment.
    #[must_use]
    pub fn root(dsl: &'d Dsl<V>, target: impl Into<TypeWithEnvironment>) -> Self {
        let target = target.into();
        let hole = Hole {
            id: 0,
            ty: target.clone(),
            path: Vec::new(),
        };
        let program = hole.placeholder();
        Self {
            dsl,
            target: Arc::new(target.ty().clone()),
            fingerprint: node_fingerprint(&program),
            program,
            holes: vec![hole],
            next_hole_id: 1,
        }
    }

    /// The DSL whose productions fill this node's holes.
    #[must_use]
    pub fn dsl(&self) -> &'d Dsl<V> {
        self.dsl
    }

    /// The type of the whole program.
    #[must_use]
    pub fn target(&self) -> &Type {
        &self.target
    }

    #[must_use]
    pub fn program(&self) -> &SExpression {
        &self.program
    }

    /// Open holes in expansion order.
    #[must_use]
    pub fn holes(&self) -> &[Hole] {
        &self.holes
    }

    /// The hole the next expansion fills: always the first open hole.
    #[must_use]
    pub fn selected_hole(&self) -> Option<&Hole> {
        self.holes.first()
    }

    /// A node with no open holes.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.holes.is_empty()
    }

    /// Number of productions applied since the root, i.e. the node's depth
    /// in the search graph.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.program.node_count() - self.holes.len()
    }

    /// Evaluate the program with this node's DSL.
    ///
    /// # Errors
    ///
    /// [`DslError::HoleInProgram`] while holes remain; otherwise whatever
    /// [`Dsl::evaluate`] returns.
    pub fn evaluate(&self) -> Result<V, DslError> {
        self.dsl.evaluate(&self.program)
    }

    /// Fill the selected hole with `symbol` applied to fresh holes typed by
    /// `arguments`. New holes go ahead of the remaining ones and inherit the
    /// selected hole's environment.
    ///
    /// Returns `None` when there is no hole to fill.
    #[must_use]
    pub fn fill_selected(&self, symbol: &str, arguments: &[Type]) -> Option<Self> {
        let (selected, rest) = self.holes.split_first()?;
        let mut next_hole_id = self.next_hole_id;
        let mut holes = Vec::with_capacity(arguments.len() + rest.len());
        for (i, ty) in arguments.iter().enumerate() {
            let mut path = selected.path.clone();
            path.push(i);
            holes.push(Hole {
                id: next_hole_id,
                ty: selected.ty.with_type(ty.clone()),
                path,
            });
            next_hole_id += 1;
        }
        let application = SExpression::new(symbol, holes.iter().map(Hole::placeholder).collect());
        let program = self.program.replace_at(&selected.path, application)?;
        holes.extend_from_slice(rest);
        Some(Self {
            dsl: self.dsl,
            target: Arc::clone(&self.target),
            fingerprint: node_fingerprint(&program),
            program,
            holes,
            next_hole_id,
        })
    }
}

impl<V> Clone for DslSearchNode<'_, V> {
    fn clone(&self) -> Self {
        Self {
            dsl: self.dsl,
            target: Arc::clone(&self.target),
            program: self.program.clone(),
            holes: self.holes.clone(),
            next_hole_id: self.next_hole_id,
            fingerprint: self.fingerprint.clone(),
        }
    }
}

impl<V> std::fmt::Debug for DslSearchNode<'_, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DslSearchNode")
            .field("dsl", &self.dsl.name())
            .field("target", &self.target)
            .field("program", &self.program)
            .field("holes", &self.holes)
            .finish_non_exhaustive()
    }
}

impl<V> PartialEq for DslSearchNode<'_, V> {
    fn eq(&self, other: &Self) -> bool {
        self.program == other.program
    }
}

impl<V> Eq for DslSearchNode<'_, V> {}

impl<V> std::hash::Hash for DslSearchNode<'_, V> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.program.hash(state);
    }
}

impl<V> Fingerprint for DslSearchNode<'_, V> {
    fn fingerprint(&self) -> &ContentHash {
        &self.fingerprint
    }
}

impl<V> std::fmt::Display for DslSearchNode<'_, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.program, f)
    }
}

fn node_fingerprint(program: &SExpression) -> ContentHash {
    // Programs serialize to strings and arrays only, which canonicalization
    // never rejects; the rendered form is a fallback that keeps this total.
    let bytes = program
        .canonical_bytes()
        .unwrap_or_else(|_| program.to_string().into_bytes());
    canonical_hash(HashDomain::SearchNode, &bytes)
}
