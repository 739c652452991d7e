//! `SExpression`: an immutable program tree.

use crate::proof::canon::{canonical_json_bytes, CanonError};
use crate::proof::hash::{canonical_hash, ContentHash};
use crate::proof::hash_domain::HashDomain;

/// Symbols starting with this marker are holes or pattern variables.
pub const VARIABLE_MARKER: char = '$';

/// Prefix marking a zero-child call in stitch-compatible rendering.
pub const LEAF_PREFIX: &str = "leaf-";

/// A symbol plus an ordered, possibly empty sequence of children.
///
/// Equality, ordering and hashing are structural and order-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SExpression {
    symbol: String,
    children: Vec<SExpression>,
}

impl SExpression {
    #[must_use]
    pub fn new(symbol: impl Into<String>, children: Vec<SExpression>) -> Self {
        Self {
            symbol: symbol.into(),
            children,
        }
    }

    /// A zero-child node.
    #[must_use]
    pub fn leaf(symbol: impl Into<String>) -> Self {
        Self::new(symbol, Vec::new())
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[must_use]
    pub fn children(&self) -> &[SExpression] {
        &self.children
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Whether this node is a hole placeholder (`$`-prefixed leaf).
    #[must_use]
    pub fn is_hole(&self) -> bool {
        self.is_leaf() && self.symbol.starts_with(VARIABLE_MARKER)
    }

    /// All symbols in pre-order.
    #[must_use]
    pub fn symbols(&self) -> Vec<&str> {
        let mut out = Vec::with_capacity(self.node_count());
        self.collect_symbols(&mut out);
        out
    }

    fn collect_symbols<'a>(&'a self, out: &mut Vec<&'a str>) {
        out.push(&self.symbol);
        for child in &self.children {
            child.collect_symbols(out);
        }
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(SExpression::node_count).sum::<usize>()
    }

    /// Height of the tree; a leaf has depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(SExpression::depth)
            .max()
            .unwrap_or(0)
    }

    /// The subtree reached by following child indices from the root.
    #[must_use]
    pub fn subtree_at(&self, path: &[usize]) -> Option<&SExpression> {
        match path.split_first() {
            None => Some(self),
            Some((&i, rest)) => self.children.get(i)?.subtree_at(rest),
        }
    }

    /// A copy of this tree with the subtree at `path` replaced.
    ///
    /// Only the spine along `path` is rebuilt; returns `None` if `path`
    /// leaves the tree.
    #[must_use]
    pub fn replace_at(&self, path: &[usize], replacement: SExpression) -> Option<SExpression> {
        match path.split_first() {
            None => Some(replacement),
            Some((&i, rest)) => {
                let child = self.children.get(i)?.replace_at(rest, replacement)?;
                let mut children = self.children.clone();
                children[i] = child;
                Some(Self::new(self.symbol.clone(), children))
            }
        }
    }

    /// Canonical JSON form: `{"symbol": .., "children": [..]}`.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "children": self.children.iter().map(SExpression::to_json_value).collect::<Vec<_>>(),
            "symbol": self.symbol,
        })
    }

    /// Canonical JSON bytes of this program.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if canonical serialization fails.
    pub fn canonical_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// Content hash of the canonical JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if canonical serialization fails.
    pub fn fingerprint(&self) -> Result<ContentHash, CanonError> {
        Ok(canonical_hash(HashDomain::SExpression, &self.canonical_bytes()?))
    }
}

impl std::fmt::Display for SExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&super::render::render_s_expression(
            self,
            super::render::RenderMode::Default,
        ))
    }
}
