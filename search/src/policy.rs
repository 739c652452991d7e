//! Search policy types.

use crate::error::SearchError;

/// Budget and dedup configuration shared by all strategies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPolicy {
    /// Depth bound for bounded best-first search. Nodes popped deeper than
    /// this are discarded unexpanded. Breadth-first search ignores it.
    pub max_depth: u32,
    /// Optional hard cap on expansions; the sequence ends when it is hit.
    pub max_expansions: Option<u64>,
    /// How the visited set is keyed.
    pub dedup: DedupMode,
}

impl SearchPolicy {
    /// Default policy with the given depth bound.
    #[must_use]
    pub fn bounded(max_depth: u32) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }

    /// Check that the strategies can honor this policy.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UnsupportedPolicyMode`] for a zero expansion
    /// budget, which could never even test the root.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_expansions == Some(0) {
            return Err(SearchError::UnsupportedPolicyMode {
                detail: "max_expansions must be at least 1".into(),
            });
        }
        Ok(())
    }

    pub(crate) fn budget_exhausted(&self, expansions: u64) -> bool {
        self.max_expansions.is_some_and(|cap| expansions >= cap)
    }
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            max_depth: 8,
            max_expansions: None,
            dedup: DedupMode::Structural,
        }
    }
}

/// Visited-set policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DedupMode {
    /// Suppress nodes whose fingerprint was already pushed (first seen wins).
    #[default]
    Structural,
    /// Push every generated node.
    Off,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_validates() {
        assert!(SearchPolicy::default().validate().is_ok());
    }

    #[test]
    fn zero_budget_rejected() {
        let policy = SearchPolicy {
            max_expansions: Some(0),
            ..SearchPolicy::default()
        };
        let err = policy.validate().unwrap_err();
        assert!(
            matches!(err, SearchError::UnsupportedPolicyMode { .. }),
            "expected UnsupportedPolicyMode, got {err:?}"
        );
    }

    #[test]
    fn budget_check() {
        let policy = SearchPolicy {
            max_expansions: Some(3),
            ..SearchPolicy::bounded(2)
        };
        assert_eq!(policy.max_depth, 2);
        assert!(!policy.budget_exhausted(2));
        assert!(policy.budget_exhausted(3));
        assert!(!SearchPolicy::default().budget_exhausted(u64::MAX));
    }
}
