//! Per-session search counters.

/// Why a strategy's sequence ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// Every reachable node (within the depth bound, for A*) was expanded.
    FrontierExhausted,
    /// `max_expansions` was hit.
    ExpansionBudgetExceeded,
}

impl TerminationReason {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FrontierExhausted => "frontier_exhausted",
            Self::ExpansionBudgetExceeded => "expansion_budget_exceeded",
        }
    }
}

/// Counters accumulated while a strategy runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes popped, goal-tested, and expanded.
    pub expansions: u64,
    /// Children produced by the graph, duplicates included.
    pub nodes_generated: u64,
    /// Children dropped because their fingerprint was already visited.
    pub duplicates_suppressed: u64,
    /// Expansions that produced no children (complete nodes included).
    pub dead_ends: u64,
    /// Nodes popped beyond the depth bound and discarded.
    pub depth_pruned: u64,
    /// Goal nodes handed to the consumer.
    pub goals_yielded: u64,
    pub frontier_high_water: u64,
    /// `None` while the sequence can still produce items.
    pub termination: Option<TerminationReason>,
}

impl SearchStats {
    /// Canonical JSON form; keys sorted, integers only.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "dead_ends": self.dead_ends,
            "depth_pruned": self.depth_pruned,
            "duplicates_suppressed": self.duplicates_suppressed,
            "expansions": self.expansions,
            "frontier_high_water": self.frontier_high_water,
            "goals_yielded": self.goals_yielded,
            "nodes_generated": self.nodes_generated,
            "termination": self.termination.map(TerminationReason::as_str),
        })
    }
}
