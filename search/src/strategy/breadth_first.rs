use std::iter::FusedIterator;

use log::{debug, trace};

use crate::contract::SearchGraph;
use crate::error::SearchError;
use crate::frontier::FifoFrontier;
use crate::policy::SearchPolicy;
use crate::stats::{SearchStats, TerminationReason};

/// Breadth-first search from the graph's initial node, with no budget.
pub fn bfs<G: SearchGraph>(graph: G) -> Bfs<G> {
    Bfs::start(graph, SearchPolicy::default())
}

/// Lazy breadth-first goal enumeration.
///
/// Goals come out in non-decreasing depth order. Children are enqueued in
/// the graph's declared order whether or not their parent is a goal. The
/// sequence is infinite when the graph is and no budget is set.
pub struct Bfs<G: SearchGraph> {
    graph: G,
    frontier: FifoFrontier<G::Node>,
    policy: SearchPolicy,
    stats: SearchStats,
}

impl<G: SearchGraph> Bfs<G> {
    /// Breadth-first search honoring `policy`'s expansion budget and dedup
    /// mode. `max_depth` does not apply.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UnsupportedPolicyMode`] if the policy fails
    /// validation.
    pub fn with_policy(graph: G, policy: &SearchPolicy) -> Result<Self, SearchError> {
        policy.validate()?;
        Ok(Self::start(graph, policy.clone()))
    }

    fn start(graph: G, policy: SearchPolicy) -> Self {
        let mut frontier = FifoFrontier::new(policy.dedup);
        frontier.push(graph.initial_node(), 0);
        debug!(
            "bfs start: max_expansions={:?} dedup={:?}",
            policy.max_expansions, policy.dedup
        );
        Self {
            graph,
            frontier,
            policy,
            stats: SearchStats {
                frontier_high_water: 1,
                ..SearchStats::default()
            },
        }
    }

    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    #[must_use]
    pub fn graph(&self) -> &G {
        &self.graph
    }

    fn finish(&mut self, reason: TerminationReason) {
        self.stats.termination = Some(reason);
        debug!("bfs finished ({}): {}", reason.as_str(), self.stats.to_json_value());
    }
}

impl<G: SearchGraph> Iterator for Bfs<G> {
    type Item = Result<G::Node, G::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.stats.termination.is_some() {
            return None;
        }
        loop {
            if self.policy.budget_exhausted(self.stats.expansions) {
                self.finish(TerminationReason::ExpansionBudgetExceeded);
                return None;
            }
            let Some((node, depth)) = self.frontier.pop() else {
                self.finish(TerminationReason::FrontierExhausted);
                return None;
            };

            let goal = self.graph.is_goal_node(&node);
            self.stats.expansions += 1;
            let children = self.graph.expand_node(&node);
            trace!(
                "bfs expand #{} depth={depth} children={}",
                self.stats.expansions,
                children.len()
            );
            if children.is_empty() {
                self.stats.dead_ends += 1;
            }
            for child in children {
                self.stats.nodes_generated += 1;
                if !self.frontier.push(child, depth.saturating_add(1)) {
                    self.stats.duplicates_suppressed += 1;
                }
            }
            self.stats.frontier_high_water = self.frontier.high_water();

            match goal {
                Ok(false) => {}
                Ok(true) => {
                    self.stats.goals_yielded += 1;
                    return Some(Ok(node));
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

impl<G: SearchGraph> FusedIterator for Bfs<G> {}
