use std::iter::FusedIterator;

use log::{debug, trace};

use crate::contract::SearchGraph;
use crate::cost::CostFunction;
use crate::error::SearchError;
use crate::frontier::BestFirstFrontier;
use crate::policy::SearchPolicy;
use crate::stats::{SearchStats, TerminationReason};

/// Bounded best-first search: nodes deeper than `max_depth` are discarded
/// when popped, so the sequence is always finite.
pub fn bounded_astar<G, C>(graph: G, cost: C, max_depth: u32) -> BoundedAStar<G, C>
where
    G: SearchGraph,
    C: CostFunction<G::Node>,
{
    BoundedAStar::start(graph, cost, SearchPolicy::bounded(max_depth))
}

/// Lazy best-first goal enumeration under a depth bound.
///
/// Pops the lowest-cost node (ties in discovery order). A node within the
/// bound is goal-tested, then expanded; its children are pushed one level
/// deeper with their own costs. Goals come out in non-decreasing cost order
/// when the cost function is monotone along expansion.
pub struct BoundedAStar<G: SearchGraph, C> {
    graph: G,
    cost: C,
    frontier: BestFirstFrontier<G::Node>,
    policy: SearchPolicy,
    stats: SearchStats,
}

impl<G, C> BoundedAStar<G, C>
where
    G: SearchGraph,
    C: CostFunction<G::Node>,
{
    /// Bounded best-first search with `policy.max_depth` as the bound.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UnsupportedPolicyMode`] if the policy fails
    /// validation.
    pub fn with_policy(graph: G, cost: C, policy: &SearchPolicy) -> Result<Self, SearchError> {
        policy.validate()?;
        Ok(Self::start(graph, cost, policy.clone()))
    }

    fn start(graph: G, mut cost: C, policy: SearchPolicy) -> Self {
        let mut frontier = BestFirstFrontier::new(policy.dedup);
        let root = graph.initial_node();
        let root_cost = cost.cost(&root);
        frontier.push(root, 0, root_cost);
        debug!(
            "bounded astar start: max_depth={} max_expansions={:?} dedup={:?}",
            policy.max_depth, policy.max_expansions, policy.dedup
        );
        Self {
            graph,
            cost,
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

    /// The cost function, e.g. to read a memoized cache's counters.
    #[must_use]
    pub fn cost_function(&self) -> &C {
        &self.cost
    }

    fn finish(&mut self, reason: TerminationReason) {
        self.stats.termination = Some(reason);
        debug!(
            "bounded astar finished ({}): {}",
            reason.as_str(),
            self.stats.to_json_value()
        );
    }
}

impl<G, C> Iterator for BoundedAStar<G, C>
where
    G: SearchGraph,
    C: CostFunction<G::Node>,
{
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
            let Some((node, depth, key)) = self.frontier.pop() else {
                self.finish(TerminationReason::FrontierExhausted);
                return None;
            };
            if depth > self.policy.max_depth {
                self.stats.depth_pruned += 1;
                trace!("bounded astar prune depth={depth} cost={}", key.cost);
                continue;
            }

            let goal = self.graph.is_goal_node(&node);
            self.stats.expansions += 1;
            let children = self.graph.expand_node(&node);
            trace!(
                "bounded astar expand #{} depth={depth} cost={} children={}",
                self.stats.expansions,
                key.cost,
                children.len()
            );
            if children.is_empty() {
                self.stats.dead_ends += 1;
            }
            for child in children {
                self.stats.nodes_generated += 1;
                let child_cost = self.cost.cost(&child);
                if !self.frontier.push(child, depth.saturating_add(1), child_cost) {
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

impl<G, C> FusedIterator for BoundedAStar<G, C>
where
    G: SearchGraph,
    C: CostFunction<G::Node>,
{
}
