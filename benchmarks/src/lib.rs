//! Shared grammars and regimes for the benchmark suites.

use std::convert::Infallible;

use neurosym_kernel::dsl::{Dsl, Production};
use neurosym_kernel::programs::SExpression;
use neurosym_kernel::types::{Type, TypeSignature};
use neurosym_search::{
    bfs, bounded_astar, Bfs, BoundedAStar, DslSearchGraph, DslSearchNode, SearchError,
    SearchPolicy, SearchStats, ZeroCost,
};

#[must_use]
pub fn int() -> Type {
    Type::atomic("int")
}

/// `one`, `add`, `neg`, `mul` over `i64`, with `padding` extra nullary
/// constants to widen the branching factor.
///
/// # Panics
///
/// Never for the symbols generated here; duplicate symbols are impossible.
#[must_use]
pub fn arith_dsl(padding: usize) -> Dsl<i64> {
    let binary = || TypeSignature::new(vec![int(), int()], int());
    let mut productions = vec![
        Production::stateless("one", TypeSignature::constant(int()), |_| Ok(1)),
        Production::stateless("add", binary(), |xs: &[i64]| Ok(xs[0] + xs[1])),
        Production::stateless("neg", TypeSignature::new(vec![int()], int()), |xs: &[i64]| {
            Ok(-xs[0])
        }),
        Production::stateless("mul", binary(), |xs: &[i64]| Ok(xs[0] * xs[1])),
    ];
    for i in 0..padding {
        productions.push(Production::stateless(
            format!("zero_{i}"),
            TypeSignature::constant(int()),
            |_| Ok(0),
        ));
    }
    Dsl::new("bench_arith", productions).unwrap_or_else(|e| panic!("bench dsl: {e}"))
}

/// Goal: complete and evaluates to `target`. Evaluation errors count as misses.
pub fn evaluates_to<'d>(target: i64) -> impl Fn(&DslSearchNode<'d, i64>) -> Result<bool, Infallible> {
    move |node: &DslSearchNode<'d, i64>| {
        Ok(node.is_complete() && node.evaluate().is_ok_and(|v| v == target))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Bfs,
    BoundedAStar,
}

/// One benchmark configuration.
#[derive(Debug, Clone)]
pub struct Regime {
    pub name: &'static str,
    pub padding: usize,
    pub target: i64,
    pub strategy: Strategy,
    pub policy: SearchPolicy,
}

/// The fixed regime set reported by `search_report`.
#[must_use]
pub fn regimes() -> Vec<Regime> {
    let budget = |n| SearchPolicy {
        max_expansions: Some(n),
        ..SearchPolicy::bounded(6)
    };
    vec![
        Regime {
            name: "bfs_shallow_goal",
            padding: 0,
            target: 3,
            strategy: Strategy::Bfs,
            policy: budget(100_000),
        },
        Regime {
            name: "bfs_wide_budget_limited",
            padding: 16,
            target: -7,
            strategy: Strategy::Bfs,
            policy: budget(5_000),
        },
        Regime {
            name: "astar_exhaustive_no_goal",
            padding: 0,
            target: 1_000,
            strategy: Strategy::BoundedAStar,
            policy: SearchPolicy::bounded(6),
        },
        Regime {
            name: "astar_wide_first_goal",
            padding: 8,
            target: 2,
            strategy: Strategy::BoundedAStar,
            policy: SearchPolicy::bounded(6),
        },
    ]
}

/// What one run of a regime produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RegimeOutcome {
    /// The first goal, if the search reached one.
    pub solution: Option<SExpression>,
    pub stats: SearchStats,
}

/// Run `regime` on `dsl` to its first goal (or exhaustion).
///
/// # Errors
///
/// Returns [`SearchError::UnsupportedPolicyMode`] if the regime's policy
/// fails validation.
pub fn run_regime(dsl: &Dsl<i64>, regime: &Regime) -> Result<RegimeOutcome, SearchError> {
    let graph = DslSearchGraph::new(dsl, int(), evaluates_to(regime.target));
    Ok(match regime.strategy {
        Strategy::Bfs => {
            let mut search: Bfs<_> = Bfs::with_policy(&graph, &regime.policy)?;
            let solution = program_of(search.next());
            RegimeOutcome {
                solution,
                stats: search.stats().clone(),
            }
        }
        Strategy::BoundedAStar => {
            let mut search = BoundedAStar::with_policy(&graph, ZeroCost, &regime.policy)?;
            let solution = program_of(search.next());
            RegimeOutcome {
                solution,
                stats: search.stats().clone(),
            }
        }
    })
}

fn program_of(found: Option<Result<DslSearchNode<'_, i64>, Infallible>>) -> Option<SExpression> {
    found.and_then(Result::ok).map(|n| n.program().clone())
}

/// Unbudgeted BFS for the first program of `target`; used by the micro suite.
#[must_use]
pub fn bfs_first(dsl: &Dsl<i64>, target: i64) -> Option<DslSearchNode<'_, i64>> {
    let graph = DslSearchGraph::new(dsl, int(), evaluates_to(target));
    bfs(&graph).next().and_then(Result::ok)
}

/// Number of nodes reachable within `max_depth`, via bounded A* with no goal.
#[must_use]
pub fn astar_reachable(dsl: &Dsl<i64>, max_depth: u32) -> u64 {
    let graph = DslSearchGraph::new(dsl, int(), |_: &DslSearchNode<i64>| Ok::<_, Infallible>(false));
    let mut search = bounded_astar(&graph, ZeroCost, max_depth);
    let _ = search.next();
    search.stats().expansions
}
