//! End-to-end scenarios on the arithmetic grammar.

use lock_tests::{arith_dsl, arith_production, evaluates_to, int};
use neurosym_kernel::dsl::{Dsl, DslError, Production};
use neurosym_kernel::programs::SExpression;
use neurosym_kernel::proof::canon::canonical_json_bytes;
use neurosym_kernel::types::{Type, TypeSignature};
use neurosym_search::{
    bfs, bounded_astar, first_solution, Bfs, BoundedAStar, DslSearchGraph, DslSearchNode,
    MemoizedMetadata, SearchError, SearchGraph, SearchPolicy, TerminationReason, ZeroCost,
};

fn one() -> SExpression {
    SExpression::leaf("one")
}

fn add(a: SExpression, b: SExpression) -> SExpression {
    SExpression::new("add", vec![a, b])
}

// ---------------------------------------------------------------------------
// Breadth-first search
// ---------------------------------------------------------------------------

#[test]
fn bfs_finds_four_with_nullary_first() {
    let dsl = arith_dsl(&["one", "add"]);
    let graph = DslSearchGraph::new(&dsl, int(), evaluates_to(4));
    let mut search = bfs(&graph);
    let found = search.next().unwrap().unwrap();

    assert_eq!(
        found.program(),
        &add(one(), add(one(), add(one(), one())))
    );
    assert_eq!(found.to_string(), "(add one (add one (add one one)))");
    assert_eq!(dsl.evaluate(found.program()).unwrap(), 4);
    assert_eq!(found.filled_count(), 7);
    assert_eq!(search.stats().expansions, 48);
    assert_eq!(search.stats().duplicates_suppressed, 0);
    assert_eq!(search.stats().termination, None);
}

#[test]
fn bfs_finds_four_with_binary_first() {
    let dsl = arith_dsl(&["add", "one"]);
    let graph = DslSearchGraph::new(&dsl, int(), evaluates_to(4));
    let found = first_solution(bfs(&graph)).unwrap();
    assert_eq!(
        found.program(),
        &add(add(add(one(), one()), one()), one())
    );
}

#[test]
fn bfs_enumerates_every_shape_of_four() {
    // Five binary trees with four leaves, all at depth 7.
    let dsl = arith_dsl(&["one", "add"]);
    let graph = DslSearchGraph::new(&dsl, int(), evaluates_to(4));
    let found: Vec<DslSearchNode<i64>> = bfs(&graph).take(5).map(Result::unwrap).collect();
    assert!(found.iter().all(|n| n.filled_count() == 7));
    let mut programs: Vec<&SExpression> = found.iter().map(DslSearchNode::program).collect();
    programs.sort();
    programs.dedup();
    assert_eq!(programs.len(), 5);
}

#[test]
fn bfs_budget_turns_missing_goal_into_no_solution() {
    let dsl = arith_dsl(&["one", "add"]);
    let graph = DslSearchGraph::new(&dsl, int(), evaluates_to(-1));
    let policy = SearchPolicy {
        max_expansions: Some(500),
        ..SearchPolicy::default()
    };
    let search = Bfs::with_policy(&graph, &policy).unwrap();
    let err = first_solution(search).unwrap_err();
    assert!(matches!(err, SearchError::NoSolutionFound), "got {err:?}");
}

// ---------------------------------------------------------------------------
// Bounded best-first search
// ---------------------------------------------------------------------------

#[test]
fn astar_respects_depth_cap() {
    let dsl = arith_dsl(&["one", "add"]);
    let graph = DslSearchGraph::new(&dsl, int(), evaluates_to(4));
    let mut search = bounded_astar(&graph, ZeroCost, 1);
    assert!(search.next().is_none());

    let stats = search.stats();
    assert_eq!(stats.termination, Some(TerminationReason::FrontierExhausted));
    // Root and its two children are expanded; the grandchildren are discarded.
    assert_eq!(stats.expansions, 3);
    assert_eq!(stats.depth_pruned, 2);
    assert_eq!(stats.goals_yielded, 0);
}

#[test]
fn astar_terminates_when_no_goal_exists() {
    let dsl = arith_dsl(&["one", "add"]);
    let graph = DslSearchGraph::new(&dsl, int(), evaluates_to(-1));
    for max_depth in 0..6 {
        let search = bounded_astar(&graph, ZeroCost, max_depth);
        assert_eq!(search.count(), 0, "max_depth={max_depth}");
    }
}

#[test]
fn astar_zero_cost_follows_bfs_order_within_bound() {
    let dsl = arith_dsl(&["one", "add"]);
    let graph = DslSearchGraph::new(&dsl, int(), evaluates_to(4));

    let from_bfs = first_solution(bfs(&graph)).unwrap();
    let from_astar = first_solution(bounded_astar(&graph, ZeroCost, 7)).unwrap();
    assert_eq!(from_astar, from_bfs);

    let too_shallow = first_solution(bounded_astar(&graph, ZeroCost, 6)).unwrap_err();
    assert!(matches!(too_shallow, SearchError::NoSolutionFound));
}

#[test]
fn astar_yields_goals_in_cost_order() {
    let dsl = arith_dsl(&["one", "add"]);
    // Any complete program is a goal; cost is program size.
    let graph = DslSearchGraph::new(&dsl, int(), |n: &DslSearchNode<i64>| {
        Ok::<_, DslError>(n.is_complete())
    });
    let size = |n: &DslSearchNode<i64>| f64::from(u32::try_from(n.program().node_count()).unwrap());
    let sizes: Vec<usize> = bounded_astar(&graph, size, 7)
        .map(|r| r.unwrap().program().node_count())
        .collect();
    assert!(!sizes.is_empty());
    assert!(sizes.windows(2).all(|w| w[0] <= w[1]), "{sizes:?}");
    assert_eq!(sizes[0], 1);
}

#[test]
fn astar_memoized_cost_computes_each_node_once() {
    let dsl = arith_dsl(&["one", "add"]);
    let graph = DslSearchGraph::new(&dsl, int(), evaluates_to(3));
    let holes = |n: &DslSearchNode<i64>| f64::from(u32::try_from(n.holes().len()).unwrap());
    let memo = MemoizedMetadata::<DslSearchNode<i64>, _>::new(holes);
    let policy = SearchPolicy::bounded(5);

    let mut search = BoundedAStar::with_policy(&graph, memo, &policy).unwrap();
    let found: Vec<DslSearchNode<i64>> = search.by_ref().map(Result::unwrap).collect();
    assert!(found.iter().all(|n| dsl.evaluate(n.program()).unwrap() == 3));
    assert!(!found.is_empty());

    let memo = search.cost_function();
    let stats = search.stats();
    // One computation per pushed node: the root plus every generated child.
    assert_eq!(memo.misses(), stats.nodes_generated + 1);
    assert_eq!(memo.hits(), 0, "each node is costed once");
}

#[test]
fn astar_is_deterministic_across_runs() {
    let dsl = arith_dsl(&["one", "add", "scale"]);
    let run = || {
        let graph = DslSearchGraph::new(&dsl, int(), evaluates_to(3));
        let mut search = bounded_astar(&graph, ZeroCost, 5);
        let found: Vec<String> = search.by_ref().map(|r| r.unwrap().to_string()).collect();
        let stats = canonical_json_bytes(&search.stats().to_json_value()).unwrap();
        (found, stats)
    };
    let first = run();
    assert!(!first.0.is_empty());
    for _ in 1..10 {
        assert_eq!(run(), first, "search output differs across runs");
    }
}

// ---------------------------------------------------------------------------
// Failure semantics
// ---------------------------------------------------------------------------

#[test]
fn dead_end_node_has_no_children() {
    let dsl = arith_dsl(&["parse_int", "one"]);
    let graph = DslSearchGraph::new(&dsl, int(), evaluates_to(1));
    let root = graph.initial_node();
    let children = graph.expand_node(&root);
    assert_eq!(children[0].to_string(), "(parse_int $1)");
    assert!(graph.expand_node(&children[0]).is_empty());

    let mut search = bfs(&graph);
    let found = search.next().unwrap().unwrap();
    assert_eq!(found.program(), &one());
    // The dead end is expanded once and never revisited.
    assert!(search.next().is_none());
    assert_eq!(search.stats().expansions, 3);
    assert_eq!(search.stats().dead_ends, 2);
}

#[test]
fn evaluator_failure_reaches_consumer_unchanged() {
    let dsl = arith_dsl(&["boom", "one"]);
    let graph = DslSearchGraph::new(&dsl, int(), evaluates_to(1));
    let mut search = bfs(&graph);

    let err = search.next().unwrap().unwrap_err();
    match &err {
        DslError::Compute { symbol, source } => {
            assert_eq!(symbol, "boom");
            assert_eq!(source.to_string(), "boom cannot be evaluated");
        }
        other => panic!("expected Compute, got {other:?}"),
    }
    // The sequence continues past the failure.
    let found = search.next().unwrap().unwrap();
    assert_eq!(found.program(), &one());

    let wrapped = first_solution(bfs(&graph)).unwrap_err();
    assert!(matches!(wrapped, SearchError::Goal(DslError::Compute { .. })));
}

#[test]
fn no_production_for_target_is_empty_not_error() {
    let dsl = arith_dsl(&["one", "add"]);
    let graph = DslSearchGraph::new(&dsl, Type::atomic("str"), |_: &DslSearchNode<i64>| {
        Ok::<_, DslError>(true)
    });
    // Only the root, which is itself a goal under this predicate.
    let all: Vec<_> = bfs(&graph).map(Result::unwrap).collect();
    assert_eq!(all.len(), 1);
    assert!(!all[0].is_complete());
}

#[test]
fn parameterized_production_in_search() {
    let dsl = arith_dsl(&["one", "scale", "add"]);
    let graph = DslSearchGraph::new(&dsl, int(), evaluates_to(9));
    let found = first_solution(bfs(&graph)).unwrap();
    assert_eq!(found.to_string(), "(scale (scale one))");
}

#[test]
fn goal_evaluates_with_the_node_dsl() {
    // Same symbols, different meaning of `one`.
    let doubled = Dsl::new(
        "doubled",
        vec![
            Production::stateless("one", TypeSignature::constant(int()), |_| Ok(2)),
            arith_production("add"),
        ],
    )
    .unwrap();
    let plain = arith_dsl(&["one", "add"]);

    let found = first_solution(bfs(DslSearchGraph::new(&doubled, int(), evaluates_to(4)))).unwrap();
    assert_eq!(found.to_string(), "(add one one)");
    assert!(std::ptr::eq(found.dsl(), &doubled));
    assert_eq!(found.target(), &int());
    assert_eq!(found.evaluate().unwrap(), 4);
    assert_eq!(plain.evaluate(found.program()).unwrap(), 2);

    let found = first_solution(bfs(DslSearchGraph::new(&plain, int(), evaluates_to(4)))).unwrap();
    assert_eq!(found.to_string(), "(add one (add one (add one one)))");
    assert!(std::ptr::eq(found.dsl(), &plain));
}
