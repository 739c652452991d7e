//! Structural properties of the program graph and strategies.

use std::collections::HashSet;
use std::convert::Infallible;

use lock_tests::{arith_dsl, int};
use neurosym_kernel::programs::{parse_s_expression, render_s_expression, Parsed, RenderMode};
use neurosym_search::{
    bfs, Bfs, DslSearchGraph, DslSearchNode, Fingerprint, SearchGraph, SearchPolicy,
};

fn everything(_: &DslSearchNode<i64>) -> Result<bool, Infallible> {
    Ok(true)
}

/// All nodes reachable in `depth` expansions, level by level.
fn levels<G: SearchGraph>(graph: &G, depth: usize) -> Vec<Vec<G::Node>> {
    let mut out = vec![vec![graph.initial_node()]];
    for _ in 0..depth {
        let next: Vec<G::Node> = out
            .last()
            .into_iter()
            .flatten()
            .flat_map(|n| graph.expand_node(n))
            .collect();
        out.push(next);
    }
    out
}

#[test]
fn hole_filling_is_type_sound() {
    let dsl = arith_dsl(&["one", "add", "scale", "parse_int"]);
    let graph = DslSearchGraph::new(&dsl, int(), everything);
    for level in levels(&graph, 4) {
        for node in level {
            for child in graph.expand_node(&node) {
                let hole = node.selected_hole().unwrap();
                let filled = child.program().subtree_at(hole.path()).unwrap();
                let production = dsl.production(filled.symbol()).unwrap();
                assert_eq!(production.signature().return_type(), hole.ty());
                // Fresh holes are typed by the production's arguments.
                let fresh = &child.holes()[..production.signature().arity()];
                for (h, ty) in fresh.iter().zip(production.signature().arguments()) {
                    assert_eq!(h.ty(), ty);
                }
            }
        }
    }
}

#[test]
fn expansion_is_deterministic() {
    let dsl = arith_dsl(&["one", "add", "scale"]);
    let graph = DslSearchGraph::new(&dsl, int(), everything);
    let other = DslSearchGraph::new(&dsl, int(), everything);
    for node in levels(&graph, 3).concat() {
        let first = graph.expand_node(&node);
        let again = graph.expand_node(&node);
        let elsewhere = other.expand_node(&node);
        assert_eq!(first, again);
        assert_eq!(first, elsewhere);
        let a: Vec<_> = first.iter().map(Fingerprint::fingerprint).collect();
        let b: Vec<_> = again.iter().map(Fingerprint::fingerprint).collect();
        assert_eq!(a, b);
    }
}

#[test]
fn bfs_yields_in_non_decreasing_depth() {
    let dsl = arith_dsl(&["add", "scale", "one"]);
    let graph = DslSearchGraph::new(&dsl, int(), everything);
    let depths: Vec<usize> = bfs(&graph)
        .take(400)
        .map(|r| r.unwrap().filled_count())
        .collect();
    assert_eq!(depths[0], 0);
    assert!(depths.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn bfs_yields_each_node_once() {
    let dsl = arith_dsl(&["one", "add"]);
    let graph = DslSearchGraph::new(&dsl, int(), everything);
    let policy = SearchPolicy {
        max_expansions: Some(300),
        ..SearchPolicy::default()
    };
    let search = Bfs::with_policy(&graph, &policy).unwrap();
    let mut seen = HashSet::new();
    for node in search {
        let node = node.unwrap();
        assert!(seen.insert(node.fingerprint().clone()), "revisited {node}");
    }
    assert_eq!(seen.len(), 300);
}

#[test]
fn search_results_round_trip_through_text() {
    let dsl = arith_dsl(&["one", "add", "scale"]);
    let graph = DslSearchGraph::new(&dsl, int(), |n: &DslSearchNode<i64>| {
        Ok::<_, Infallible>(n.is_complete())
    });
    let nullary = dsl.nullary_symbols();
    for node in bfs(&graph).take(50) {
        let program = node.unwrap().program().clone();
        for mode in [RenderMode::Default, RenderMode::ForStitch] {
            let text = render_s_expression(&program, mode);
            let parsed = parse_s_expression(&text, &nullary, mode).unwrap();
            assert_eq!(parsed, Parsed::Expr(program.clone()), "{mode:?}: {text}");
        }
    }
}

#[test]
fn open_programs_round_trip_in_stitch_mode() {
    let dsl = arith_dsl(&["one", "add"]);
    let graph = DslSearchGraph::new(&dsl, int(), everything);
    let nullary = dsl.nullary_symbols();
    for node in levels(&graph, 3).concat() {
        let text = render_s_expression(node.program(), RenderMode::ForStitch);
        let parsed = parse_s_expression(&text, &nullary, RenderMode::ForStitch)
            .unwrap()
            .into_expression();
        assert_eq!(&parsed, node.program(), "{text}");
    }
}
