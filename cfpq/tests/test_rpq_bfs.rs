//! The synchronized-BFS RPQ engine, single- and multi-source.

mod support;

use std::collections::BTreeSet;

use cfpq::{rpq, rpq_bfs, LabeledGraph, Reachable};
use support::{diamond_graph, nodes, per_source};

#[test]
fn empty_graph_returns_an_empty_map() {
    let graph = LabeledGraph::new();
    let result = rpq_bfs(&graph, "A", None, None, true).unwrap();
    assert_eq!(result, Reachable::PerSource(per_source(&[])));
}

#[test]
fn single_start_single_final() {
    let graph = LabeledGraph::two_cycles(5, 3, ("A", "B"));
    let starts = nodes(&[0]);
    let finals: BTreeSet<u64> = (1..=6).collect();
    let result = rpq_bfs(&graph, "AAAAAA|B", Some(&starts), Some(&finals), true).unwrap();
    assert_eq!(result, Reachable::PerSource(per_source(&[(0, &[6])])));
}

#[test]
fn all_starts_flat_set() {
    let graph = LabeledGraph::two_cycles(5, 3, ("A", "B"));
    let result = rpq_bfs(&graph, "AAAAAA|B", None, None, false).unwrap();
    assert_eq!(result, Reachable::All(nodes(&[0, 6, 7, 8])));
}

#[test]
fn diamond_single_source() {
    let graph = diamond_graph();
    let result = rpq_bfs(
        &graph,
        "(A|B)C(D*)(E*)",
        Some(&nodes(&[0])),
        Some(&nodes(&[3])),
        false,
    )
    .unwrap();
    assert_eq!(result, Reachable::All(nodes(&[3])));
}

#[test]
fn diamond_per_source() {
    let graph = diamond_graph();
    let result = rpq_bfs(
        &graph,
        "(A*)(C*)(E*)",
        Some(&nodes(&[0])),
        Some(&nodes(&[4, 5])),
        true,
    )
    .unwrap();
    assert_eq!(result, Reachable::PerSource(per_source(&[(0, &[4, 5])])));
}

#[test]
fn bfs_agrees_with_the_tensor_engine() {
    let graph = LabeledGraph::two_cycles(2, 3, ("a", "b"));
    for query in ["a", "a b", "(a*)(b*)", "a a | b"] {
        let tensor_pairs = rpq(&graph, query, None, None).unwrap();
        let mut bfs_pairs = BTreeSet::new();
        for start in graph.nodes() {
            let starts = BTreeSet::from([start]);
            match rpq_bfs(&graph, query, Some(&starts), None, false).unwrap() {
                Reachable::All(reached) => {
                    bfs_pairs.extend(reached.into_iter().map(|end| (start, end)));
                }
                Reachable::PerSource(_) => unreachable!("single-source query"),
            }
        }
        assert_eq!(tensor_pairs, bfs_pairs, "query {:?}", query);
    }
}
