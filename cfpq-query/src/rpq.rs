//! Regular path query engines.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use cfpq_automaton::{regex_to_min_dfa, AutomatonMatrix, Nfa};
use cfpq_graph::LabeledGraph;
use cfpq_matrix::SparseBitMatrix;
use cfpq_regexp::Regex;
use cfpq_symbol::Symbol;

use crate::QueryError;

/// The result of a reachability query.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Reachable {
    /// Final nodes reachable from the start set as a whole.
    All(BTreeSet<u64>),
    /// Final nodes reachable from each start node separately.
    PerSource(BTreeMap<u64, BTreeSet<u64>>),
}

/// Answers a regular path query by Kronecker intersection and
/// transitive closure.
///
/// Returns every pair `(u, v)` with `u` in the start set, `v` in the
/// final set, and some nonempty `u → v` path whose label word the
/// query accepts. Missing start or final sets default to all nodes.
pub fn rpq(
    graph: &LabeledGraph,
    query: &str,
    start_nodes: Option<&BTreeSet<u64>>,
    final_nodes: Option<&BTreeSet<u64>>,
) -> Result<BTreeSet<(u64, u64)>, QueryError> {
    let regex: Regex = query.parse()?;
    let graph_matrix =
        AutomatonMatrix::from_nfa(&Nfa::from_graph(graph, start_nodes, final_nodes));
    let query_matrix = AutomatonMatrix::from_dfa(&regex_to_min_dfa(&regex));

    let intersection = graph_matrix.intersect(&query_matrix);
    let closure = intersection.transitive_closure();
    debug!(
        "rpq: {}×{} product, closure has {} bits",
        graph_matrix.len(),
        query_matrix.len(),
        closure.nnz()
    );

    let mut result = BTreeSet::new();
    for (from, to) in closure.iter() {
        if intersection.starts().contains(&from) && intersection.finals().contains(&to) {
            let from_node = graph_matrix.state_index().state(from / query_matrix.len());
            let to_node = graph_matrix.state_index().state(to / query_matrix.len());
            if let (Some(from_node), Some(to_node)) = (from_node.node(), to_node.node()) {
                result.insert((from_node, to_node));
            }
        }
    }
    Ok(result)
}

/// Answers a regular path reachability query by synchronized BFS
/// through the query automaton.
///
/// With `all_reachable` unset, returns the flat set of final nodes
/// reachable from the start set; set, returns one reachable-set per
/// start node. An empty graph or start set yields an empty result of
/// the matching shape.
pub fn rpq_bfs(
    graph: &LabeledGraph,
    query: &str,
    start_nodes: Option<&BTreeSet<u64>>,
    final_nodes: Option<&BTreeSet<u64>>,
    all_reachable: bool,
) -> Result<Reachable, QueryError> {
    let regex: Regex = query.parse()?;
    let graph_matrix =
        AutomatonMatrix::from_nfa(&Nfa::from_graph(graph, start_nodes, final_nodes));
    let query_matrix = AutomatonMatrix::from_dfa(&regex_to_min_dfa(&regex));
    Ok(sync_bfs(&graph_matrix, &query_matrix, all_reachable))
}

/// Runs the synchronized BFS of a graph automaton against a query
/// automaton.
///
/// The front is a `(blocks·m, n)` matrix: row `b·m + r` holds the
/// graph states currently associated with query state `r` for source
/// block `b`. Each step advances the whole front along one label's
/// graph matrix, then routes rows through the query's transitions
/// under that label. Only bits never seen before survive into the
/// next front, so the loop is bounded by the bit capacity.
fn sync_bfs(
    graph: &AutomatonMatrix,
    query: &AutomatonMatrix,
    all_reachable: bool,
) -> Reachable {
    let graph_starts: Vec<usize> = graph.starts().iter().copied().collect();
    if graph_starts.is_empty() {
        return if all_reachable {
            Reachable::PerSource(BTreeMap::new())
        } else {
            Reachable::All(BTreeSet::new())
        };
    }

    let (m, n) = (query.len(), graph.len());
    let blocks = if all_reachable { graph_starts.len() } else { 1 };
    let common_labels: Vec<Symbol> = graph
        .labels()
        .filter(|label| query.label_matrix(label).is_some())
        .cloned()
        .collect();

    let mut front = SparseBitMatrix::new(blocks * m, n);
    if all_reachable {
        for (block, &graph_start) in graph_starts.iter().enumerate() {
            for &query_start in query.starts() {
                front.set(block * m + query_start, graph_start, true);
            }
        }
    } else {
        for &query_start in query.starts() {
            for &graph_start in &graph_starts {
                front.set(query_start, graph_start, true);
            }
        }
    }
    let mut visited = front.clone();

    while !front.is_zero() {
        let mut next = SparseBitMatrix::new(blocks * m, n);
        for label in &common_labels {
            let part = front.matmul(graph.label_matrix(label).expect("label is common"));
            let query_moves = query.label_matrix(label).expect("label is common");
            for (from, to) in query_moves.iter() {
                for block in 0..blocks {
                    next.or_row(block * m + to, part.row(block * m + from));
                }
            }
        }
        front = next.minus(&visited);
        visited.or_assign(&front);
        debug!("bfs front {} bits, visited {}", front.nnz(), visited.nnz());
    }

    let reachable_of_block = |block: usize| -> BTreeSet<u64> {
        let mut columns = BTreeSet::new();
        for &query_final in query.finals() {
            columns.extend(visited.row(block * m + query_final).iter().copied());
        }
        columns
            .into_iter()
            .filter(|column| graph.finals().contains(column))
            .filter_map(|column| graph.state_index().state(column).node())
            .collect()
    };

    if all_reachable {
        Reachable::PerSource(
            graph_starts
                .iter()
                .enumerate()
                .filter_map(|(block, &start)| {
                    graph
                        .state_index()
                        .state(start)
                        .node()
                        .map(|node| (node, reachable_of_block(block)))
                })
                .collect(),
        )
    } else {
        Reachable::All(reachable_of_block(0))
    }
}
