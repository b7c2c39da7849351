//! Context-free path query engines.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::str::FromStr;

use log::debug;

use cfpq_automaton::{AutomatonMatrix, Nfa};
use cfpq_graph::LabeledGraph;
use cfpq_grammar::{Cfg, Ecfg, Rsm};
use cfpq_matrix::SparseBitMatrix;
use cfpq_symbol::{State, Symbol};

use crate::QueryError;

/// A derivability fact: the variable derives some path between the
/// two nodes.
pub type Triple = (u64, Symbol, u64);

/// The context-free engines the façade can dispatch to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CfpqAlgo {
    /// The Hellings worklist algorithm.
    Hellings,
    /// Per-variable boolean matrix closure.
    Matrix,
    /// Kronecker products against a recursive state machine.
    Tensor,
}

impl FromStr for CfpqAlgo {
    type Err = QueryError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "hellings" => Ok(CfpqAlgo::Hellings),
            "matrix" => Ok(CfpqAlgo::Matrix),
            "tensor" => Ok(CfpqAlgo::Tensor),
            other => Err(QueryError::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// Computes every derivable triple by the Hellings algorithm.
///
/// Seeds ε-variables on the diagonal and single-terminal variables on
/// matching edges, then closes over the two-variable productions with
/// a worklist. The triple space is finite, so the worklist drains.
pub fn hellings(cfg: &Cfg, graph: &LabeledGraph) -> BTreeSet<Triple> {
    if graph.number_of_nodes() == 0 {
        return BTreeSet::new();
    }
    let weak = cfg.to_weak_cnf();
    let pairs: Vec<(Symbol, Symbol, Symbol)> = weak
        .pair_productions()
        .map(|(head, left, right)| (head.clone(), left.clone(), right.clone()))
        .collect();

    let mut result = seed_triples(&weak, graph);
    let mut worklist: VecDeque<Triple> = result.iter().cloned().collect();

    while let Some((from, popped, to)) = worklist.pop_front() {
        let mut found = vec![];
        for (other_from, other, other_to) in &result {
            if *other_to == from {
                for (head, left, right) in &pairs {
                    if left == other && *right == popped {
                        found.push((*other_from, head.clone(), to));
                    }
                }
            }
            if to == *other_from {
                for (head, left, right) in &pairs {
                    if *left == popped && right == other {
                        found.push((from, head.clone(), *other_to));
                    }
                }
            }
        }
        for triple in found {
            if result.insert(triple.clone()) {
                worklist.push_back(triple);
            }
        }
    }
    result
}

/// Computes every derivable triple by per-variable matrix closure.
///
/// One n×n boolean matrix per variable, seeded like Hellings; each
/// sweep ORs `M_B · M_C` into `M_A` for every production `A -> B C`
/// until a full sweep changes nothing.
pub fn matrix_cfpq(cfg: &Cfg, graph: &LabeledGraph) -> BTreeSet<Triple> {
    let nodes: Vec<u64> = graph.nodes().collect();
    if nodes.is_empty() {
        return BTreeSet::new();
    }
    let index_of: BTreeMap<u64, usize> = nodes
        .iter()
        .enumerate()
        .map(|(index, &node)| (node, index))
        .collect();
    let weak = cfg.to_weak_cnf();

    let mut matrices: BTreeMap<Symbol, SparseBitMatrix> = weak
        .variables()
        .into_iter()
        .map(|variable| (variable, SparseBitMatrix::new(nodes.len(), nodes.len())))
        .collect();
    for head in weak.epsilon_heads() {
        let matrix = matrices.get_mut(&head).expect("head is a variable");
        for index in 0..nodes.len() {
            matrix.set(index, index, true);
        }
    }
    for (from, label, to) in graph.labeled_edges() {
        for (head, terminal) in weak.terminal_productions() {
            if terminal == label {
                matrices
                    .get_mut(head)
                    .expect("head is a variable")
                    .set(index_of[&from], index_of[&to], true);
            }
        }
    }

    let pairs: Vec<(Symbol, Symbol, Symbol)> = weak
        .pair_productions()
        .map(|(head, left, right)| (head.clone(), left.clone(), right.clone()))
        .collect();
    loop {
        let mut changed = false;
        for (head, left, right) in &pairs {
            let product = matrices[left].matmul(&matrices[right]);
            let matrix = matrices.get_mut(head).expect("head is a variable");
            let before = matrix.nnz();
            matrix.or_assign(&product);
            changed |= matrix.nnz() != before;
        }
        if !changed {
            break;
        }
    }

    let mut result = BTreeSet::new();
    for (variable, matrix) in &matrices {
        for (from, to) in matrix.iter() {
            result.insert((nodes[from], variable.clone(), nodes[to]));
        }
    }
    result
}

/// Computes every derivable triple by iterated Kronecker products
/// against the grammar's recursive state machine.
///
/// The graph automaton grows a self-loop per nullable variable, then
/// repeatedly intersects with the machine; every closure bit that
/// runs a box from its start to a final state becomes a new
/// variable-labeled edge. The closure population is monotone and
/// bounded, so the loop stops.
pub fn tensor_cfpq(cfg: &Cfg, graph: &LabeledGraph) -> BTreeSet<Triple> {
    if graph.number_of_nodes() == 0 {
        return BTreeSet::new();
    }
    let machine = Rsm::from_ecfg(&Ecfg::from_cfg(cfg));
    let machine_matrix = machine.to_automaton_matrix();
    let mut graph_matrix = AutomatonMatrix::from_nfa(&Nfa::from_graph(graph, None, None));

    let nullable = cfg.nullable_symbols();
    for variable in &nullable {
        for position in 0..graph_matrix.len() {
            graph_matrix.insert_transition(variable.clone(), position, position);
        }
    }

    let graph_size = graph_matrix.len();
    let mut previous_population = None;
    loop {
        let intersection = machine_matrix.intersect(&graph_matrix);
        let closure = intersection.transitive_closure();
        debug!("tensor closure has {} bits", closure.nnz());
        if previous_population == Some(closure.nnz()) {
            break;
        }
        previous_population = Some(closure.nnz());

        for (from, to) in closure.iter() {
            let (machine_from, graph_from) = (from / graph_size, from % graph_size);
            let (machine_to, graph_to) = (to / graph_size, to % graph_size);
            if !machine_matrix.starts().contains(&machine_from)
                || !machine_matrix.finals().contains(&machine_to)
            {
                continue;
            }
            let entered = machine_matrix.state_index().state(machine_from);
            let finished = machine_matrix.state_index().state(machine_to);
            if let (State::InBox(entered_box, _), State::InBox(finished_box, _)) =
                (entered, finished)
            {
                if entered_box == finished_box {
                    graph_matrix.insert_transition(entered_box.clone(), graph_from, graph_to);
                }
            }
        }
    }

    let variables = cfg.variables();
    let mut result = BTreeSet::new();
    for variable in &variables {
        if let Some(matrix) = graph_matrix.label_matrix(variable) {
            for (from, to) in matrix.iter() {
                let from_state = graph_matrix.state_index().state(from);
                let to_state = graph_matrix.state_index().state(to);
                if let (Some(from_node), Some(to_node)) = (from_state.node(), to_state.node()) {
                    result.insert((from_node, variable.clone(), to_node));
                }
            }
        }
    }
    result
}

/// Executes a context-free path query and projects it to node pairs.
///
/// The algorithm tag is one of `hellings`, `matrix`, `tensor`. The
/// grammar is re-rooted at `start_symbol` (default `S`) without being
/// mutated; start and final node sets default to all nodes. A pair
/// `(u, v)` survives when some triple `(u, start_symbol, v)` was
/// derived with `u` in the start set and `v` in the final set.
pub fn run_cfpq(
    algo: &str,
    graph: &LabeledGraph,
    cfg: &Cfg,
    start_nodes: Option<&BTreeSet<u64>>,
    final_nodes: Option<&BTreeSet<u64>>,
    start_symbol: Option<&Symbol>,
) -> Result<BTreeSet<(u64, u64)>, QueryError> {
    let algo: CfpqAlgo = algo.parse()?;
    let start_symbol = start_symbol.cloned().unwrap_or_else(|| Symbol::new("S"));
    let rerooted = Cfg::new(
        start_symbol.clone(),
        cfg.productions().cloned().collect(),
    );
    let triples = match algo {
        CfpqAlgo::Hellings => hellings(&rerooted, graph),
        CfpqAlgo::Matrix => matrix_cfpq(&rerooted, graph),
        CfpqAlgo::Tensor => tensor_cfpq(&rerooted, graph),
    };

    let all_nodes: BTreeSet<u64> = graph.nodes().collect();
    let starts = start_nodes.unwrap_or(&all_nodes);
    let finals = final_nodes.unwrap_or(&all_nodes);
    Ok(triples
        .into_iter()
        .filter(|(from, variable, to)| {
            *variable == start_symbol && starts.contains(from) && finals.contains(to)
        })
        .map(|(from, _, to)| (from, to))
        .collect())
}

/// Seeds the derivable-triple set: ε-variables relate every node to
/// itself, single-terminal variables relate edge endpoints.
fn seed_triples(weak: &Cfg, graph: &LabeledGraph) -> BTreeSet<Triple> {
    let mut seeds = BTreeSet::new();
    for head in weak.epsilon_heads() {
        for node in graph.nodes() {
            seeds.insert((node, head.clone(), node));
        }
    }
    for (from, label, to) in graph.labeled_edges() {
        for (head, terminal) in weak.terminal_productions() {
            if terminal == label {
                seeds.insert((from, head.clone(), to));
            }
        }
    }
    seeds
}
