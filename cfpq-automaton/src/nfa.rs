//! The nondeterministic automaton type.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use cfpq_graph::LabeledGraph;
use cfpq_symbol::{State, Symbol};

use crate::StateIndex;

/// A nondeterministic finite automaton.
///
/// Transitions are exposed as iterable sets keyed by `(state,
/// symbol)`; a single successor is a one-element set like any other.
/// ε-transitions are ordinary transitions under [`Symbol::Epsilon`];
/// they appear during regex compilation and are gone after
/// determinization.
#[derive(Clone, Debug, Default)]
pub struct Nfa {
    index: StateIndex,
    starts: BTreeSet<usize>,
    finals: BTreeSet<usize>,
    transitions: BTreeMap<(usize, Symbol), BTreeSet<usize>>,
}

impl Nfa {
    /// Creates an automaton with no states.
    pub fn new() -> Self {
        Self::default()
    }

    /// Promotes a labeled multigraph to an automaton.
    ///
    /// States are the graph's nodes; every labeled edge becomes a
    /// transition, and parallel same-label edges collapse. Edges
    /// without a label are skipped. Missing start or final sets
    /// default to all nodes.
    pub fn from_graph(
        graph: &LabeledGraph,
        start_nodes: Option<&BTreeSet<u64>>,
        final_nodes: Option<&BTreeSet<u64>>,
    ) -> Self {
        let mut nfa = Nfa::new();
        for node in graph.nodes() {
            nfa.add_state(State::Node(node));
        }
        for (from, label, to) in graph.labeled_edges() {
            nfa.add_transition(State::Node(from), label.clone(), State::Node(to));
        }
        match start_nodes {
            Some(nodes) => {
                for &node in nodes {
                    nfa.add_start(State::Node(node));
                }
            }
            None => {
                for node in graph.nodes() {
                    nfa.add_start(State::Node(node));
                }
            }
        }
        match final_nodes {
            Some(nodes) => {
                for &node in nodes {
                    nfa.add_final(State::Node(node));
                }
            }
            None => {
                for node in graph.nodes() {
                    nfa.add_final(State::Node(node));
                }
            }
        }
        nfa
    }

    /// Adds a state, returning its position.
    pub fn add_state(&mut self, state: State) -> usize {
        self.index.insert(state)
    }

    /// Adds a transition, inserting its endpoint states.
    pub fn add_transition(&mut self, from: State, label: Symbol, to: State) {
        let from = self.index.insert(from);
        let to = self.index.insert(to);
        self.transitions.entry((from, label)).or_default().insert(to);
    }

    /// Marks a state as a start state, inserting it.
    pub fn add_start(&mut self, state: State) {
        let position = self.index.insert(state);
        self.starts.insert(position);
    }

    /// Marks a state as a final state, inserting it.
    pub fn add_final(&mut self, state: State) {
        let position = self.index.insert(state);
        self.finals.insert(position);
    }

    /// Allows access to the state index through a reference.
    pub fn state_index(&self) -> &StateIndex {
        &self.index
    }

    /// Returns the number of states.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Checks whether the automaton accepts no word at all.
    ///
    /// True when no final state is reachable from any start state
    /// (in particular for an automaton with no states).
    pub fn is_empty(&self) -> bool {
        let mut queue: VecDeque<usize> = self.starts.iter().copied().collect();
        let mut seen = self.starts.clone();
        while let Some(position) = queue.pop_front() {
            if self.finals.contains(&position) {
                return false;
            }
            for ((from, _), targets) in self.transitions.range((position, Symbol::Epsilon)..) {
                if *from != position {
                    break;
                }
                for &target in targets {
                    if seen.insert(target) {
                        queue.push_back(target);
                    }
                }
            }
        }
        true
    }

    /// Returns the start state positions.
    pub fn starts(&self) -> &BTreeSet<usize> {
        &self.starts
    }

    /// Returns the final state positions.
    pub fn finals(&self) -> &BTreeSet<usize> {
        &self.finals
    }

    /// Returns the successor set of a `(state, symbol)` pair.
    pub fn successors(&self, from: usize, label: &Symbol) -> Option<&BTreeSet<usize>> {
        self.transitions.get(&(from, label.clone()))
    }

    /// Iterates over transitions as `(from, label, to)` position
    /// triples.
    pub fn transitions(&self) -> impl Iterator<Item = (usize, &Symbol, usize)> + '_ {
        self.transitions
            .iter()
            .flat_map(|((from, label), targets)| targets.iter().map(move |&to| (*from, label, to)))
    }

    /// Returns the alphabet actually in use, ε excluded.
    pub fn labels(&self) -> BTreeSet<Symbol> {
        self.transitions
            .keys()
            .map(|(_, label)| label.clone())
            .filter(|label| !label.is_epsilon())
            .collect()
    }

    /// Computes the ε-closure of a set of states.
    pub fn epsilon_closure(&self, states: &BTreeSet<usize>) -> BTreeSet<usize> {
        let mut closure = states.clone();
        let mut queue: VecDeque<usize> = states.iter().copied().collect();
        while let Some(position) = queue.pop_front() {
            if let Some(targets) = self.transitions.get(&(position, Symbol::Epsilon)) {
                for &target in targets {
                    if closure.insert(target) {
                        queue.push_back(target);
                    }
                }
            }
        }
        closure
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::Nfa;
    use cfpq_graph::LabeledGraph;
    use cfpq_symbol::{State, Symbol};

    #[test]
    fn graph_promotion_defaults_to_all_nodes() {
        let graph = LabeledGraph::two_cycles(1, 1, ("a", "b"));
        let nfa = Nfa::from_graph(&graph, None, None);
        assert_eq!(nfa.len(), 3);
        assert_eq!(nfa.starts().len(), 3);
        assert_eq!(nfa.finals().len(), 3);
        assert_eq!(nfa.transitions().count(), 4);
    }

    #[test]
    fn parallel_same_label_edges_collapse() {
        let mut graph = LabeledGraph::new();
        graph.add_edge(0, "a", 1);
        graph.add_edge(0, "a", 1);
        graph.add_edge(0, "b", 1);
        let nfa = Nfa::from_graph(&graph, None, None);
        assert_eq!(nfa.transitions().count(), 2);
    }

    #[test]
    fn unlabeled_edges_are_skipped() {
        let mut graph = LabeledGraph::new();
        graph.add_edge(0, "a", 1);
        graph.add_unlabeled_edge(1, 2);
        let nfa = Nfa::from_graph(&graph, None, None);
        assert_eq!(nfa.len(), 3);
        assert_eq!(nfa.transitions().count(), 1);
    }

    #[test]
    fn empty_graph_promotes_to_empty_automaton() {
        let nfa = Nfa::from_graph(&LabeledGraph::new(), None, None);
        assert!(nfa.is_empty());
    }

    #[test]
    fn emptiness_respects_reachability() {
        let mut nfa = Nfa::new();
        nfa.add_transition(State::Id(0), Symbol::new("a"), State::Id(1));
        nfa.add_transition(State::Id(2), Symbol::new("a"), State::Id(3));
        nfa.add_start(State::Id(0));
        nfa.add_final(State::Id(3));
        assert!(nfa.is_empty());
        nfa.add_final(State::Id(1));
        assert!(!nfa.is_empty());
    }

    #[test]
    fn epsilon_closure_is_transitive() {
        let mut nfa = Nfa::new();
        nfa.add_transition(State::Id(0), Symbol::Epsilon, State::Id(1));
        nfa.add_transition(State::Id(1), Symbol::Epsilon, State::Id(2));
        nfa.add_transition(State::Id(2), Symbol::new("a"), State::Id(3));
        let closure = nfa.epsilon_closure(&BTreeSet::from([0]));
        assert_eq!(closure, BTreeSet::from([0, 1, 2]));
    }
}
