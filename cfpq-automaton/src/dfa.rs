//! The deterministic automaton type.

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

use cfpq_symbol::{State, Symbol};

use crate::{Nfa, StateIndex};

/// A deterministic finite automaton.
///
/// Transitions are partial: a missing `(state, symbol)` entry is a
/// rejection. There is at most one start state.
#[derive(Clone, Debug, Default)]
pub struct Dfa {
    index: StateIndex,
    start: Option<usize>,
    finals: BTreeSet<usize>,
    transitions: BTreeMap<(usize, Symbol), usize>,
}

impl Dfa {
    /// Creates an automaton with no states.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start state, inserting it.
    pub fn set_start(&mut self, state: State) {
        let position = self.index.insert(state);
        self.start = Some(position);
    }

    /// Marks a state as final, inserting it.
    pub fn add_final(&mut self, state: State) {
        let position = self.index.insert(state);
        self.finals.insert(position);
    }

    /// Adds a transition, inserting its endpoint states. A second
    /// transition from the same state under the same symbol replaces
    /// the first.
    pub fn add_transition(&mut self, from: State, label: Symbol, to: State) {
        debug_assert!(!label.is_epsilon(), "DFA transitions cannot be ε");
        let from = self.index.insert(from);
        let to = self.index.insert(to);
        self.transitions.insert((from, label), to);
    }

    /// Allows access to the state index through a reference.
    pub fn state_index(&self) -> &StateIndex {
        &self.index
    }

    /// Returns the number of states.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Checks whether the automaton has no states.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the start state position, if one was set.
    pub fn start(&self) -> Option<usize> {
        self.start
    }

    /// Returns the final state positions.
    pub fn finals(&self) -> &BTreeSet<usize> {
        &self.finals
    }

    /// Returns the successor of a `(state, symbol)` pair.
    pub fn successor(&self, from: usize, label: &Symbol) -> Option<usize> {
        self.transitions.get(&(from, label.clone())).copied()
    }

    /// Iterates over transitions as `(from, label, to)` position
    /// triples.
    pub fn transitions(&self) -> impl Iterator<Item = (usize, &Symbol, usize)> + '_ {
        self.transitions
            .iter()
            .map(|((from, label), &to)| (*from, label, to))
    }

    /// Returns the alphabet actually in use.
    pub fn labels(&self) -> BTreeSet<Symbol> {
        self.transitions
            .keys()
            .map(|(_, label)| label.clone())
            .collect()
    }

    /// Runs the automaton over a word.
    pub fn accepts(&self, word: &[Symbol]) -> bool {
        let Some(mut current) = self.start else {
            return false;
        };
        for symbol in word {
            match self.successor(current, symbol) {
                Some(next) => current = next,
                None => return false,
            }
        }
        self.finals.contains(&current)
    }

    /// Forgets determinism, yielding the same automaton as an NFA.
    pub fn to_nfa(&self) -> Nfa {
        let mut nfa = Nfa::new();
        for state in self.index.iter() {
            nfa.add_state(state.clone());
        }
        for (from, label, to) in self.transitions() {
            nfa.add_transition(
                self.index.state(from).clone(),
                label.clone(),
                self.index.state(to).clone(),
            );
        }
        if let Some(start) = self.start {
            nfa.add_start(self.index.state(start).clone());
        }
        for &position in &self.finals {
            nfa.add_final(self.index.state(position).clone());
        }
        nfa
    }

    /// Returns the equivalent minimal automaton.
    ///
    /// The result is trim (every state lies on some accepting path)
    /// and merged by Moore partition refinement; its states are fresh
    /// synthetic ids. Minimizing a minimal automaton changes nothing
    /// but those ids.
    pub fn minimize(&self) -> Dfa {
        let live = self.live_states();
        let start = match self.start {
            Some(start) if live.contains(&start) => start,
            // The language is empty. One non-final start state is the
            // canonical automaton for it.
            _ => {
                let mut result = Dfa::new();
                result.set_start(State::Id(0));
                return result;
            }
        };
        let alphabet = self.labels();

        // Class per state, starting from the final/non-final split.
        let mut class: HashMap<usize, usize> = live
            .iter()
            .map(|&state| (state, usize::from(self.finals.contains(&state))))
            .collect();
        loop {
            let mut signatures: HashMap<(usize, Vec<Option<usize>>), usize> = HashMap::new();
            let mut next_class: HashMap<usize, usize> = HashMap::new();
            for &state in &live {
                let row: Vec<Option<usize>> = alphabet
                    .iter()
                    .map(|label| {
                        self.successor(state, label)
                            .filter(|target| live.contains(target))
                            .map(|target| class[&target])
                    })
                    .collect();
                let signature = (class[&state], row);
                let fresh = signatures.len();
                let id = *signatures.entry(signature).or_insert(fresh);
                next_class.insert(state, id);
            }
            let stable = signatures.len() == count_classes(&class);
            class = next_class;
            if stable {
                break;
            }
        }

        let mut result = Dfa::new();
        result.set_start(State::Id(class[&start] as u32));
        for &state in &live {
            let from = State::Id(class[&state] as u32);
            if self.finals.contains(&state) {
                result.add_final(from.clone());
            }
            for label in &alphabet {
                if let Some(target) = self
                    .successor(state, label)
                    .filter(|target| live.contains(target))
                {
                    result.add_transition(
                        from.clone(),
                        label.clone(),
                        State::Id(class[&target] as u32),
                    );
                }
            }
        }
        result
    }

    /// Checks language equality with another automaton.
    pub fn is_equivalent_to(&self, other: &Dfa) -> bool {
        let lhs = self.minimize();
        let rhs = other.minimize();
        if lhs.len() != rhs.len() || lhs.finals.len() != rhs.finals.len() {
            return false;
        }
        // Minimal automata recognize the same language iff they are
        // isomorphic; pair states by a parallel walk from the starts.
        let (Some(lhs_start), Some(rhs_start)) = (lhs.start, rhs.start) else {
            return lhs.start.is_none() && rhs.start.is_none();
        };
        let mut pairing: HashMap<usize, usize> = HashMap::new();
        let mut queue = VecDeque::new();
        pairing.insert(lhs_start, rhs_start);
        queue.push_back((lhs_start, rhs_start));
        while let Some((left, right)) = queue.pop_front() {
            if lhs.finals.contains(&left) != rhs.finals.contains(&right) {
                return false;
            }
            let left_out: BTreeMap<&Symbol, usize> = lhs
                .transitions()
                .filter(|&(from, _, _)| from == left)
                .map(|(_, label, to)| (label, to))
                .collect();
            let right_out: BTreeMap<&Symbol, usize> = rhs
                .transitions()
                .filter(|&(from, _, _)| from == right)
                .map(|(_, label, to)| (label, to))
                .collect();
            if left_out.keys().ne(right_out.keys()) {
                return false;
            }
            for (label, &left_to) in &left_out {
                let right_to = right_out[label];
                match pairing.get(&left_to) {
                    Some(&paired) => {
                        if paired != right_to {
                            return false;
                        }
                    }
                    None => {
                        pairing.insert(left_to, right_to);
                        queue.push_back((left_to, right_to));
                    }
                }
            }
        }
        true
    }

    /// Returns the states that lie on some path from the start to a
    /// final state.
    fn live_states(&self) -> BTreeSet<usize> {
        let Some(start) = self.start else {
            return BTreeSet::new();
        };
        let mut reachable = BTreeSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(state) = queue.pop_front() {
            for (from, _, to) in self.transitions() {
                if from == state && reachable.insert(to) {
                    queue.push_back(to);
                }
            }
        }
        let mut backward: BTreeSet<usize> = self.finals.clone();
        let mut queue: VecDeque<usize> = self.finals.iter().copied().collect();
        while let Some(state) = queue.pop_front() {
            for (from, _, to) in self.transitions() {
                if to == state && backward.insert(from) {
                    queue.push_back(from);
                }
            }
        }
        reachable.intersection(&backward).copied().collect()
    }
}

fn count_classes(class: &HashMap<usize, usize>) -> usize {
    class.values().collect::<BTreeSet<_>>().len()
}

#[cfg(test)]
mod tests {
    use super::Dfa;
    use cfpq_symbol::{State, Symbol};

    fn sym(name: &str) -> Symbol {
        Symbol::new(name)
    }

    fn word(names: &[&str]) -> Vec<Symbol> {
        names.iter().map(Symbol::new).collect()
    }

    /// Accepts words of `a`s of odd length, with a redundant pair of
    /// interchangeable states.
    fn odd_as() -> Dfa {
        let mut dfa = Dfa::new();
        dfa.set_start(State::Id(0));
        dfa.add_transition(State::Id(0), sym("a"), State::Id(1));
        dfa.add_transition(State::Id(1), sym("a"), State::Id(2));
        dfa.add_transition(State::Id(2), sym("a"), State::Id(3));
        dfa.add_transition(State::Id(3), sym("a"), State::Id(0));
        dfa.add_final(State::Id(1));
        dfa.add_final(State::Id(3));
        dfa
    }

    #[test]
    fn accepts_walks_the_table() {
        let dfa = odd_as();
        assert!(dfa.accepts(&word(&["a"])));
        assert!(!dfa.accepts(&word(&["a", "a"])));
        assert!(dfa.accepts(&word(&["a", "a", "a"])));
        assert!(!dfa.accepts(&[]));
        assert!(!dfa.accepts(&word(&["b"])));
    }

    #[test]
    fn minimize_merges_interchangeable_states() {
        let minimal = odd_as().minimize();
        assert_eq!(minimal.len(), 2);
        assert!(minimal.accepts(&word(&["a"])));
        assert!(!minimal.accepts(&word(&["a", "a"])));
    }

    #[test]
    fn minimize_is_idempotent_up_to_equivalence() {
        let once = odd_as().minimize();
        let twice = once.minimize();
        assert_eq!(once.len(), twice.len());
        assert!(once.is_equivalent_to(&twice));
    }

    #[test]
    fn empty_language_minimizes_to_one_state() {
        let mut dfa = Dfa::new();
        dfa.set_start(State::Id(0));
        dfa.add_transition(State::Id(0), sym("a"), State::Id(1));
        // No finals: nothing is live.
        let minimal = dfa.minimize();
        assert_eq!(minimal.len(), 1);
        assert!(!minimal.accepts(&[]));
        assert!(!minimal.accepts(&word(&["a"])));
    }

    #[test]
    fn equivalence_distinguishes_languages() {
        let odd = odd_as();
        let mut even = Dfa::new();
        even.set_start(State::Id(0));
        even.add_transition(State::Id(0), sym("a"), State::Id(1));
        even.add_transition(State::Id(1), sym("a"), State::Id(0));
        even.add_final(State::Id(0));
        assert!(!odd.is_equivalent_to(&even));
        assert!(odd.is_equivalent_to(&odd.minimize()));
    }
}
