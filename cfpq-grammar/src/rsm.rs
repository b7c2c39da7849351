//! Recursive state machines: one DFA box per variable.

use std::collections::BTreeMap;

use cfpq_automaton::{regex_to_min_dfa, AutomatonMatrix, Dfa, Nfa};
use cfpq_symbol::{State, Symbol};

use crate::Ecfg;

/// A recursive state machine.
///
/// Each variable owns a box: a DFA over variables and terminals.
/// Traversal is recursive: following an edge labeled with a variable
/// means recognizing that variable's box from its start to a final
/// state.
#[derive(Clone, Debug)]
pub struct Rsm {
    start: Symbol,
    boxes: BTreeMap<Symbol, Dfa>,
}

impl Rsm {
    /// Creates a machine from parts.
    pub fn new(start: Symbol, boxes: BTreeMap<Symbol, Dfa>) -> Self {
        Rsm { start, boxes }
    }

    /// Compiles each regex of an extended grammar into that
    /// variable's box.
    pub fn from_ecfg(ecfg: &Ecfg) -> Self {
        Rsm {
            start: ecfg.start_symbol().clone(),
            boxes: ecfg
                .productions()
                .iter()
                .map(|(head, regex)| (head.clone(), regex_to_min_dfa(regex)))
                .collect(),
        }
    }

    /// Returns the start variable.
    pub fn start_symbol(&self) -> &Symbol {
        &self.start
    }

    /// Returns the boxes.
    pub fn boxes(&self) -> &BTreeMap<Symbol, Dfa> {
        &self.boxes
    }

    /// Re-minimizes every box.
    pub fn minimize(&self) -> Rsm {
        Rsm {
            start: self.start.clone(),
            boxes: self
                .boxes
                .iter()
                .map(|(variable, dfa)| (variable.clone(), dfa.minimize()))
                .collect(),
        }
    }

    /// Flattens the machine into one matrix automaton.
    ///
    /// States are box states tagged with their variable. The starts
    /// are every box's start state and the finals every box's final
    /// states, so an engine can recognize a completed box run by a
    /// start-to-final closure bit within one variable's states.
    /// Variable-labeled edges stay as ordinary labeled transitions.
    pub fn to_automaton_matrix(&self) -> AutomatonMatrix {
        let mut nfa = Nfa::new();
        for (variable, dfa) in &self.boxes {
            let tag =
                |position: usize| State::in_box(variable.clone(), dfa.state_index().state(position).clone());
            for position in 0..dfa.len() {
                nfa.add_state(tag(position));
            }
            for (from, label, to) in dfa.transitions() {
                nfa.add_transition(tag(from), label.clone(), tag(to));
            }
            if let Some(start) = dfa.start() {
                nfa.add_start(tag(start));
            }
            for &position in dfa.finals() {
                nfa.add_final(tag(position));
            }
        }
        AutomatonMatrix::from_nfa(&nfa)
    }
}

#[cfg(test)]
mod tests {
    use super::Rsm;
    use crate::Ecfg;
    use cfpq_symbol::Symbol;

    #[test]
    fn boxes_are_compiled_per_variable() {
        let ecfg = Ecfg::from_text("S -> a B\nB -> b*").unwrap();
        let rsm = Rsm::from_ecfg(&ecfg);
        assert_eq!(rsm.boxes().len(), 2);
        let b_box = &rsm.boxes()[&Symbol::new("B")];
        assert!(b_box.accepts(&[]));
        assert!(b_box.accepts(&[Symbol::new("b"), Symbol::new("b")]));
    }

    #[test]
    fn minimize_keeps_every_box_language() {
        let ecfg = Ecfg::from_text("S -> (a) | (b* S)").unwrap();
        let rsm = Rsm::from_ecfg(&ecfg);
        let minimized = rsm.minimize();
        for (variable, dfa) in rsm.boxes() {
            assert!(dfa.is_equivalent_to(&minimized.boxes()[variable]));
        }
    }

    #[test]
    fn matrix_form_tags_states_with_their_box() {
        let ecfg = Ecfg::from_text("S -> a B\nB -> b").unwrap();
        let rsm = Rsm::from_ecfg(&ecfg);
        let matrices = rsm.to_automaton_matrix();
        // Two boxes contribute two starts; `a B` has one final state
        // and `b` another.
        assert_eq!(matrices.starts().len(), 2);
        assert_eq!(matrices.finals().len(), 2);
        assert!(matrices.label_matrix(&Symbol::new("B")).is_some());
    }
}
