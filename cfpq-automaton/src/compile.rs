//! Regex compilation: Thompson construction, subset construction,
//! minimization.

use std::collections::{BTreeMap, BTreeSet};

use cfpq_regexp::Regex;
use cfpq_symbol::{State, Symbol};

use crate::{Dfa, Nfa};

/// Compiles a regex to its minimal DFA.
pub fn regex_to_min_dfa(regex: &Regex) -> Dfa {
    let nfa = thompson(regex);
    determinize(&nfa).minimize()
}

/// Builds the ε-NFA of a regex by Thompson's construction.
///
/// Every subexpression contributes one entry and one exit state, glued
/// together with ε-transitions.
pub fn thompson(regex: &Regex) -> Nfa {
    let mut builder = Builder {
        nfa: Nfa::new(),
        next_id: 0,
    };
    let (entry, exit) = builder.build(regex);
    builder.nfa.add_start(State::Id(entry));
    builder.nfa.add_final(State::Id(exit));
    builder.nfa
}

struct Builder {
    nfa: Nfa,
    next_id: u32,
}

impl Builder {
    fn fresh(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.nfa.add_state(State::Id(id));
        id
    }

    fn link(&mut self, from: u32, label: Symbol, to: u32) {
        self.nfa.add_transition(State::Id(from), label, State::Id(to));
    }

    fn build(&mut self, regex: &Regex) -> (u32, u32) {
        match regex {
            Regex::Empty => {
                let entry = self.fresh();
                let exit = self.fresh();
                (entry, exit)
            }
            Regex::Epsilon => {
                let entry = self.fresh();
                let exit = self.fresh();
                self.link(entry, Symbol::Epsilon, exit);
                (entry, exit)
            }
            Regex::Symbol(symbol) => {
                let entry = self.fresh();
                let exit = self.fresh();
                self.link(entry, symbol.clone(), exit);
                (entry, exit)
            }
            Regex::Concat(lhs, rhs) => {
                let (lhs_entry, lhs_exit) = self.build(lhs);
                let (rhs_entry, rhs_exit) = self.build(rhs);
                self.link(lhs_exit, Symbol::Epsilon, rhs_entry);
                (lhs_entry, rhs_exit)
            }
            Regex::Alt(lhs, rhs) => {
                let entry = self.fresh();
                let exit = self.fresh();
                let (lhs_entry, lhs_exit) = self.build(lhs);
                let (rhs_entry, rhs_exit) = self.build(rhs);
                self.link(entry, Symbol::Epsilon, lhs_entry);
                self.link(entry, Symbol::Epsilon, rhs_entry);
                self.link(lhs_exit, Symbol::Epsilon, exit);
                self.link(rhs_exit, Symbol::Epsilon, exit);
                (entry, exit)
            }
            Regex::Star(inner) => {
                let entry = self.fresh();
                let exit = self.fresh();
                let (inner_entry, inner_exit) = self.build(inner);
                self.link(entry, Symbol::Epsilon, exit);
                self.link(entry, Symbol::Epsilon, inner_entry);
                self.link(inner_exit, Symbol::Epsilon, exit);
                self.link(inner_exit, Symbol::Epsilon, inner_entry);
                (entry, exit)
            }
        }
    }
}

/// Builds the DFA of an NFA by subset construction.
///
/// ε-transitions are resolved by closure; DFA states are fresh
/// synthetic ids, one per distinct reachable subset.
pub fn determinize(nfa: &Nfa) -> Dfa {
    let mut dfa = Dfa::new();
    let alphabet = nfa.labels();

    let start_subset = nfa.epsilon_closure(nfa.starts());
    let mut subset_ids: BTreeMap<BTreeSet<usize>, u32> = BTreeMap::new();
    subset_ids.insert(start_subset.clone(), 0);
    let mut pending = vec![start_subset.clone()];

    dfa.set_start(State::Id(0));
    if start_subset.iter().any(|state| nfa.finals().contains(state)) {
        dfa.add_final(State::Id(0));
    }

    while let Some(subset) = pending.pop() {
        let subset_id = subset_ids[&subset];
        for label in &alphabet {
            let mut image = BTreeSet::new();
            for &state in &subset {
                if let Some(targets) = nfa.successors(state, label) {
                    image.extend(targets.iter().copied());
                }
            }
            if image.is_empty() {
                continue;
            }
            let image = nfa.epsilon_closure(&image);
            let fresh = subset_ids.len() as u32;
            let image_id = match subset_ids.get(&image) {
                Some(&id) => id,
                None => {
                    subset_ids.insert(image.clone(), fresh);
                    if image.iter().any(|state| nfa.finals().contains(state)) {
                        dfa.add_final(State::Id(fresh));
                    }
                    pending.push(image);
                    fresh
                }
            };
            dfa.add_transition(State::Id(subset_id), label.clone(), State::Id(image_id));
        }
    }
    dfa
}
