//! The boolean-matrix form of an automaton.

use std::collections::{BTreeMap, BTreeSet};

use log::trace;

use cfpq_matrix::SparseBitMatrix;
use cfpq_symbol::{State, Symbol};

use crate::{Dfa, Nfa, StateIndex};

/// An automaton as one boolean sparse matrix per label.
///
/// Bit `(i, j)` of `by_label[s]` states that there is a transition
/// `i —s→ j`; a missing label is a zero matrix. The union over labels
/// is the transition relation. Start and final states are kept as
/// position sets of the index.
#[derive(Clone, Debug, Default)]
pub struct AutomatonMatrix {
    index: StateIndex,
    starts: BTreeSet<usize>,
    finals: BTreeSet<usize>,
    by_label: BTreeMap<Symbol, SparseBitMatrix>,
}

impl AutomatonMatrix {
    /// Creates an automaton with no states.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds the matrix form of an NFA.
    ///
    /// # Panics
    ///
    /// Panics if the NFA still carries ε-transitions; those exist only
    /// inside regex compilation and must be resolved before this
    /// representation.
    pub fn from_nfa(nfa: &Nfa) -> Self {
        let mut index = StateIndex::new();
        for state in nfa.state_index().iter() {
            index.insert(state.clone());
        }
        let size = index.len();
        let mut by_label: BTreeMap<Symbol, SparseBitMatrix> = BTreeMap::new();
        for (from, label, to) in nfa.transitions() {
            assert!(!label.is_epsilon(), "ε-transition in a stored automaton");
            by_label
                .entry(label.clone())
                .or_insert_with(|| SparseBitMatrix::new(size, size))
                .set(from, to, true);
        }
        AutomatonMatrix {
            index,
            starts: nfa.starts().clone(),
            finals: nfa.finals().clone(),
            by_label,
        }
    }

    /// Builds the matrix form of a DFA.
    pub fn from_dfa(dfa: &Dfa) -> Self {
        Self::from_nfa(&dfa.to_nfa())
    }

    /// Assembles an automaton from pre-built components.
    ///
    /// # Panics
    ///
    /// Panics if some matrix is not square of the index's size, or if
    /// some start or final position is out of range.
    pub fn from_parts(
        index: StateIndex,
        starts: BTreeSet<usize>,
        finals: BTreeSet<usize>,
        by_label: BTreeMap<Symbol, SparseBitMatrix>,
    ) -> Self {
        let size = index.len();
        for (label, matrix) in &by_label {
            assert_eq!(
                matrix.size(),
                (size, size),
                "matrix for {} is not {}×{}",
                label,
                size,
                size
            );
        }
        assert!(starts.iter().all(|&position| position < size));
        assert!(finals.iter().all(|&position| position < size));
        AutomatonMatrix {
            index,
            starts,
            finals,
            by_label,
        }
    }

    /// Returns the number of states.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Checks whether the automaton has no states.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Allows access to the state index through a reference.
    pub fn state_index(&self) -> &StateIndex {
        &self.index
    }

    /// Returns the start state positions.
    pub fn starts(&self) -> &BTreeSet<usize> {
        &self.starts
    }

    /// Returns the final state positions.
    pub fn finals(&self) -> &BTreeSet<usize> {
        &self.finals
    }

    /// Returns the labels with at least one transition.
    pub fn labels(&self) -> impl Iterator<Item = &Symbol> + '_ {
        self.by_label.keys()
    }

    /// Returns the transition matrix of a label, or `None` for the
    /// zero matrix.
    pub fn label_matrix(&self, label: &Symbol) -> Option<&SparseBitMatrix> {
        self.by_label.get(label)
    }

    /// Sets one transition bit, materializing the label's matrix if
    /// needed.
    pub fn insert_transition(&mut self, label: Symbol, from: usize, to: usize) {
        let size = self.index.len();
        self.by_label
            .entry(label)
            .or_insert_with(|| SparseBitMatrix::new(size, size))
            .set(from, to, true);
    }

    /// Computes reachability under the union of all labels.
    ///
    /// Bit `(i, j)` of the result states that some nonempty labeled
    /// path leads from `i` to `j`. The loop squares the accumulator
    /// until its population stops growing, which is bounded by n².
    pub fn transitive_closure(&self) -> SparseBitMatrix {
        let size = self.index.len();
        let mut closure = SparseBitMatrix::new(size, size);
        for matrix in self.by_label.values() {
            closure.or_assign(matrix);
        }
        loop {
            let before = closure.nnz();
            let step = closure.matmul(&closure);
            closure.or_assign(&step);
            trace!("closure grew {} → {}", before, closure.nnz());
            if closure.nnz() == before {
                return closure;
            }
        }
    }

    /// Computes the Kronecker intersection with another automaton.
    ///
    /// For every label present on both sides the result's matrix is
    /// the Kronecker product of the two transition matrices. The
    /// composite index is `(i, j) ↦ i·|other| + j` with `Pair`
    /// states; starts and finals are the set products. The result
    /// recognizes the intersection of the two languages.
    pub fn intersect(&self, other: &AutomatonMatrix) -> AutomatonMatrix {
        let mut by_label = BTreeMap::new();
        for (label, matrix) in &self.by_label {
            if let Some(other_matrix) = other.by_label.get(label) {
                by_label.insert(label.clone(), matrix.kronecker(other_matrix));
            }
        }

        let mut index = StateIndex::new();
        let mut starts = BTreeSet::new();
        let mut finals = BTreeSet::new();
        for (i, lhs) in self.index.iter().enumerate() {
            for (j, rhs) in other.index.iter().enumerate() {
                let position = index.insert(State::pair(lhs.clone(), rhs.clone()));
                debug_assert_eq!(position, i * other.len() + j);
                if self.starts.contains(&i) && other.starts.contains(&j) {
                    starts.insert(position);
                }
                if self.finals.contains(&i) && other.finals.contains(&j) {
                    finals.insert(position);
                }
            }
        }

        AutomatonMatrix {
            index,
            starts,
            finals,
            by_label,
        }
    }

    /// Reads the automaton back out as an NFA.
    pub fn to_nfa(&self) -> Nfa {
        let mut nfa = Nfa::new();
        for state in self.index.iter() {
            nfa.add_state(state.clone());
        }
        for (label, matrix) in &self.by_label {
            for (from, to) in matrix.iter() {
                nfa.add_transition(
                    self.index.state(from).clone(),
                    label.clone(),
                    self.index.state(to).clone(),
                );
            }
        }
        for &position in &self.starts {
            nfa.add_start(self.index.state(position).clone());
        }
        for &position in &self.finals {
            nfa.add_final(self.index.state(position).clone());
        }
        nfa
    }
}
