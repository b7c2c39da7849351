//! Finite automata and their boolean-matrix representation.
//!
//! The pipeline here runs in two directions. Query side: regex text
//! compiles through an ε-NFA and subset construction down to a
//! minimal DFA. Graph side: a labeled multigraph promotes directly to
//! an NFA. Both meet in [`AutomatonMatrix`], the per-label sparse
//! matrix form every engine consumes.

#![deny(unsafe_code)]

mod compile;
mod dfa;
mod index;
mod matrix;
mod nfa;

pub use self::compile::{determinize, regex_to_min_dfa, thompson};
pub use self::dfa::Dfa;
pub use self::index::StateIndex;
pub use self::matrix::AutomatonMatrix;
pub use self::nfa::Nfa;
