//! Path querying over labeled graphs, constrained by regular or
//! context-free languages.
//!
//! This facade re-exports the member crates: sparse boolean matrices,
//! automata and their matrix form, grammars with their normal forms
//! and recursive state machines, and the query engines.

pub use cfpq_automaton as automaton;
pub use cfpq_graph as graph;
pub use cfpq_grammar as grammar;
pub use cfpq_matrix as matrix;
pub use cfpq_query as query;
pub use cfpq_regexp as regexp;

pub use cfpq_automaton::{determinize, regex_to_min_dfa, AutomatonMatrix, Dfa, Nfa, StateIndex};
pub use cfpq_graph::{GraphInfo, LabeledGraph};
pub use cfpq_grammar::{cyk, Cfg, CfgError, Ecfg, Production, Rsm, Term};
pub use cfpq_matrix::SparseBitMatrix;
pub use cfpq_query::{
    hellings, matrix_cfpq, rpq, rpq_bfs, run_cfpq, tensor_cfpq, CfpqAlgo, QueryError, Reachable,
};
pub use cfpq_regexp::Regex;
pub use cfpq_symbol::{State, Symbol};
