//! The query engines and their façade.
//!
//! Two regular-path engines (Kronecker intersection with transitive
//! closure, and synchronized multi-source BFS) and three context-free
//! engines (Hellings, matrix closure, tensor against a recursive
//! state machine), all over the same boolean-matrix automaton
//! representation.

#![deny(unsafe_code)]

mod cfpq;
mod error;
mod rpq;

pub use self::cfpq::{hellings, matrix_cfpq, run_cfpq, tensor_cfpq, CfpqAlgo};
pub use self::error::QueryError;
pub use self::rpq::{rpq, rpq_bfs, Reachable};
