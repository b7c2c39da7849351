//! A boolean sparse matrix over the (∨, ∧) semiring.
//!
//! This is the shared storage of every automaton and every engine in
//! this workspace: per-label transition matrices, BFS fronts, closure
//! accumulators. Only boolean algebra is provided. Duplicate writes
//! collapse.

#![deny(unsafe_code)]

mod sparse;

pub use self::sparse::SparseBitMatrix;
