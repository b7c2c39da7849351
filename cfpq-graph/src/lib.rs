//! A labeled multi-digraph and the handful of graph utilities the
//! query engines need.
//!
//! Dataset download and on-disk formats are collaborators; this crate
//! only knows how to hold a graph in memory, report basic facts about
//! it, build the two-cycles test graph, and print dot.

#![deny(unsafe_code)]

mod graph;
mod info;

pub use self::graph::{Edge, LabeledGraph};
pub use self::info::GraphInfo;
