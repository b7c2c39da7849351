#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};

use cfpq::{LabeledGraph, Symbol};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn sym(name: &str) -> Symbol {
    Symbol::new(name)
}

pub fn word(names: &[&str]) -> Vec<Symbol> {
    names.iter().map(Symbol::new).collect()
}

pub fn pairs(expected: &[(u64, u64)]) -> BTreeSet<(u64, u64)> {
    expected.iter().copied().collect()
}

pub fn nodes(expected: &[u64]) -> BTreeSet<u64> {
    expected.iter().copied().collect()
}

pub fn per_source(expected: &[(u64, &[u64])]) -> BTreeMap<u64, BTreeSet<u64>> {
    expected
        .iter()
        .map(|&(start, reachable)| (start, nodes(reachable)))
        .collect()
}

/// The diamond-and-tail graph shared by several query tests:
/// two length-2 paths `0 → {1, 2} → 3` under labels `A`/`B` and
/// `C`/`D`, then a tail `3 → 4 → 5` under `E`.
pub fn diamond_graph() -> LabeledGraph {
    let mut graph = LabeledGraph::new();
    graph.add_edge(0, "A", 1);
    graph.add_edge(0, "B", 2);
    graph.add_edge(1, "C", 3);
    graph.add_edge(1, "D", 3);
    graph.add_edge(2, "C", 3);
    graph.add_edge(2, "D", 3);
    graph.add_edge(3, "E", 4);
    graph.add_edge(4, "E", 5);
    graph
}
