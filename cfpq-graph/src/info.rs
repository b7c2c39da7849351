//! Basic facts about a graph.

use std::collections::BTreeSet;

use cfpq_symbol::Symbol;

use crate::LabeledGraph;

/// Node count, edge count and the set of labels in use.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GraphInfo {
    /// Number of nodes.
    pub number_of_nodes: usize,
    /// Number of edges, parallel edges included.
    pub number_of_edges: usize,
    /// Labels occurring on at least one edge.
    pub edge_labels: BTreeSet<Symbol>,
}

impl GraphInfo {
    /// Extracts the info from a graph. Unlabeled edges count toward
    /// the edge total but contribute no label.
    pub fn of(graph: &LabeledGraph) -> Self {
        GraphInfo {
            number_of_nodes: graph.number_of_nodes(),
            number_of_edges: graph.number_of_edges(),
            edge_labels: graph
                .labeled_edges()
                .map(|(_, label, _)| label.clone())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::GraphInfo;
    use crate::LabeledGraph;
    use cfpq_symbol::Symbol;

    #[test]
    fn info_of_two_cycles() {
        let graph = LabeledGraph::two_cycles(1, 1, ("a", "b"));
        let info = GraphInfo::of(&graph);
        assert_eq!(info.number_of_nodes, 3);
        assert_eq!(info.number_of_edges, 4);
        assert_eq!(
            info.edge_labels,
            [Symbol::new("a"), Symbol::new("b")].into_iter().collect()
        );
    }
}
