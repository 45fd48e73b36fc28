//! Directed graph wrapper used as input to the centrality algorithms.

use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// A directed graph over string node identifiers.
///
/// Thin wrapper around a petgraph [`DiGraph`] that keeps an id -> index
/// map so callers never handle `NodeIndex` values directly. Nodes are
/// created on demand when an edge references an unknown id, which makes
/// building a graph from an edge list a single loop.
///
/// Parallel edges are collapsed: adding the same `(source, target)` pair
/// twice is a no-op. Centrality over unweighted graphs is insensitive to
/// edge multiplicity, so collapsing keeps the algorithms honest.
#[derive(Debug, Default, Clone)]
pub struct CentralityGraph {
    pub(crate) graph: DiGraph<String, ()>,
    pub(crate) node_map: HashMap<String, NodeIndex>,
}

impl CentralityGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, returning its index. Idempotent per id.
    pub fn add_node(&mut self, id: impl Into<String>) -> NodeIndex {
        let id = id.into();
        if let Some(&index) = self.node_map.get(&id) {
            return index;
        }
        let index = self.graph.add_node(id.clone());
        self.node_map.insert(id, index);
        index
    }

    /// Add a directed edge, creating missing endpoint nodes.
    pub fn add_edge(&mut self, source: &str, target: &str) {
        let source = self.add_node(source);
        let target = self.add_node(target);
        if !self.graph.contains_edge(source, target) {
            self.graph.add_edge(source, target, ());
        }
    }

    /// Number of nodes in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of distinct directed edges in the graph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether a node with the given id exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.node_map.contains_key(id)
    }

    /// Iterate over all node ids in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.graph.node_weights().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nodes_are_deduplicated() {
        let mut graph = CentralityGraph::new();
        let a = graph.add_node("a");
        let again = graph.add_node("a");
        assert_eq!(a, again);
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn edges_create_missing_nodes() {
        let mut graph = CentralityGraph::new();
        graph.add_edge("a", "b");
        assert!(graph.contains("a"));
        assert!(graph.contains("b"));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn parallel_edges_collapse() {
        let mut graph = CentralityGraph::new();
        graph.add_edge("a", "b");
        graph.add_edge("a", "b");
        assert_eq!(graph.edge_count(), 1);
    }
}
