//! Bounded BFS path enumeration over the in-memory graph.
//!
//! Traversal discovers each reachable entity once, at its minimum depth,
//! and reports the full vertex path from the source so callers can read
//! per-vertex depth from the position index. Both query bounds are
//! enforced here: expansion stops at `max_depth` hops and discovery stops
//! at `max_entities` entities, which guarantees termination on cyclic
//! graphs.

use super::inner::InMemoryGraphInner;
use crate::domain::TraversalPath;
use crate::graph::TraversalQuery;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use petgraph::Direction::{Incoming, Outgoing};
use std::collections::{HashMap, VecDeque};

/// Run the query against the graph, returning one path per discovered
/// entity. An unknown source name yields an empty set.
pub(super) fn collect_paths(
    inner: &InMemoryGraphInner,
    query: &TraversalQuery,
) -> Vec<TraversalPath> {
    let Some(start) = inner.node_by_name(&query.source_name) else {
        return Vec::new();
    };

    let mut parent: HashMap<NodeIndex, NodeIndex> = HashMap::new();
    let mut depth_of: HashMap<NodeIndex, usize> = HashMap::new();
    let mut discovered: Vec<NodeIndex> = Vec::new();
    let mut queue: VecDeque<(NodeIndex, usize)> = VecDeque::new();

    depth_of.insert(start, 0);
    queue.push_back((start, 0));

    'bfs: while let Some((node, depth)) = queue.pop_front() {
        if depth >= query.max_depth {
            continue;
        }
        for neighbor in traversable_neighbors(inner, node, query) {
            if depth_of.contains_key(&neighbor) {
                continue;
            }
            depth_of.insert(neighbor, depth + 1);
            parent.insert(neighbor, node);
            discovered.push(neighbor);
            if discovered.len() >= query.max_entities {
                break 'bfs;
            }
            queue.push_back((neighbor, depth + 1));
        }
    }

    discovered
        .into_iter()
        .filter_map(|node| path_to(inner, start, node, &parent))
        .collect()
}

/// Neighbors reachable over one legal edge.
///
/// Directional relation types are followed along their orientation only;
/// bidirectional types are also followed against it.
fn traversable_neighbors(
    inner: &InMemoryGraphInner,
    node: NodeIndex,
    query: &TraversalQuery,
) -> Vec<NodeIndex> {
    let mut neighbors = Vec::new();
    for edge in inner.graph.edges_directed(node, Outgoing) {
        if query.permits(*edge.weight()) {
            neighbors.push(edge.target());
        }
    }
    for edge in inner.graph.edges_directed(node, Incoming) {
        let relation = *edge.weight();
        if relation.is_bidirectional() && query.permits(relation) {
            neighbors.push(edge.source());
        }
    }
    neighbors
}

/// Reconstruct the source-to-node vertex path from the BFS parent chain.
fn path_to(
    inner: &InMemoryGraphInner,
    start: NodeIndex,
    node: NodeIndex,
    parent: &HashMap<NodeIndex, NodeIndex>,
) -> Option<TraversalPath> {
    let mut chain = vec![node];
    let mut current = node;
    while current != start {
        let &previous = parent.get(&current)?;
        chain.push(previous);
        current = previous;
    }
    chain.reverse();

    let vertices = chain
        .into_iter()
        .map(|n| inner.entities.get(&inner.graph[n]).cloned())
        .collect::<Option<Vec<_>>>()?;
    Some(TraversalPath { vertices })
}
