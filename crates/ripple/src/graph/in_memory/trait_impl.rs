//! `GraphStore` implementation for the in-memory backend.

use super::traversal::collect_paths;
use super::InMemoryGraph;
use crate::domain::{Direction, Edge, EntityId, GraphSnapshot, TraversalPath};
use crate::error::Result;
use crate::graph::{GraphStore, TraversalQuery};
use async_trait::async_trait;
use petgraph::visit::EdgeRef;
use tracing::debug;

#[async_trait]
impl GraphStore for InMemoryGraph {
    async fn submit_traversal(&self, query: &TraversalQuery) -> Result<Vec<TraversalPath>> {
        let inner = self.inner.lock().await;
        let paths = collect_paths(&inner, query);
        debug!(
            source = %query.source_name,
            direction = %query.direction,
            max_depth = query.max_depth,
            paths = paths.len(),
            "traversal executed"
        );
        Ok(paths)
    }

    async fn snapshot(&self) -> Result<GraphSnapshot> {
        let inner = self.inner.lock().await;
        let nodes = inner.entities.values().cloned().collect();
        let edges = inner
            .graph
            .edge_references()
            .map(|edge| Edge {
                source: inner.graph[edge.source()].clone(),
                target: inner.graph[edge.target()].clone(),
                relation: *edge.weight(),
            })
            .collect();
        Ok(GraphSnapshot { nodes, edges })
    }

    async fn direct_dependents(&self, source_name: &str) -> Result<Vec<EntityId>> {
        // One-hop downstream probe; the unbounded entity cap is safe at
        // depth 1 because discovery is bounded by the node's degree.
        let query = TraversalQuery {
            source_name: source_name.to_string(),
            direction: Direction::Downstream,
            max_depth: 1,
            max_entities: usize::MAX,
            relation_types: Direction::Downstream.traversable_relations(),
        };

        let inner = self.inner.lock().await;
        let dependents = collect_paths(&inner, &query)
            .into_iter()
            .filter_map(|path| path.vertices.last().map(|entity| entity.id.clone()))
            .collect();
        Ok(dependents)
    }
}
