//! In-memory graph backend using HashMap and petgraph.
//!
//! This module provides a fast, **ephemeral** [`GraphStore`] where the
//! whole graph is held in RAM and lost when the process exits. It is
//! suitable for:
//!
//! - Testing and development
//! - Embedders that load a graph snapshot from elsewhere and only need
//!   analysis, not storage
//!
//! # Architecture
//!
//! - `HashMap<EntityId, Entity>` for O(1) entity lookups
//! - `HashMap<String, EntityId>` name index for traversal entry points
//! - `petgraph::DiGraph` for the typed relation graph
//! - `HashMap<EntityId, NodeIndex>` mapping entities to graph nodes
//!
//! ## Edge Direction Convention
//!
//! Edges are stored exactly as declared: `add_relation(source, target,
//! relation)` creates `source -> target` with the relation type as the
//! edge weight. Traversal legality is decided per query:
//!
//! - Directional relation types (`DEPENDS_ON`, `REQUIRES`, `USES`,
//!   `PRODUCES`, `CONTAINS`) are followed along their orientation only,
//!   and only when the query's direction set permits them.
//! - `RELATED_TO` is followed in both orientations for either direction.
//!
//! ## Name Collisions
//!
//! The name index is last-write-wins: upserting a second entity with an
//! existing name re-points the index at the newer entity. Traversals
//! anchor on whatever the index currently resolves.
//!
//! # Thread Safety
//!
//! The store wraps its state in `Arc<Mutex<_>>`. Cloning an
//! [`InMemoryGraph`] yields another handle to the same graph, which is how
//! a test or embedder keeps a mutation handle while the analysis engine
//! holds the store as `Arc<dyn GraphStore>`.

mod inner;
mod trait_impl;
mod traversal;

use crate::domain::{Entity, EntityId, RelationType};
use crate::error::Result;
use inner::InMemoryGraphInner;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Thread-safe in-memory knowledge graph.
///
/// Implements [`GraphStore`](crate::graph::GraphStore) for the read side
/// and exposes an inherent mutation API for building the graph.
#[derive(Clone, Default)]
pub struct InMemoryGraph {
    inner: Arc<Mutex<InMemoryGraphInner>>,
}

impl InMemoryGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entity.
    ///
    /// Replacing keeps the entity's existing edges; only the record (and
    /// the name index, if the name changed) is updated.
    pub async fn upsert_entity(&self, entity: Entity) {
        let mut inner = self.inner.lock().await;
        inner.upsert_entity(entity);
    }

    /// Add a typed relation between two existing entities.
    ///
    /// Adding an identical relation twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EntityNotFound`](crate::error::Error::EntityNotFound)
    /// if either endpoint is unknown.
    pub async fn add_relation(
        &self,
        source: &EntityId,
        target: &EntityId,
        relation: RelationType,
    ) -> Result<()> {
        let mut inner = self.inner.lock().await;
        inner.add_relation(source, target, relation)
    }

    /// Number of entities in the graph.
    pub async fn entity_count(&self) -> usize {
        self.inner.lock().await.entities.len()
    }

    /// Number of relations in the graph.
    pub async fn relation_count(&self) -> usize {
        self.inner.lock().await.graph.edge_count()
    }

    /// Look up an entity by name.
    pub async fn entity_by_name(&self, name: &str) -> Option<Entity> {
        let inner = self.inner.lock().await;
        inner.entity_by_name(name).cloned()
    }
}

impl std::fmt::Debug for InMemoryGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryGraph").finish_non_exhaustive()
    }
}
