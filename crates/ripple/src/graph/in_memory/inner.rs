//! Core in-memory graph data structures.
//!
//! This module contains the inner state that holds all data and is
//! wrapped in `Arc<Mutex<_>>` for thread safety.

use crate::domain::{Entity, EntityId, RelationType};
use crate::error::{Error, Result};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

/// Inner graph state (not thread-safe).
///
/// Invariant: every id in `entities` has a node in `graph` via
/// `node_map`, and every entity name appears in `name_index`.
#[derive(Default)]
pub(crate) struct InMemoryGraphInner {
    /// Entities indexed by ID.
    pub(super) entities: HashMap<EntityId, Entity>,

    /// Name -> ID index used to anchor traversals. Last write wins on
    /// name collisions.
    pub(super) name_index: HashMap<String, EntityId>,

    /// Typed relation graph. Nodes carry `EntityId`, edges carry
    /// `RelationType`; edge direction matches the declared relation.
    pub(super) graph: DiGraph<EntityId, RelationType>,

    /// Mapping from entity ID to graph node.
    pub(super) node_map: HashMap<EntityId, NodeIndex>,
}

impl InMemoryGraphInner {
    pub(super) fn upsert_entity(&mut self, entity: Entity) {
        match self.entities.get(&entity.id) {
            Some(existing) => {
                if existing.name != entity.name {
                    self.name_index.remove(&existing.name);
                }
            }
            None => {
                let node = self.graph.add_node(entity.id.clone());
                self.node_map.insert(entity.id.clone(), node);
            }
        }
        self.name_index
            .insert(entity.name.clone(), entity.id.clone());
        self.entities.insert(entity.id.clone(), entity);
    }

    pub(super) fn add_relation(
        &mut self,
        source: &EntityId,
        target: &EntityId,
        relation: RelationType,
    ) -> Result<()> {
        let Some(&source_node) = self.node_map.get(source) else {
            return Err(Error::EntityNotFound(source.to_string()));
        };
        let Some(&target_node) = self.node_map.get(target) else {
            return Err(Error::EntityNotFound(target.to_string()));
        };

        let duplicate = self
            .graph
            .edges_connecting(source_node, target_node)
            .any(|edge| *edge.weight() == relation);
        if !duplicate {
            self.graph.add_edge(source_node, target_node, relation);
        }
        Ok(())
    }

    pub(super) fn entity_by_name(&self, name: &str) -> Option<&Entity> {
        let id = self.name_index.get(name)?;
        self.entities.get(id)
    }

    /// Node index for a named entity, if it exists.
    pub(super) fn node_by_name(&self, name: &str) -> Option<NodeIndex> {
        let id = self.name_index.get(name)?;
        self.node_map.get(id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(id: &str, name: &str) -> Entity {
        Entity::new(id, name, "System")
    }

    #[test]
    fn upsert_registers_name_and_node() {
        let mut inner = InMemoryGraphInner::default();
        inner.upsert_entity(entity("e1", "Billing"));

        assert!(inner.entity_by_name("Billing").is_some());
        assert!(inner.node_by_name("Billing").is_some());
    }

    #[test]
    fn renaming_an_entity_moves_the_name_index() {
        let mut inner = InMemoryGraphInner::default();
        inner.upsert_entity(entity("e1", "Billing"));
        inner.upsert_entity(entity("e1", "Billing v2"));

        assert!(inner.entity_by_name("Billing").is_none());
        assert!(inner.entity_by_name("Billing v2").is_some());
        assert_eq!(inner.entities.len(), 1);
    }

    #[test]
    fn duplicate_relations_are_ignored() {
        let mut inner = InMemoryGraphInner::default();
        inner.upsert_entity(entity("e1", "Billing"));
        inner.upsert_entity(entity("e2", "Ledger"));

        let billing = EntityId::new("e1");
        let ledger = EntityId::new("e2");
        inner
            .add_relation(&billing, &ledger, RelationType::DependsOn)
            .unwrap();
        inner
            .add_relation(&billing, &ledger, RelationType::DependsOn)
            .unwrap();
        // A different relation between the same endpoints is not a duplicate.
        inner
            .add_relation(&billing, &ledger, RelationType::RelatedTo)
            .unwrap();

        assert_eq!(inner.graph.edge_count(), 2);
    }

    #[test]
    fn relations_to_unknown_entities_are_rejected() {
        let mut inner = InMemoryGraphInner::default();
        inner.upsert_entity(entity("e1", "Billing"));

        let err = inner
            .add_relation(
                &EntityId::new("e1"),
                &EntityId::new("ghost"),
                RelationType::Uses,
            )
            .unwrap_err();
        assert!(matches!(err, Error::EntityNotFound(_)));
    }
}
