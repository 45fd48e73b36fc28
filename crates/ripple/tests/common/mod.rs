//! Common test fixtures and graph-store doubles shared across
//! integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use ripple::domain::{Entity, EntityId, GraphSnapshot, RelationType, TraversalPath};
use ripple::error::{Error, Result};
use ripple::graph::{GraphStore, InMemoryGraph, TraversalQuery};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Shorthand entity constructor.
pub fn entity(id: &str, name: &str, entity_type: &str) -> Entity {
    Entity::new(id, name, entity_type)
}

/// A small commerce knowledge graph used by most scenarios.
///
/// ```text
/// upstream of checkout:          downstream of checkout:
///   checkout -DEPENDS_ON-> payments    checkout -PRODUCES-> order-report
///   checkout -REQUIRES->   auth        checkout -CONTAINS-> cart-widget
///   payments -USES->       ledger      order-report -PRODUCES-> analytics-dashboard
///   auth     -USES->       ledger
///
/// docs-portal -RELATED_TO-> checkout   (bidirectional, reverse orientation)
/// ```
pub async fn commerce_graph() -> InMemoryGraph {
    let graph = InMemoryGraph::new();

    let nodes = [
        entity("checkout", "Checkout", "Process")
            .with_importance(0.8)
            .with_mention_count(12),
        entity("payments", "Payments", "System")
            .with_importance(0.95)
            .with_mention_count(30),
        entity("auth", "Auth", "System")
            .with_importance(0.7)
            .with_mention_count(22),
        entity("ledger", "Ledger", "System")
            .with_importance(0.92)
            .with_mention_count(18),
        entity("order-report", "Order Report", "Document")
            .with_importance(0.3)
            .with_mention_count(4),
        entity("cart-widget", "Cart Widget", "System").with_importance(0.4),
        entity("analytics-dashboard", "Analytics Dashboard", "Document")
            .with_importance(0.6)
            .with_mention_count(9),
        entity("docs-portal", "Docs Portal", "Document").with_importance(0.2),
    ];
    for node in nodes {
        graph.upsert_entity(node).await;
    }

    let edges = [
        ("checkout", "payments", RelationType::DependsOn),
        ("checkout", "auth", RelationType::Requires),
        ("payments", "ledger", RelationType::Uses),
        ("auth", "ledger", RelationType::Uses),
        ("checkout", "order-report", RelationType::Produces),
        ("checkout", "cart-widget", RelationType::Contains),
        ("order-report", "analytics-dashboard", RelationType::Produces),
        ("docs-portal", "checkout", RelationType::RelatedTo),
    ];
    for (source, target, relation) in edges {
        graph
            .add_relation(&EntityId::new(source), &EntityId::new(target), relation)
            .await
            .unwrap();
    }

    graph
}

/// Graph store that counts traversal executions.
///
/// Used to verify cache behavior: a cache hit must not reach the store.
pub struct CountingStore {
    inner: InMemoryGraph,
    traversals: AtomicUsize,
}

impl CountingStore {
    pub fn new(inner: InMemoryGraph) -> Self {
        Self {
            inner,
            traversals: AtomicUsize::new(0),
        }
    }

    pub fn traversals(&self) -> usize {
        self.traversals.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GraphStore for CountingStore {
    async fn submit_traversal(&self, query: &TraversalQuery) -> Result<Vec<TraversalPath>> {
        self.traversals.fetch_add(1, Ordering::SeqCst);
        self.inner.submit_traversal(query).await
    }

    async fn snapshot(&self) -> Result<GraphSnapshot> {
        self.inner.snapshot().await
    }

    async fn direct_dependents(&self, source_name: &str) -> Result<Vec<EntityId>> {
        self.inner.direct_dependents(source_name).await
    }
}

/// Graph store whose every query fails, for degradation scenarios.
#[derive(Default)]
pub struct FailingStore {
    traversals: AtomicUsize,
}

impl FailingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn traversals(&self) -> usize {
        self.traversals.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GraphStore for FailingStore {
    async fn submit_traversal(&self, _query: &TraversalQuery) -> Result<Vec<TraversalPath>> {
        self.traversals.fetch_add(1, Ordering::SeqCst);
        Err(Error::Graph("simulated graph outage".to_string()))
    }

    async fn snapshot(&self) -> Result<GraphSnapshot> {
        Err(Error::Graph("simulated graph outage".to_string()))
    }

    async fn direct_dependents(&self, _source_name: &str) -> Result<Vec<EntityId>> {
        Err(Error::Graph("simulated graph outage".to_string()))
    }
}
