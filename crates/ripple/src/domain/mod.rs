//! Domain types for knowledge-graph impact analysis.
//!
//! This module contains the data model shared by the graph layer and the
//! analysis engine: entities and typed relations, traversal paths as
//! returned by a graph store, and the result shapes produced by the
//! analysis operations.
//!
//! All wire-shaped types serialize with camelCase field names; relation
//! tags use their SCREAMING_SNAKE graph labels (`DEPENDS_ON`, …).

use crate::config;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Unique identifier for an entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub String);

impl EntityId {
    /// Create a new entity ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// View the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A node in the knowledge graph.
///
/// Entities are supplied by the graph collaborator; this crate only reads
/// them and derives scores. Identity is by [`EntityId`]; `name` is the
/// lookup key used as a traversal entry point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,

    /// Human-readable name, used to anchor traversals.
    pub name: String,

    /// Entity kind from the ontology (e.g. "Process", "System", "Role").
    #[serde(rename = "type")]
    pub entity_type: String,

    /// Intrinsic importance in `[0, 1]`, when known.
    pub importance: Option<f64>,

    /// How often the entity is mentioned in source material.
    pub mention_count: Option<u64>,
}

impl Entity {
    /// Create an entity with no importance or mention data.
    pub fn new(
        id: impl Into<EntityId>,
        name: impl Into<String>,
        entity_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            entity_type: entity_type.into(),
            importance: None,
            mention_count: None,
        }
    }

    /// Set the intrinsic importance.
    #[must_use]
    pub fn with_importance(mut self, importance: f64) -> Self {
        self.importance = Some(importance);
        self
    }

    /// Set the mention count.
    #[must_use]
    pub fn with_mention_count(mut self, count: u64) -> Self {
        self.mention_count = Some(count);
        self
    }

    /// Importance with the documented default applied.
    #[must_use]
    pub fn effective_importance(&self) -> f64 {
        self.importance.unwrap_or(config::DEFAULT_IMPORTANCE)
    }

    /// Mention count with the documented default applied.
    #[must_use]
    pub fn effective_mention_count(&self) -> u64 {
        self.mention_count.unwrap_or(config::DEFAULT_MENTION_COUNT)
    }
}

/// Type of relation between two entities.
///
/// The taxonomy is fixed configuration, partitioned into three sets that
/// decide which edges a traversal may follow:
///
/// | Set | Members |
/// |-----|---------|
/// | upstream | `DEPENDS_ON`, `REQUIRES`, `USES` |
/// | downstream | `PRODUCES`, `CONTAINS` |
/// | bidirectional | `RELATED_TO` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationType {
    /// The source entity depends on the target.
    DependsOn,

    /// The source entity requires the target to function.
    Requires,

    /// The source entity uses the target.
    Uses,

    /// The source entity produces the target.
    Produces,

    /// The source entity contains the target.
    Contains,

    /// Informational link with no inherent direction.
    RelatedTo,
}

impl RelationType {
    /// Relations followed by upstream traversals.
    pub const UPSTREAM: [RelationType; 3] = [
        RelationType::DependsOn,
        RelationType::Requires,
        RelationType::Uses,
    ];

    /// Relations followed by downstream traversals.
    pub const DOWNSTREAM: [RelationType; 2] = [RelationType::Produces, RelationType::Contains];

    /// Relations legal in either traversal direction.
    pub const BIDIRECTIONAL: [RelationType; 1] = [RelationType::RelatedTo];

    /// Whether this relation belongs to the upstream set.
    #[must_use]
    pub fn is_upstream(self) -> bool {
        Self::UPSTREAM.contains(&self)
    }

    /// Whether this relation belongs to the downstream set.
    #[must_use]
    pub fn is_downstream(self) -> bool {
        Self::DOWNSTREAM.contains(&self)
    }

    /// Whether this relation may be followed against its edge orientation.
    #[must_use]
    pub fn is_bidirectional(self) -> bool {
        Self::BIDIRECTIONAL.contains(&self)
    }

    /// Graph label for this relation (`DEPENDS_ON`, …).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RelationType::DependsOn => "DEPENDS_ON",
            RelationType::Requires => "REQUIRES",
            RelationType::Uses => "USES",
            RelationType::Produces => "PRODUCES",
            RelationType::Contains => "CONTAINS",
            RelationType::RelatedTo => "RELATED_TO",
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Direction of a dependency traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Toward entities the source depends on.
    Upstream,

    /// Toward entities that depend on the source.
    Downstream,
}

impl Direction {
    /// Relation types a traversal in this direction may follow.
    ///
    /// The direction's own taxonomy set plus the bidirectional set;
    /// bidirectional relations are additionally followed against their
    /// edge orientation.
    #[must_use]
    pub fn traversable_relations(self) -> Vec<RelationType> {
        let own: &[RelationType] = match self {
            Direction::Upstream => &RelationType::UPSTREAM,
            Direction::Downstream => &RelationType::DOWNSTREAM,
        };
        own.iter()
            .chain(RelationType::BIDIRECTIONAL.iter())
            .copied()
            .collect()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Upstream => write!(f, "upstream"),
            Direction::Downstream => write!(f, "downstream"),
        }
    }
}

/// A typed, directed edge between two entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    /// Source entity ID.
    pub source: EntityId,

    /// Target entity ID.
    pub target: EntityId,

    /// Relation type carried by the edge.
    pub relation: RelationType,
}

/// Full node/edge snapshot of the graph, as returned by the collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphSnapshot {
    /// All entities in the graph.
    pub nodes: Vec<Entity>,

    /// All edges in the graph.
    pub edges: Vec<Edge>,
}

/// One traversal path returned by the graph store.
///
/// Position 0 is always the source entity; position `k` is an entity at
/// graph distance `k` from the source along the traversal direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraversalPath {
    /// Ordered vertex sequence from source to terminal entity.
    pub vertices: Vec<Entity>,
}

/// One row of an upstream or downstream analysis result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredDependency {
    /// Entity ID.
    pub id: EntityId,

    /// Entity name.
    pub name: String,

    /// Entity kind.
    #[serde(rename = "type")]
    pub entity_type: String,

    /// Importance used for scoring (default applied when absent).
    pub importance: f64,

    /// Minimum graph distance at which the entity was observed.
    pub depth: usize,

    /// Distance-decayed impact score in `[0, 1]`.
    pub impact_score: f64,
}

/// Metadata attached to an [`ImpactResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactMetadata {
    /// Number of entities in the result list.
    pub total_dependencies: usize,

    /// Maximum depth observed across the result list (0 when empty).
    pub max_depth: usize,

    /// When the analysis ran.
    pub analyzed_at: DateTime<Utc>,

    /// Diagnostic set only when the graph query failed and the result
    /// degraded to an empty list.
    pub error: Option<String>,
}

/// Result of a single-direction dependency analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactResult {
    /// Name of the entity the traversal started from.
    pub source_entity: String,

    /// Traversal direction.
    pub direction: Direction,

    /// Scored entities, descending by impact score.
    pub entities: Vec<ScoredDependency>,

    /// Human-readable summary sentence.
    pub description: String,

    /// Result metadata.
    pub metadata: ImpactMetadata,
}

/// Categorical risk level, ordered `Low < Medium < High < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Few impacted entities, none critical.
    Low,

    /// Enough impacted entities to warrant review.
    Medium,

    /// Broad impact; change with care.
    High,

    /// Very broad impact or several critical entities affected.
    Critical,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
            RiskLevel::Critical => write!(f, "critical"),
        }
    }
}

/// Aggregated view over both traversal directions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactSummary {
    /// Overall risk of changing or removing the entity.
    pub risk_level: RiskLevel,

    /// Number of distinct critical entities across both directions.
    pub critical_count: usize,

    /// Critical entities (importance at or above the configured cutoff),
    /// deduplicated across directions, descending by impact score.
    pub critical_entities: Vec<ScoredDependency>,

    /// Entity-type histogram over both directions. An entity appearing on
    /// both sides counts once per side.
    pub type_distribution: HashMap<String, usize>,
}

/// Combined upstream and downstream impact analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactReport {
    /// Name of the analyzed entity.
    pub source_entity: String,

    /// Entities the source depends on.
    pub upstream: ImpactResult,

    /// Entities that depend on the source.
    pub downstream: ImpactResult,

    /// Aggregate summary.
    pub summary: ImpactSummary,
}

/// Action simulated by the removal simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimulationAction {
    /// The entity is removed from the graph.
    Removal,
}

/// Severity buckets for entities impacted by a simulated removal.
///
/// The depth buckets partition the impacted set; the critical bucket
/// overlaps them (an entity can be both directly and critically affected).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovalImpact {
    /// Entities at minimum depth 1, or with a confirmed direct edge.
    pub directly_affected: Vec<ScoredDependency>,

    /// Entities reachable only through other impacted entities.
    pub indirectly_affected: Vec<ScoredDependency>,

    /// Entities at or above the critical importance cutoff, any depth.
    pub critically_affected: Vec<ScoredDependency>,
}

impl RemovalImpact {
    /// Total number of affected entities (depth buckets partition, so
    /// their sizes add; the critical bucket overlaps and is not counted).
    #[must_use]
    pub fn total_affected(&self) -> usize {
        self.directly_affected.len() + self.indirectly_affected.len()
    }
}

/// Outcome of a removal simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovalSimulation {
    /// Name of the entity whose removal was simulated.
    pub simulated_entity: String,

    /// The simulated action.
    pub action: SimulationAction,

    /// Impacted entities bucketed by severity.
    pub impact: RemovalImpact,

    /// Overall removal risk.
    pub risk_level: RiskLevel,

    /// Templated guidance matching the risk level.
    pub recommendation: String,
}

/// Normalized component signals behind a composite importance score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentScores {
    /// Min-max normalized PageRank.
    pub page_rank: f64,

    /// Min-max normalized betweenness centrality.
    pub betweenness: f64,

    /// Min-max normalized mention count.
    pub mention_frequency: f64,
}

/// One entity's composite importance, with rank context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportanceRecord {
    /// Entity ID.
    pub id: EntityId,

    /// Entity name.
    pub name: String,

    /// Entity kind.
    #[serde(rename = "type")]
    pub entity_type: String,

    /// Composite importance in `[0, 1]`.
    pub importance: f64,

    /// 1-based rank; ranks form a permutation of `1..=node_count` with
    /// ties broken by ascending ID.
    pub rank: usize,

    /// `(node_count - rank + 1) / node_count`.
    pub percentile: f64,

    /// Mention count with the default applied.
    pub mention_count: u64,

    /// The normalized component signals.
    pub components: ComponentScores,
}

/// Metadata for an importance ranking run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingMetadata {
    /// Number of nodes ranked.
    pub node_count: usize,

    /// Diagnostic set only when the snapshot read failed and the ranking
    /// degraded to empty outputs.
    pub error: Option<String>,
}

/// Full output of an importance ranking run.
///
/// Recomputed from scratch on every call; never persisted by this crate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportanceRanking {
    /// Composite score per entity ID.
    pub scores: HashMap<EntityId, f64>,

    /// Records sorted by rank.
    pub ranked_entities: Vec<ImportanceRecord>,

    /// Run metadata.
    pub metadata: RankingMetadata,
}

impl ImportanceRanking {
    /// An empty ranking carrying a degradation diagnostic.
    #[must_use]
    pub fn degraded(error: String) -> Self {
        Self {
            metadata: RankingMetadata {
                node_count: 0,
                error: Some(error),
            },
            ..Self::default()
        }
    }

    /// The first `min(n, node_count)` ranked entities.
    #[must_use]
    pub fn top_entities(&self, n: usize) -> &[ImportanceRecord] {
        &self.ranked_entities[..n.min(self.ranked_entities.len())]
    }

    /// The record for an entity, or `None` if it is absent from the
    /// ranked graph. Absence is a lookup miss, not an error.
    #[must_use]
    pub fn entity_importance(&self, id: &EntityId) -> Option<&ImportanceRecord> {
        self.ranked_entities.iter().find(|record| &record.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relation_sets_partition_the_taxonomy() {
        let all = [
            RelationType::DependsOn,
            RelationType::Requires,
            RelationType::Uses,
            RelationType::Produces,
            RelationType::Contains,
            RelationType::RelatedTo,
        ];
        for relation in all {
            let memberships = [
                relation.is_upstream(),
                relation.is_downstream(),
                relation.is_bidirectional(),
            ]
            .iter()
            .filter(|&&m| m)
            .count();
            assert_eq!(memberships, 1, "{relation} must be in exactly one set");
        }
    }

    #[test]
    fn relation_serializes_to_graph_label() {
        let json = serde_json::to_string(&RelationType::DependsOn).unwrap();
        assert_eq!(json, "\"DEPENDS_ON\"");
    }

    #[test]
    fn entity_defaults_apply() {
        let entity = Entity::new("e1", "Billing", "System");
        assert!((entity.effective_importance() - 0.5).abs() < f64::EPSILON);
        assert_eq!(entity.effective_mention_count(), 1);
    }

    #[test]
    fn risk_levels_are_ordered() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
        assert!(RiskLevel::High < RiskLevel::Critical);
    }

    #[test]
    fn top_entities_is_bounded_by_node_count() {
        let ranking = ImportanceRanking::default();
        assert!(ranking.top_entities(10).is_empty());
    }
}
