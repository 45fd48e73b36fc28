//! Bounded traversal request construction.

use crate::config::AnalysisOptions;
use crate::domain::{Direction, RelationType};
use crate::error::Result;

/// A bounded-depth, edge-type-filtered traversal request.
///
/// Equivalent to: start at the vertex whose `name` matches
/// `source_name`, repeatedly follow edges whose relation type is in
/// `relation_types`, up to `max_depth` hops, returning at most
/// `max_entities` discovered entities, each with its full ordered vertex
/// path back to the source.
///
/// Both bounds are hard limits. Traversal runs against potentially cyclic
/// graphs and must terminate; a store that cannot enforce the bounds must
/// reject the query rather than ignore them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalQuery {
    /// Name of the entity to start from.
    pub source_name: String,

    /// Traversal direction the request was built for.
    pub direction: Direction,

    /// Maximum number of hops from the source.
    pub max_depth: usize,

    /// Maximum number of entities to discover.
    pub max_entities: usize,

    /// Relation types the traversal may follow. Bidirectional members are
    /// followed regardless of edge orientation; all others only along it.
    pub relation_types: Vec<RelationType>,
}

impl TraversalQuery {
    /// Build a traversal request for the given entity and direction.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::error::Error::Config) if `options`
    /// fail validation; an unvalidated bound could turn a cyclic graph
    /// into a non-terminating traversal.
    pub fn build(
        source_name: impl Into<String>,
        direction: Direction,
        options: &AnalysisOptions,
    ) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            source_name: source_name.into(),
            direction,
            max_depth: options.max_depth,
            max_entities: options.max_entities,
            relation_types: direction.traversable_relations(),
        })
    }

    /// Whether the traversal may follow an edge of the given type.
    #[must_use]
    pub fn permits(&self, relation: RelationType) -> bool {
        self.relation_types.contains(&relation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_query_permits_upstream_and_bidirectional_edges() {
        let query = TraversalQuery::build(
            "Billing",
            Direction::Upstream,
            &AnalysisOptions::default(),
        )
        .unwrap();

        assert!(query.permits(RelationType::DependsOn));
        assert!(query.permits(RelationType::Requires));
        assert!(query.permits(RelationType::Uses));
        assert!(query.permits(RelationType::RelatedTo));
        assert!(!query.permits(RelationType::Produces));
        assert!(!query.permits(RelationType::Contains));
    }

    #[test]
    fn downstream_query_permits_downstream_and_bidirectional_edges() {
        let query = TraversalQuery::build(
            "Billing",
            Direction::Downstream,
            &AnalysisOptions::default(),
        )
        .unwrap();

        assert!(query.permits(RelationType::Produces));
        assert!(query.permits(RelationType::Contains));
        assert!(query.permits(RelationType::RelatedTo));
        assert!(!query.permits(RelationType::DependsOn));
    }

    #[test]
    fn bounds_come_from_options() {
        let options = AnalysisOptions {
            max_depth: 2,
            max_entities: 7,
            ..AnalysisOptions::default()
        };
        let query = TraversalQuery::build("Billing", Direction::Upstream, &options).unwrap();
        assert_eq!(query.max_depth, 2);
        assert_eq!(query.max_entities, 7);
    }

    #[test]
    fn invalid_options_are_rejected() {
        let options = AnalysisOptions {
            max_depth: 0,
            ..AnalysisOptions::default()
        };
        assert!(TraversalQuery::build("Billing", Direction::Upstream, &options).is_err());
    }
}
