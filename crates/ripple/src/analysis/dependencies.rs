//! Single-direction dependency analysis.
//!
//! Converts the raw path set returned by the graph store into a
//! deduplicated, scored, ranked entity list. Multiple paths may reach the
//! same entity at different distances; the shortest observed distance
//! wins, since the impact score decays with distance.

use super::score::impact_score;
use super::ImpactAnalyzer;
use crate::config::{AnalysisOptions, DEFAULT_IMPORTANCE};
use crate::domain::{
    Direction, Entity, EntityId, ImpactMetadata, ImpactResult, ScoredDependency, TraversalPath,
};
use crate::error::Result;
use crate::graph::TraversalQuery;
use chrono::Utc;
use std::collections::HashMap;
use tracing::warn;

impl ImpactAnalyzer {
    /// Entities the named entity depends on, scored and ranked.
    ///
    /// An entity with no upstream dependencies yields an empty list with
    /// `total_dependencies` 0; that is a normal result, not a failure. A
    /// graph-store failure degrades to an empty result carrying the
    /// diagnostic in `metadata.error`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::error::Error::Config) if `options`
    /// fail validation. Collaborator failures never surface here.
    pub async fn upstream_dependencies(
        &self,
        entity_name: &str,
        options: &AnalysisOptions,
    ) -> Result<ImpactResult> {
        self.traverse(entity_name, Direction::Upstream, options)
            .await
    }

    /// Entities that depend on the named entity, scored and ranked.
    ///
    /// Same contract as [`ImpactAnalyzer::upstream_dependencies`], in the
    /// opposite direction.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::error::Error::Config) if `options`
    /// fail validation. Collaborator failures never surface here.
    pub async fn downstream_impact(
        &self,
        entity_name: &str,
        options: &AnalysisOptions,
    ) -> Result<ImpactResult> {
        self.traverse(entity_name, Direction::Downstream, options)
            .await
    }

    async fn traverse(
        &self,
        entity_name: &str,
        direction: Direction,
        options: &AnalysisOptions,
    ) -> Result<ImpactResult> {
        let query = TraversalQuery::build(entity_name, direction, options)?;
        match self.store().submit_traversal(&query).await {
            Ok(paths) => Ok(build_result(entity_name, direction, &paths, options)),
            Err(error) => {
                warn!(
                    entity = %entity_name,
                    %direction,
                    %error,
                    "traversal failed, degrading to empty result"
                );
                Ok(degraded_result(entity_name, direction, &error.to_string()))
            }
        }
    }
}

fn build_result(
    entity_name: &str,
    direction: Direction,
    paths: &[TraversalPath],
    options: &AnalysisOptions,
) -> ImpactResult {
    let mut entities = fold_paths(paths, options);
    entities.sort_by(|a, b| {
        b.impact_score
            .total_cmp(&a.impact_score)
            .then_with(|| a.depth.cmp(&b.depth))
            .then_with(|| a.name.cmp(&b.name))
    });
    entities.truncate(options.max_entities);

    let max_depth = entities.iter().map(|e| e.depth).max().unwrap_or(0);
    ImpactResult {
        source_entity: entity_name.to_string(),
        direction,
        description: describe(entity_name, direction, entities.len()),
        metadata: ImpactMetadata {
            total_dependencies: entities.len(),
            max_depth,
            analyzed_at: Utc::now(),
            error: None,
        },
        entities,
    }
}

/// Deduplicate path vertices by entity ID, keeping the minimum depth.
///
/// Position 0 of every path is the source and is skipped, as is any later
/// reappearance of the source on a cycle back into it.
fn fold_paths(paths: &[TraversalPath], options: &AnalysisOptions) -> Vec<ScoredDependency> {
    let mut closest: HashMap<EntityId, (usize, &Entity)> = HashMap::new();

    for path in paths {
        let Some(source) = path.vertices.first() else {
            continue;
        };
        for (depth, vertex) in path.vertices.iter().enumerate().skip(1) {
            if vertex.id == source.id {
                continue;
            }
            closest
                .entry(vertex.id.clone())
                .and_modify(|(best, entity)| {
                    if depth < *best {
                        *best = depth;
                        *entity = vertex;
                    }
                })
                .or_insert((depth, vertex));
        }
    }

    closest
        .into_iter()
        .map(|(id, (depth, entity))| {
            let importance = if options.include_importance {
                entity.effective_importance()
            } else {
                DEFAULT_IMPORTANCE
            };
            ScoredDependency {
                id,
                name: entity.name.clone(),
                entity_type: entity.entity_type.clone(),
                importance,
                depth,
                impact_score: impact_score(depth, importance, options.decay_factor),
            }
        })
        .collect()
}

fn describe(entity_name: &str, direction: Direction, count: usize) -> String {
    match direction {
        Direction::Upstream => {
            format!("{entity_name} depends on {count} upstream entities")
        }
        Direction::Downstream => {
            format!("{count} downstream entities depend on {entity_name}")
        }
    }
}

/// Structurally valid empty result for a failed traversal.
fn degraded_result(entity_name: &str, direction: Direction, error: &str) -> ImpactResult {
    ImpactResult {
        source_entity: entity_name.to_string(),
        direction,
        entities: Vec::new(),
        description: describe(entity_name, direction, 0),
        metadata: ImpactMetadata {
            total_dependencies: 0,
            max_depth: 0,
            analyzed_at: Utc::now(),
            error: Some(error.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Entity;

    fn path(entities: &[(&str, &str)]) -> TraversalPath {
        TraversalPath {
            vertices: entities
                .iter()
                .map(|(id, name)| Entity::new(*id, *name, "System"))
                .collect(),
        }
    }

    #[test]
    fn shortest_observed_depth_wins() {
        let paths = vec![
            path(&[("src", "Source"), ("a", "A"), ("b", "B")]),
            path(&[("src", "Source"), ("b", "B")]),
        ];
        let deps = fold_paths(&paths, &AnalysisOptions::default());
        let b = deps.iter().find(|d| d.id.as_str() == "b").unwrap();
        assert_eq!(b.depth, 1);
    }

    #[test]
    fn source_reappearing_on_a_cycle_is_skipped() {
        let paths = vec![path(&[("src", "Source"), ("a", "A"), ("src", "Source")])];
        let deps = fold_paths(&paths, &AnalysisOptions::default());
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].id.as_str(), "a");
    }

    #[test]
    fn excluding_importance_scores_by_depth_alone() {
        let paths = vec![TraversalPath {
            vertices: vec![
                Entity::new("src", "Source", "System"),
                Entity::new("a", "A", "System").with_importance(0.95),
            ],
        }];

        let options = AnalysisOptions {
            include_importance: false,
            ..AnalysisOptions::default()
        };
        let deps = fold_paths(&paths, &options);
        assert!((deps[0].importance - DEFAULT_IMPORTANCE).abs() < f64::EPSILON);
        assert!((deps[0].impact_score - DEFAULT_IMPORTANCE).abs() < f64::EPSILON);
    }
}
