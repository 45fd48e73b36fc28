//! Removal simulation with severity bucketing.

use super::impact::risk_level;
use super::ImpactAnalyzer;
use crate::config::AnalysisOptions;
use crate::domain::{RemovalImpact, RemovalSimulation, RiskLevel, SimulationAction};
use crate::error::Result;
use std::collections::HashSet;
use tracing::warn;

/// Cap on critical entity names spelled out in a recommendation.
const MAX_LISTED_CRITICAL: usize = 3;

impl ImpactAnalyzer {
    /// Simulate removing the named entity from the graph.
    ///
    /// Runs a downstream traversal to find everything the removal would
    /// affect, then a direct-edge query to confirm direct classification
    /// independently of path depth (a dependent reachable over several
    /// path lengths is still direct if a one-hop edge exists). Every
    /// impacted entity lands in exactly one depth bucket; the critical
    /// bucket overlaps them.
    ///
    /// If either query fails, the simulation returns empty buckets, a
    /// `Low` risk level, and a recommendation noting the analysis was
    /// incomplete; the call does not fail.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::error::Error::Config) if `options`
    /// fail validation. Collaborator failures never surface here.
    pub async fn simulate_removal(
        &self,
        entity_name: &str,
        options: &AnalysisOptions,
    ) -> Result<RemovalSimulation> {
        let downstream = self.downstream_impact(entity_name, options).await?;
        if let Some(error) = &downstream.metadata.error {
            return Ok(incomplete(entity_name, error));
        }

        let direct_ids: HashSet<_> = match self.store().direct_dependents(entity_name).await {
            Ok(ids) => ids.into_iter().collect(),
            Err(error) => {
                warn!(
                    entity = %entity_name,
                    %error,
                    "direct-edge query failed, removal analysis incomplete"
                );
                return Ok(incomplete(entity_name, &error.to_string()));
            }
        };

        let cutoff = self.config().thresholds.critical_importance;
        let mut impact = RemovalImpact::default();
        for dependency in downstream.entities {
            if dependency.importance >= cutoff {
                impact.critically_affected.push(dependency.clone());
            }
            if dependency.depth == 1 || direct_ids.contains(&dependency.id) {
                impact.directly_affected.push(dependency);
            } else {
                impact.indirectly_affected.push(dependency);
            }
        }

        let risk = risk_level(
            impact.total_affected(),
            impact.critically_affected.len(),
            &self.config().thresholds,
        );
        let recommendation = recommend(entity_name, risk, &impact);
        Ok(RemovalSimulation {
            simulated_entity: entity_name.to_string(),
            action: SimulationAction::Removal,
            impact,
            risk_level: risk,
            recommendation,
        })
    }
}

fn recommend(entity_name: &str, risk: RiskLevel, impact: &RemovalImpact) -> String {
    let total = impact.total_affected();
    match risk {
        RiskLevel::Low => format!(
            "{entity_name} has {total} downstream dependents; removal is safe with \
             standard review."
        ),
        RiskLevel::Medium => format!(
            "{entity_name} has {total} downstream dependents, {} of them direct. \
             Review the direct dependents before removal.",
            impact.directly_affected.len()
        ),
        RiskLevel::High => format!(
            "{entity_name} has {total} downstream dependents. Plan a staged removal \
             and verify each direct dependent has a replacement."
        ),
        RiskLevel::Critical => format!(
            "Do not remove {entity_name} without a migration plan: {} critical \
             entities are affected ({}).",
            impact.critically_affected.len(),
            listed_critical(impact)
        ),
    }
}

fn listed_critical(impact: &RemovalImpact) -> String {
    let names: Vec<&str> = impact
        .critically_affected
        .iter()
        .take(MAX_LISTED_CRITICAL)
        .map(|dependency| dependency.name.as_str())
        .collect();
    let overflow = impact
        .critically_affected
        .len()
        .saturating_sub(MAX_LISTED_CRITICAL);
    if overflow > 0 {
        format!("{}, and {overflow} more", names.join(", "))
    } else {
        names.join(", ")
    }
}

/// Structurally valid simulation for a failed query pair.
fn incomplete(entity_name: &str, reason: &str) -> RemovalSimulation {
    RemovalSimulation {
        simulated_entity: entity_name.to_string(),
        action: SimulationAction::Removal,
        impact: RemovalImpact::default(),
        risk_level: RiskLevel::Low,
        recommendation: format!(
            "Removal analysis for {entity_name} was incomplete ({reason}); re-run the \
             simulation before acting on it."
        ),
    }
}
