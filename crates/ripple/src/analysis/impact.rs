//! Combined upstream/downstream impact summarization.

use super::ImpactAnalyzer;
use crate::config::{AnalysisOptions, RiskThresholds};
use crate::domain::{
    EntityId, ImpactReport, ImpactResult, ImpactSummary, RiskLevel, ScoredDependency,
};
use crate::error::Result;
use std::collections::{HashMap, HashSet};

impl ImpactAnalyzer {
    /// Analyze both directions and summarize blast radius.
    ///
    /// The upstream and downstream sub-queries are independent and run
    /// concurrently. A graph failure on either side degrades that side to
    /// an empty result with `metadata.error` set; the summary is computed
    /// over whatever succeeded, and the call itself does not fail.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::error::Error::Config) if `options`
    /// fail validation. Collaborator failures never surface here.
    pub async fn analyze_impact(
        &self,
        entity_name: &str,
        options: &AnalysisOptions,
    ) -> Result<ImpactReport> {
        let (upstream, downstream) = tokio::join!(
            self.upstream_dependencies(entity_name, options),
            self.downstream_impact(entity_name, options),
        );
        let upstream = upstream?;
        let downstream = downstream?;

        let summary = summarize(&upstream, &downstream, &self.config().thresholds);
        Ok(ImpactReport {
            source_entity: entity_name.to_string(),
            upstream,
            downstream,
            summary,
        })
    }
}

/// Map impacted-entity counts onto the ordered risk scale.
///
/// Monotone in both inputs: more impacted entities or more critical
/// entities can only push the level upward.
pub(crate) fn risk_level(
    total: usize,
    critical: usize,
    thresholds: &RiskThresholds,
) -> RiskLevel {
    if critical >= thresholds.critical_count || total > thresholds.critical_total {
        RiskLevel::Critical
    } else if total >= thresholds.high_total {
        RiskLevel::High
    } else if total >= thresholds.medium_total || critical > 0 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

fn summarize(
    upstream: &ImpactResult,
    downstream: &ImpactResult,
    thresholds: &RiskThresholds,
) -> ImpactSummary {
    let total = upstream.entities.len() + downstream.entities.len();

    // Critical entities are deduplicated across sides; the histogram is
    // deliberately not, so an entity on both sides counts once per side.
    let mut seen: HashSet<&EntityId> = HashSet::new();
    let mut critical_entities: Vec<ScoredDependency> = Vec::new();
    for dependency in upstream.entities.iter().chain(&downstream.entities) {
        if dependency.importance >= thresholds.critical_importance && seen.insert(&dependency.id) {
            critical_entities.push(dependency.clone());
        }
    }
    critical_entities.sort_by(|a, b| {
        b.impact_score
            .total_cmp(&a.impact_score)
            .then_with(|| a.id.cmp(&b.id))
    });

    let mut type_distribution: HashMap<String, usize> = HashMap::new();
    for dependency in upstream.entities.iter().chain(&downstream.entities) {
        *type_distribution
            .entry(dependency.entity_type.clone())
            .or_insert(0) += 1;
    }

    ImpactSummary {
        risk_level: risk_level(total, critical_entities.len(), thresholds),
        critical_count: critical_entities.len(),
        critical_entities,
        type_distribution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 0, RiskLevel::Low)]
    #[case(4, 0, RiskLevel::Low)]
    #[case(5, 0, RiskLevel::Medium)]
    #[case(2, 1, RiskLevel::Medium)]
    #[case(15, 0, RiskLevel::High)]
    #[case(39, 2, RiskLevel::High)]
    #[case(41, 0, RiskLevel::Critical)]
    #[case(1, 3, RiskLevel::Critical)]
    fn risk_scale_boundaries(
        #[case] total: usize,
        #[case] critical: usize,
        #[case] expected: RiskLevel,
    ) {
        assert_eq!(
            risk_level(total, critical, &RiskThresholds::default()),
            expected
        );
    }

    #[test]
    fn risk_is_monotone_in_both_inputs() {
        let thresholds = RiskThresholds::default();
        for total in 0..50 {
            for critical in 0..5 {
                let here = risk_level(total, critical, &thresholds);
                assert!(risk_level(total + 1, critical, &thresholds) >= here);
                assert!(risk_level(total, critical + 1, &thresholds) >= here);
            }
        }
    }
}
