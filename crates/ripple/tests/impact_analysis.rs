//! Integration tests for dependency analysis and impact summarization.

mod common;

use common::{commerce_graph, entity, FailingStore};
use ripple::analysis::ImpactAnalyzer;
use ripple::config::AnalysisOptions;
use ripple::domain::{Direction, EntityId, RelationType, RiskLevel};
use ripple::graph::InMemoryGraph;
use std::sync::Arc;

async fn analyzer() -> ImpactAnalyzer {
    ImpactAnalyzer::new(Arc::new(commerce_graph().await))
}

// ========== Single-direction analysis ==========

#[tokio::test]
async fn upstream_dependencies_are_scored_and_ranked() {
    let result = analyzer()
        .await
        .upstream_dependencies("Checkout", &AnalysisOptions::default())
        .await
        .unwrap();

    assert_eq!(result.direction, Direction::Upstream);
    assert_eq!(result.metadata.total_dependencies, 4);
    assert_eq!(result.metadata.max_depth, 2);
    assert!(result.metadata.error.is_none());

    let names: Vec<&str> = result.entities.iter().map(|e| e.name.as_str()).collect();
    // Descending impact: payments 0.95@1, auth 0.7@1, ledger 0.92*0.7@2,
    // docs-portal 0.2@1 (via RELATED_TO).
    assert_eq!(names, vec!["Payments", "Auth", "Ledger", "Docs Portal"]);

    let ledger = &result.entities[2];
    assert_eq!(ledger.depth, 2);
    assert!((ledger.impact_score - 0.92 * 0.7).abs() < 1e-9);
}

#[tokio::test]
async fn downstream_impact_follows_produces_and_contains() {
    let result = analyzer()
        .await
        .downstream_impact("Checkout", &AnalysisOptions::default())
        .await
        .unwrap();

    assert_eq!(result.metadata.total_dependencies, 4);
    let mut names: Vec<&str> = result.entities.iter().map(|e| e.name.as_str()).collect();
    names.sort_unstable();
    assert_eq!(
        names,
        vec!["Analytics Dashboard", "Cart Widget", "Docs Portal", "Order Report"]
    );

    let dashboard = result
        .entities
        .iter()
        .find(|e| e.name == "Analytics Dashboard")
        .unwrap();
    assert_eq!(dashboard.depth, 2);
}

#[tokio::test]
async fn entity_without_dependencies_yields_empty_result() {
    let result = analyzer()
        .await
        .upstream_dependencies("Analytics Dashboard", &AnalysisOptions::default())
        .await
        .unwrap();

    assert!(result.entities.is_empty());
    assert_eq!(result.metadata.total_dependencies, 0);
    assert!(result.metadata.error.is_none());
}

#[tokio::test]
async fn unknown_entity_yields_empty_result_not_error() {
    let result = analyzer()
        .await
        .upstream_dependencies("Ghost", &AnalysisOptions::default())
        .await
        .unwrap();

    assert!(result.entities.is_empty());
    assert!(result.metadata.error.is_none());
}

#[tokio::test]
async fn depth_bound_truncates_the_frontier() {
    let options = AnalysisOptions {
        max_depth: 1,
        ..AnalysisOptions::default()
    };
    let result = analyzer()
        .await
        .upstream_dependencies("Checkout", &options)
        .await
        .unwrap();

    assert!(result.entities.iter().all(|e| e.depth == 1));
    assert!(!result.entities.iter().any(|e| e.name == "Ledger"));
}

#[tokio::test]
async fn closest_occurrence_wins_when_paths_overlap() {
    let graph = commerce_graph().await;
    // Ledger is at depth 2 through both payments and auth; a direct USES
    // edge pulls it to depth 1.
    graph
        .add_relation(
            &EntityId::new("checkout"),
            &EntityId::new("ledger"),
            RelationType::Uses,
        )
        .await
        .unwrap();

    let analyzer = ImpactAnalyzer::new(Arc::new(graph));
    let result = analyzer
        .upstream_dependencies("Checkout", &AnalysisOptions::default())
        .await
        .unwrap();

    let ledger = result.entities.iter().find(|e| e.name == "Ledger").unwrap();
    assert_eq!(ledger.depth, 1);
    assert!((ledger.impact_score - 0.92).abs() < 1e-9);
}

#[tokio::test]
async fn invalid_options_fail_synchronously() {
    let err = analyzer()
        .await
        .upstream_dependencies(
            "Checkout",
            &AnalysisOptions {
                max_depth: 0,
                ..AnalysisOptions::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ripple::Error::Config(_)));
}

// ========== Impact summarization ==========

#[tokio::test]
async fn summary_counts_critical_entities_across_both_sides() {
    let report = analyzer()
        .await
        .analyze_impact("Checkout", &AnalysisOptions::default())
        .await
        .unwrap();

    // Payments (0.95) and Ledger (0.92) clear the 0.9 cutoff.
    assert_eq!(report.summary.critical_count, 2);
    let critical: Vec<&str> = report
        .summary
        .critical_entities
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(critical, vec!["Payments", "Ledger"]);

    // 8 impacted entities, 2 critical: Medium on the default scale.
    assert_eq!(report.summary.risk_level, RiskLevel::Medium);
}

#[tokio::test]
async fn type_distribution_counts_once_per_side() {
    let report = analyzer()
        .await
        .analyze_impact("Checkout", &AnalysisOptions::default())
        .await
        .unwrap();

    // Docs Portal is reachable on both sides through RELATED_TO and
    // counts once per side.
    assert_eq!(report.summary.type_distribution["System"], 4);
    assert_eq!(report.summary.type_distribution["Document"], 4);
}

#[tokio::test]
async fn small_quiet_graphs_are_low_risk() {
    let graph = InMemoryGraph::new();
    graph.upsert_entity(entity("a", "A", "System")).await;
    graph
        .upsert_entity(entity("b", "B", "System").with_importance(0.5))
        .await;
    graph
        .add_relation(
            &EntityId::new("a"),
            &EntityId::new("b"),
            RelationType::DependsOn,
        )
        .await
        .unwrap();

    let analyzer = ImpactAnalyzer::new(Arc::new(graph));
    let report = analyzer
        .analyze_impact("A", &AnalysisOptions::default())
        .await
        .unwrap();
    assert_eq!(report.summary.risk_level, RiskLevel::Low);
    assert_eq!(report.summary.critical_count, 0);
}

#[tokio::test]
async fn wide_fan_out_escalates_risk() {
    let graph = InMemoryGraph::new();
    graph.upsert_entity(entity("hub", "Hub", "System")).await;
    for i in 0..20 {
        let id = format!("dep-{i}");
        graph
            .upsert_entity(entity(&id, &format!("Dep {i}"), "System").with_importance(0.5))
            .await;
        graph
            .add_relation(
                &EntityId::new("hub"),
                &EntityId::new(&id),
                RelationType::Contains,
            )
            .await
            .unwrap();
    }

    let analyzer = ImpactAnalyzer::new(Arc::new(graph));
    let report = analyzer
        .analyze_impact("Hub", &AnalysisOptions::default())
        .await
        .unwrap();
    assert_eq!(report.summary.risk_level, RiskLevel::High);
}

#[tokio::test]
async fn graph_failure_degrades_both_sides_without_raising() {
    let analyzer = ImpactAnalyzer::new(Arc::new(FailingStore::new()));
    let report = analyzer
        .analyze_impact("Checkout", &AnalysisOptions::default())
        .await
        .unwrap();

    for side in [&report.upstream, &report.downstream] {
        assert!(side.entities.is_empty());
        assert_eq!(side.metadata.total_dependencies, 0);
        let error = side.metadata.error.as_deref().unwrap();
        assert!(error.contains("simulated graph outage"));
    }
    assert_eq!(report.summary.risk_level, RiskLevel::Low);
    assert!(report.summary.critical_entities.is_empty());
}

// ========== Taxonomy ==========

#[test]
fn edge_type_taxonomy_is_exactly_as_documented() {
    assert_eq!(
        RelationType::UPSTREAM,
        [
            RelationType::DependsOn,
            RelationType::Requires,
            RelationType::Uses
        ]
    );
    assert_eq!(
        RelationType::DOWNSTREAM,
        [RelationType::Produces, RelationType::Contains]
    );
    assert_eq!(RelationType::BIDIRECTIONAL, [RelationType::RelatedTo]);
}
