//! Composite importance ranking.
//!
//! Merges three per-node signals into one normalized score: PageRank and
//! betweenness centrality (computed by `ripple-centrality` over the same
//! snapshot) and mention frequency. Each signal is min-max scaled
//! independently before blending, so no signal's native scale dominates.

use super::score::min_max_normalize;
use super::ImpactAnalyzer;
use crate::config::ImportanceWeights;
use crate::domain::{
    ComponentScores, EntityId, GraphSnapshot, ImportanceRanking, ImportanceRecord, RankingMetadata,
};
use crate::error::{Error, Result};
use ripple_centrality::{betweenness, page_rank, CentralityGraph, PageRankSettings};
use std::collections::HashMap;
use tracing::{debug, warn};

impl ImpactAnalyzer {
    /// Rank every entity in the graph by composite importance.
    ///
    /// Reads a full snapshot, computes both centrality signals over it,
    /// and blends them with mention frequency using the configured
    /// weights. The ranking is recomputed from scratch on every call. A
    /// snapshot-read failure degrades to an empty ranking carrying the
    /// diagnostic in `metadata.error`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::error::Error::Config) if the
    /// configured weights fail validation. Collaborator failures never
    /// surface here.
    pub async fn rank_importance(&self) -> Result<ImportanceRanking> {
        self.config().weights.validate()?;

        let snapshot = match self.store().snapshot().await {
            Ok(snapshot) => snapshot,
            Err(error) => {
                warn!(%error, "snapshot read failed, degrading to empty ranking");
                return Ok(ImportanceRanking::degraded(error.to_string()));
            }
        };

        let mut graph = CentralityGraph::new();
        for node in &snapshot.nodes {
            graph.add_node(node.id.as_str());
        }
        for edge in &snapshot.edges {
            graph.add_edge(edge.source.as_str(), edge.target.as_str());
        }

        let page_rank = page_rank(&graph, &PageRankSettings::default())
            .map_err(|e| Error::Config(e.to_string()))?;
        let betweenness = betweenness(&graph);
        debug!(nodes = snapshot.nodes.len(), "centrality signals computed");

        rank_with_scores(
            &snapshot,
            &page_rank.scores,
            &betweenness.scores,
            &self.config().weights,
        )
    }

    /// The `n` most important entities (fewer if the graph is smaller).
    ///
    /// # Errors
    ///
    /// Same contract as [`ImpactAnalyzer::rank_importance`].
    pub async fn top_entities(&self, n: usize) -> Result<Vec<ImportanceRecord>> {
        let ranking = self.rank_importance().await?;
        Ok(ranking.top_entities(n).to_vec())
    }

    /// Importance record for one entity, or `None` if it is absent from
    /// the current graph. Absence is a lookup miss, not an error.
    ///
    /// # Errors
    ///
    /// Same contract as [`ImpactAnalyzer::rank_importance`].
    pub async fn entity_importance(&self, id: &EntityId) -> Result<Option<ImportanceRecord>> {
        let ranking = self.rank_importance().await?;
        Ok(ranking.entity_importance(id).cloned())
    }
}

/// Blend externally supplied centrality mappings with mention frequency.
///
/// Nodes missing from either centrality mapping contribute 0 for that
/// signal; missing mention counts default to 1. An empty snapshot yields
/// empty outputs with `node_count` 0.
///
/// # Errors
///
/// Returns [`Error::Config`](crate::error::Error::Config) if `weights`
/// fail validation.
pub fn rank_with_scores(
    snapshot: &GraphSnapshot,
    page_rank: &HashMap<String, f64>,
    betweenness: &HashMap<String, f64>,
    weights: &ImportanceWeights,
) -> Result<ImportanceRanking> {
    weights.validate()?;

    let node_count = snapshot.nodes.len();
    if node_count == 0 {
        return Ok(ImportanceRanking::default());
    }

    let raw_page_rank: Vec<f64> = snapshot
        .nodes
        .iter()
        .map(|node| page_rank.get(node.id.as_str()).copied().unwrap_or(0.0))
        .collect();
    let raw_betweenness: Vec<f64> = snapshot
        .nodes
        .iter()
        .map(|node| betweenness.get(node.id.as_str()).copied().unwrap_or(0.0))
        .collect();
    #[allow(clippy::cast_precision_loss)]
    let raw_mentions: Vec<f64> = snapshot
        .nodes
        .iter()
        .map(|node| node.effective_mention_count() as f64)
        .collect();

    let norm_page_rank = min_max_normalize(&raw_page_rank);
    let norm_betweenness = min_max_normalize(&raw_betweenness);
    let norm_mentions = min_max_normalize(&raw_mentions);

    let mut records: Vec<ImportanceRecord> = snapshot
        .nodes
        .iter()
        .enumerate()
        .map(|(i, node)| {
            let components = ComponentScores {
                page_rank: norm_page_rank[i],
                betweenness: norm_betweenness[i],
                mention_frequency: norm_mentions[i],
            };
            let composite = weights.page_rank * components.page_rank
                + weights.betweenness * components.betweenness
                + weights.mention_frequency * components.mention_frequency;
            ImportanceRecord {
                id: node.id.clone(),
                name: node.name.clone(),
                entity_type: node.entity_type.clone(),
                importance: composite,
                rank: 0,
                percentile: 0.0,
                mention_count: node.effective_mention_count(),
                components,
            }
        })
        .collect();

    records.sort_by(|a, b| {
        b.importance
            .total_cmp(&a.importance)
            .then_with(|| a.id.cmp(&b.id))
    });
    #[allow(clippy::cast_precision_loss)]
    let node_count_f = node_count as f64;
    for (index, record) in records.iter_mut().enumerate() {
        record.rank = index + 1;
        #[allow(clippy::cast_precision_loss)]
        let rank_f = record.rank as f64;
        record.percentile = (node_count_f - rank_f + 1.0) / node_count_f;
    }

    let scores = records
        .iter()
        .map(|record| (record.id.clone(), record.importance))
        .collect();

    Ok(ImportanceRanking {
        scores,
        ranked_entities: records,
        metadata: RankingMetadata {
            node_count,
            error: None,
        },
    })
}
