//! Result types shared by all centrality algorithms.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single node with its centrality score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedScore {
    /// Node identifier.
    pub id: String,

    /// Centrality score for the node.
    pub score: f64,
}

/// Metadata describing a centrality computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CentralityMetadata {
    /// Number of nodes the scores were computed over.
    pub node_count: usize,
}

/// Per-node centrality scores with a ranked view.
///
/// `scores` maps every node id in the input graph to its score; `ranked`
/// holds the same entries sorted by descending score, ties broken by
/// ascending id so output order is deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentralityScores {
    /// Score per node id. Covers every node in the input graph.
    pub scores: HashMap<String, f64>,

    /// Nodes sorted by descending score, ties by ascending id.
    pub ranked: Vec<RankedScore>,

    /// Computation metadata.
    pub metadata: CentralityMetadata,
}

impl CentralityScores {
    /// Assemble a result from a raw score mapping.
    pub(crate) fn from_scores(scores: HashMap<String, f64>) -> Self {
        let mut ranked: Vec<RankedScore> = scores
            .iter()
            .map(|(id, &score)| RankedScore {
                id: id.clone(),
                score,
            })
            .collect();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.id.cmp(&b.id)));

        let metadata = CentralityMetadata {
            node_count: scores.len(),
        };
        Self {
            scores,
            ranked,
            metadata,
        }
    }

    /// Score for a node id, if it was part of the computed graph.
    #[must_use]
    pub fn score(&self, id: &str) -> Option<f64> {
        self.scores.get(id).copied()
    }
}
