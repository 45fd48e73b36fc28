//! PageRank via power iteration.
//!
//! ```text
//! PR(v) = (1-d)/N + d * Σ(PR(u) / outdegree(u))
//!                       u→v
//! ```
//!
//! Dangling nodes (no outgoing edges) distribute their mass uniformly over
//! the whole graph each iteration, so scores always sum to 1. Convergence
//! is measured as the L1 distance between successive score vectors;
//! iteration stops at `tolerance` or after `max_iterations`, whichever
//! comes first.

use crate::error::{Error, Result};
use crate::graph::CentralityGraph;
use crate::scores::CentralityScores;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Tuning parameters for [`page_rank`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageRankSettings {
    /// Damping factor, the probability of following an edge rather than
    /// teleporting. Must lie in `(0, 1)`.
    pub damping: f64,

    /// Upper bound on power iterations. Must be at least 1.
    pub max_iterations: usize,

    /// L1 convergence tolerance between successive iterations.
    pub tolerance: f64,
}

impl Default for PageRankSettings {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 50,
            tolerance: 1e-6,
        }
    }
}

impl PageRankSettings {
    /// Check that all parameters are inside their valid ranges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Settings`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(Error::Settings(format!(
                "damping must be in (0, 1), got {}",
                self.damping
            )));
        }
        if self.max_iterations == 0 {
            return Err(Error::Settings(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        if self.tolerance <= 0.0 {
            return Err(Error::Settings(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

/// Compute PageRank scores for every node in the graph.
///
/// An empty graph yields an empty score mapping with `node_count` 0.
///
/// # Errors
///
/// Returns [`Error::Settings`] if `settings` fail validation. The
/// computation itself cannot fail.
pub fn page_rank(graph: &CentralityGraph, settings: &PageRankSettings) -> Result<CentralityScores> {
    settings.validate()?;

    let n = graph.node_count();
    if n == 0 {
        return Ok(CentralityScores::from_scores(HashMap::new()));
    }

    #[allow(clippy::cast_precision_loss)]
    let n_f = n as f64;
    let indices: Vec<_> = graph.graph.node_indices().collect();
    let teleport = (1.0 - settings.damping) / n_f;

    let mut ranks: HashMap<_, f64> = indices.iter().map(|&i| (i, 1.0 / n_f)).collect();

    let mut iterations = 0;
    for iteration in 0..settings.max_iterations {
        iterations = iteration + 1;

        // Mass of dangling nodes is spread uniformly across the graph.
        let dangling: f64 = indices
            .iter()
            .filter(|&&i| graph.graph.neighbors_directed(i, Direction::Outgoing).count() == 0)
            .map(|i| ranks[i])
            .sum();

        let mut next: HashMap<_, f64> = indices
            .iter()
            .map(|&i| (i, teleport + settings.damping * dangling / n_f))
            .collect();

        for &i in &indices {
            let out_degree = graph
                .graph
                .neighbors_directed(i, Direction::Outgoing)
                .count();
            if out_degree == 0 {
                continue;
            }
            #[allow(clippy::cast_precision_loss)]
            let share = settings.damping * ranks[&i] / out_degree as f64;
            for neighbor in graph.graph.neighbors_directed(i, Direction::Outgoing) {
                if let Some(rank) = next.get_mut(&neighbor) {
                    *rank += share;
                }
            }
        }

        let delta: f64 = indices.iter().map(|i| (next[i] - ranks[i]).abs()).sum();
        ranks = next;
        if delta < settings.tolerance {
            break;
        }
    }

    debug!(nodes = n, iterations, "pagerank converged");

    let scores = ranks
        .into_iter()
        .map(|(index, score)| (graph.graph[index].clone(), score))
        .collect();
    Ok(CentralityScores::from_scores(scores))
}
