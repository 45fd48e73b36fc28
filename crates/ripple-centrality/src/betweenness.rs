//! Betweenness centrality via Brandes' algorithm.
//!
//! Betweenness measures how often a node lies on shortest paths between
//! other nodes, which makes it a good signal for "bridge" entities whose
//! removal disconnects parts of the graph. This implementation follows
//! Brandes (2001) for directed, unweighted graphs: one BFS per source plus
//! a reverse dependency accumulation, `O(V * E)` overall.

use crate::graph::CentralityGraph;
use crate::scores::CentralityScores;
use petgraph::graph::NodeIndex;
use petgraph::Direction;
use std::collections::{HashMap, VecDeque};
use tracing::debug;

/// Compute betweenness centrality for every node in the graph.
///
/// Scores are raw path counts, not normalized; callers that need a `[0,1]`
/// range should scale the mapping themselves. An empty graph yields an
/// empty mapping with `node_count` 0.
#[must_use]
pub fn betweenness(graph: &CentralityGraph) -> CentralityScores {
    let n = graph.node_count();
    let mut centrality: HashMap<NodeIndex, f64> =
        graph.graph.node_indices().map(|i| (i, 0.0)).collect();

    for source in graph.graph.node_indices() {
        accumulate_from(graph, source, &mut centrality);
    }

    debug!(nodes = n, "betweenness computed");

    let scores = centrality
        .into_iter()
        .map(|(index, score)| (graph.graph[index].clone(), score))
        .collect();
    CentralityScores::from_scores(scores)
}

/// Single-source shortest-path phase of Brandes' algorithm.
///
/// Runs a BFS from `source` counting shortest paths, then walks the
/// visited nodes in reverse order accumulating pair dependencies into
/// `centrality`.
fn accumulate_from(
    graph: &CentralityGraph,
    source: NodeIndex,
    centrality: &mut HashMap<NodeIndex, f64>,
) {
    let mut stack = Vec::new();
    let mut predecessors: HashMap<NodeIndex, Vec<NodeIndex>> = HashMap::new();
    let mut sigma: HashMap<NodeIndex, f64> = HashMap::new();
    let mut distance: HashMap<NodeIndex, i64> = HashMap::new();

    sigma.insert(source, 1.0);
    distance.insert(source, 0);

    let mut queue = VecDeque::new();
    queue.push_back(source);

    while let Some(v) = queue.pop_front() {
        stack.push(v);
        let v_distance = distance[&v];
        let v_sigma = sigma[&v];

        for w in graph.graph.neighbors_directed(v, Direction::Outgoing) {
            // First visit: w found at distance d(v) + 1.
            if !distance.contains_key(&w) {
                distance.insert(w, v_distance + 1);
                queue.push_back(w);
            }
            // Shortest path to w through v.
            if distance[&w] == v_distance + 1 {
                *sigma.entry(w).or_insert(0.0) += v_sigma;
                predecessors.entry(w).or_default().push(v);
            }
        }
    }

    // Dependency accumulation in reverse BFS order.
    let mut delta: HashMap<NodeIndex, f64> = HashMap::new();
    while let Some(w) = stack.pop() {
        let w_delta = delta.get(&w).copied().unwrap_or(0.0);
        let w_sigma = sigma[&w];
        if let Some(preds) = predecessors.get(&w) {
            for &v in preds {
                let contribution = sigma[&v] / w_sigma * (1.0 + w_delta);
                *delta.entry(v).or_insert(0.0) += contribution;
            }
        }
        if w != source {
            if let Some(score) = centrality.get_mut(&w) {
                *score += w_delta;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn middle_of_a_chain_carries_all_paths() {
        let mut graph = CentralityGraph::new();
        graph.add_edge("a", "b");
        graph.add_edge("b", "c");

        let scores = betweenness(&graph);
        // Only a -> c routes through b.
        assert!((scores.score("b").unwrap() - 1.0).abs() < 1e-9);
        assert!((scores.score("a").unwrap()).abs() < 1e-9);
        assert!((scores.score("c").unwrap()).abs() < 1e-9);
    }

    #[test]
    fn bridge_between_clusters_scores_highest() {
        let mut graph = CentralityGraph::new();
        graph.add_edge("a1", "bridge");
        graph.add_edge("a2", "bridge");
        graph.add_edge("bridge", "b1");
        graph.add_edge("bridge", "b2");

        let scores = betweenness(&graph);
        assert_eq!(scores.ranked[0].id, "bridge");
    }

    #[test]
    fn empty_graph_yields_empty_scores() {
        let scores = betweenness(&CentralityGraph::new());
        assert!(scores.scores.is_empty());
        assert_eq!(scores.metadata.node_count, 0);
    }

    #[test]
    fn disconnected_components_do_not_interact() {
        let mut graph = CentralityGraph::new();
        graph.add_edge("a", "b");
        graph.add_edge("x", "y");

        let scores = betweenness(&graph);
        for id in ["a", "b", "x", "y"] {
            assert!((scores.score(id).unwrap()).abs() < 1e-9);
        }
    }
}
