//! Graph centrality algorithms for ripple.
//!
//! This crate computes per-node centrality scores over a directed graph
//! snapshot and exposes them as plain `id -> score` mappings. It knows
//! nothing about knowledge-graph entities; callers build a
//! [`CentralityGraph`] from whatever node identifiers they use and read the
//! resulting [`CentralityScores`] back out.
//!
//! Two algorithms are provided:
//!
//! - [`page_rank`]: classic PageRank (Page et al., 1998) via power
//!   iteration with configurable damping and convergence tolerance
//! - [`betweenness`]: exact betweenness centrality using Brandes'
//!   algorithm (2001) over unweighted shortest paths
//!
//! Both run over the same graph instance, so the node sets of the two
//! result mappings are always consistent.
//!
//! # Example
//!
//! ```
//! use ripple_centrality::{betweenness, page_rank, CentralityGraph, PageRankSettings};
//!
//! let mut graph = CentralityGraph::new();
//! graph.add_edge("billing", "ledger");
//! graph.add_edge("reporting", "ledger");
//!
//! let ranks = page_rank(&graph, &PageRankSettings::default()).unwrap();
//! let bridges = betweenness(&graph);
//!
//! assert_eq!(ranks.metadata.node_count, 3);
//! assert_eq!(bridges.metadata.node_count, 3);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod betweenness;
pub mod error;
pub mod graph;
pub mod pagerank;
pub mod scores;

pub use betweenness::betweenness;
pub use error::{Error, Result};
pub use graph::CentralityGraph;
pub use pagerank::{page_rank, PageRankSettings};
pub use scores::{CentralityMetadata, CentralityScores, RankedScore};
