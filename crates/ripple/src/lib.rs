//! Ripple - impact analysis and importance ranking over typed knowledge
//! graphs.
//!
//! Ripple answers two questions about an entity in a typed, directed
//! knowledge graph (Processes, Systems, Roles, Documents connected by
//! typed relations): *what does it depend on / what depends on it*, and
//! *how important is it overall*. It backs tooling that shows blast
//! radius before changing or removing an entity, and ranks entities for
//! display, search boosting, or prioritization.
//!
//! # Architecture
//!
//! - [`graph`]: the [`GraphStore`](graph::GraphStore) collaborator trait,
//!   the bounded [`TraversalQuery`](graph::TraversalQuery) builder, and an
//!   in-memory reference backend
//! - [`analysis`]: the [`ImpactAnalyzer`](analysis::ImpactAnalyzer)
//!   engine for dependency analysis, impact summaries, removal simulation,
//!   importance ranking, and result caching
//! - [`domain`]: entities, the relation-type taxonomy, and result shapes
//! - [`config`]: every tunable as data, with YAML round-tripping
//!
//! Graph queries and centrality algorithms stay behind interfaces: the
//! engine builds traversal requests and consumes path sets, and merges
//! centrality mappings computed by the `ripple-centrality` crate.
//!
//! # Error Philosophy
//!
//! Collaborator failures degrade the affected result (empty list plus a
//! diagnostic in its metadata) instead of failing the call; invalid
//! configuration fails the call instead of degrading the result. See
//! [`error`] for the full taxonomy.

#![forbid(unsafe_code)]

pub mod analysis;
pub mod config;
pub mod domain;
pub mod error;
pub mod graph;

pub use error::{Error, Result};
