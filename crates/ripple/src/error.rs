//! Error types for ripple operations.
//!
//! Errors fall into two families with different handling rules:
//!
//! - **Collaborator failures** (`Graph`): the graph engine rejected or
//!   failed a query. Public analysis operations recover these locally and
//!   return a structurally valid, degraded result carrying a diagnostic
//!   in its metadata; they are never surfaced as an `Err` from those
//!   operations.
//! - **Caller mistakes** (`Config`, `EntityNotFound`): invalid tunables or
//!   references to entities that must exist. These are surfaced
//!   synchronously so a misconfiguration cannot silently skew scores.

use thiserror::Error;

/// Result type for ripple operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for ripple operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The graph collaborator failed or rejected a query.
    #[error("graph query failed: {0}")]
    Graph(String),

    /// Invalid configuration (weights, thresholds, or traversal options).
    #[error("configuration error: {0}")]
    Config(String),

    /// A referenced entity does not exist in the graph.
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
