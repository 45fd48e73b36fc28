//! Error types for centrality computations.

use thiserror::Error;

/// Result type for centrality operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while computing centrality scores.
///
/// Centrality computation itself cannot fail on well-formed input; every
/// variant here represents an invalid configuration supplied by the caller.
#[derive(Debug, Error)]
pub enum Error {
    /// Algorithm settings are outside their valid range.
    #[error("invalid settings: {0}")]
    Settings(String),
}
