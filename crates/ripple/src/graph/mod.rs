//! Graph collaborator abstraction.
//!
//! The analysis engine never executes graph queries itself; it constructs
//! a [`TraversalQuery`] and hands it to a [`GraphStore`]. The trait is
//! async and object-safe so the engine can run against anything from the
//! bundled in-memory backend to a remote graph database driver.
//!
//! # Method Categories
//!
//! - **Traversal**: `submit_traversal` runs bounded-depth,
//!   edge-type-filtered path discovery from a named entity
//! - **Snapshot**: `snapshot` reads the full node/edge set for importance
//!   ranking
//! - **Edge counting**: `direct_dependents` answers the removal
//!   simulator's direct-edge verification query
//!
//! # Error Handling
//!
//! Implementations surface failures as [`Error::Graph`](crate::error::Error::Graph).
//! The engine treats every such failure as recoverable: the affected
//! result degrades instead of propagating the error (see the crate-level
//! error philosophy in [`crate::error`]).
//!
//! # Consistency
//!
//! All three methods read a point-in-time view. The engine does not
//! guarantee consistency across concurrent graph mutations; it operates on
//! whatever snapshot the store hands back.

use crate::domain::{EntityId, GraphSnapshot, TraversalPath};
use crate::error::Result;
use async_trait::async_trait;

pub mod in_memory;
pub mod query;

pub use in_memory::InMemoryGraph;
pub use query::TraversalQuery;

/// Read-only interface to the knowledge graph.
///
/// Implementations must be `Send + Sync`; the engine shares one store
/// across concurrent analysis calls behind an `Arc`.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Execute a bounded traversal and return every discovered path.
    ///
    /// Each returned path is the full ordered vertex sequence from the
    /// source entity to a discovered entity, so callers can recover
    /// per-vertex depth from the position index. An unknown source name
    /// yields an empty path set, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Graph`](crate::error::Error::Graph) if the query
    /// is rejected or the backend fails.
    async fn submit_traversal(&self, query: &TraversalQuery) -> Result<Vec<TraversalPath>>;

    /// Read the full node/edge snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Graph`](crate::error::Error::Graph) if the backend
    /// fails.
    async fn snapshot(&self) -> Result<GraphSnapshot>;

    /// IDs of entities one downstream hop from the named entity.
    ///
    /// Used by the removal simulator to confirm direct classification
    /// independently of path depth. An unknown name yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Graph`](crate::error::Error::Graph) if the backend
    /// fails.
    async fn direct_dependents(&self, source_name: &str) -> Result<Vec<EntityId>>;
}
