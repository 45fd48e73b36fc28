//! TTL cache for analysis results.
//!
//! Keys fingerprint the source entity, the traversal direction, and every
//! option that influences the result, so calls with different bounds or
//! decay factors never collide. The cache is an explicit object owned by
//! the analyzer with lifecycle `new -> use -> clear`; there is no
//! process-global state to reset between tests.
//!
//! Concurrency: the map lives behind a mutex that is only held for map
//! operations, never across a graph call. Two concurrent misses for the
//! same key may both recompute; the last insert wins.

use crate::config::AnalysisOptions;
use crate::domain::{Direction, ImpactResult};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Counters describing cache effectiveness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    /// Lookups served from an unexpired entry.
    pub hits: u64,

    /// Lookups that found nothing or an expired entry.
    pub misses: u64,

    /// Entries currently stored, expired or not.
    pub entries: usize,
}

struct CacheEntry {
    value: ImpactResult,
    expires_at: Instant,
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<String, CacheEntry>,
    hits: u64,
    misses: u64,
}

/// Memoizes [`ImpactResult`]s with per-entry TTL expiry.
pub struct ResultCache {
    state: Mutex<CacheState>,
    ttl: Duration,
}

impl ResultCache {
    /// Create an empty cache whose entries live for `ttl`.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            state: Mutex::new(CacheState::default()),
            ttl,
        }
    }

    /// Look up an unexpired entry, counting the hit or miss.
    pub(crate) async fn get(&self, key: &str) -> Option<ImpactResult> {
        let mut state = self.state.lock().await;
        match state.entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => {
                let value = entry.value.clone();
                state.hits += 1;
                Some(value)
            }
            Some(_) => {
                state.entries.remove(key);
                state.misses += 1;
                None
            }
            None => {
                state.misses += 1;
                None
            }
        }
    }

    /// Store a value under the key, replacing any previous entry.
    pub(crate) async fn insert(&self, key: String, value: ImpactResult) {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + self.ttl,
        };
        let mut state = self.state.lock().await;
        state.entries.insert(key, entry);
    }

    /// Drop every entry unconditionally. Counters are preserved.
    pub async fn clear(&self) {
        let mut state = self.state.lock().await;
        state.entries.clear();
    }

    /// Current effectiveness counters.
    pub async fn stats(&self) -> CacheStats {
        let state = self.state.lock().await;
        CacheStats {
            hits: state.hits,
            misses: state.misses,
            entries: state.entries.len(),
        }
    }
}

/// Serialized-options fingerprint for a cached analysis call.
///
/// `force_refresh` is deliberately absent: it changes caching behavior,
/// not the result, so refreshed and cached calls share a key.
pub(crate) fn cache_key(source: &str, direction: Direction, options: &AnalysisOptions) -> String {
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct KeyParts<'a> {
        source: &'a str,
        direction: Direction,
        max_depth: usize,
        max_entities: usize,
        decay_bits: u64,
        include_importance: bool,
    }

    let parts = KeyParts {
        source,
        direction,
        max_depth: options.max_depth,
        max_entities: options.max_entities,
        // Bit pattern instead of a float display form: exact, and free of
        // formatting ambiguity.
        decay_bits: options.decay_factor.to_bits(),
        include_importance: options.include_importance,
    };
    let serialized = serde_json::to_string(&parts).unwrap_or_else(|_| {
        format!(
            "{source}|{direction}|{}|{}|{}|{}",
            options.max_depth,
            options.max_entities,
            options.decay_factor.to_bits(),
            options.include_importance
        )
    });

    let mut hasher = Sha256::new();
    hasher.update(serialized.as_bytes());
    format!("{:x}", hasher.finalize())
}
