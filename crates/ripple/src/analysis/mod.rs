//! The impact-analysis and importance-ranking engine.
//!
//! [`ImpactAnalyzer`] is the produced interface of this crate: it owns a
//! shared [`GraphStore`] handle, an [`AnalysisConfig`], and a
//! [`ResultCache`], and exposes the analysis operations:
//!
//! - [`ImpactAnalyzer::upstream_dependencies`] /
//!   [`ImpactAnalyzer::downstream_impact`]: scored, deduplicated,
//!   ranked dependency lists for one direction
//! - [`ImpactAnalyzer::analyze_impact`]: both directions plus a risk
//!   summary
//! - [`ImpactAnalyzer::simulate_removal`]: severity-bucketed removal
//!   simulation with a recommendation
//! - [`ImpactAnalyzer::rank_importance`]: composite importance over the
//!   whole graph
//! - [`ImpactAnalyzer::impact_with_cache`]: cached single-direction
//!   analysis
//!
//! Collaborator failures degrade results instead of failing calls;
//! invalid configuration fails calls instead of degrading results.

mod cache;
mod dependencies;
mod impact;
mod importance;
mod removal;
mod score;

pub use cache::{CacheStats, ResultCache};
pub use importance::rank_with_scores;
pub use score::impact_score;

use crate::config::{AnalysisConfig, AnalysisOptions};
use crate::domain::{Direction, ImpactResult};
use crate::error::Result;
use crate::graph::GraphStore;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Analysis engine over a shared graph store.
///
/// # Example
///
/// ```no_run
/// use ripple::analysis::ImpactAnalyzer;
/// use ripple::config::AnalysisOptions;
/// use ripple::graph::InMemoryGraph;
/// use std::sync::Arc;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> anyhow::Result<()> {
///     let graph = InMemoryGraph::new();
///     // ... populate the graph ...
///
///     let analyzer = ImpactAnalyzer::new(Arc::new(graph));
///     let report = analyzer
///         .analyze_impact("Billing", &AnalysisOptions::default())
///         .await?;
///     println!("risk: {}", report.summary.risk_level);
///     Ok(())
/// }
/// ```
pub struct ImpactAnalyzer {
    store: Arc<dyn GraphStore>,
    config: AnalysisConfig,
    cache: ResultCache,
}

impl ImpactAnalyzer {
    /// Create an analyzer with the default configuration.
    #[must_use]
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        let config = AnalysisConfig::default();
        let cache = ResultCache::new(Duration::from_secs(config.cache_ttl_secs));
        Self {
            store,
            config,
            cache,
        }
    }

    /// Create an analyzer with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::error::Error::Config) if the
    /// configuration fails validation.
    pub fn with_config(store: Arc<dyn GraphStore>, config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        let cache = ResultCache::new(Duration::from_secs(config.cache_ttl_secs));
        Ok(Self {
            store,
            config,
            cache,
        })
    }

    /// The engine configuration.
    #[must_use]
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// A copy of the configured default traversal options.
    #[must_use]
    pub fn options(&self) -> AnalysisOptions {
        self.config.options.clone()
    }

    pub(crate) fn store(&self) -> &dyn GraphStore {
        self.store.as_ref()
    }

    /// Single-direction analysis served through the result cache.
    ///
    /// On a hit the graph store is not consulted. `options.force_refresh`
    /// bypasses the lookup and overwrites the entry. Degraded results
    /// (those carrying `metadata.error`) are returned but never cached,
    /// so a transient graph failure does not poison the TTL window.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::error::Error::Config) if `options`
    /// fail validation.
    pub async fn impact_with_cache(
        &self,
        entity_name: &str,
        direction: Direction,
        options: &AnalysisOptions,
    ) -> Result<ImpactResult> {
        options.validate()?;
        let key = cache::cache_key(entity_name, direction, options);

        if !options.force_refresh {
            if let Some(cached) = self.cache.get(&key).await {
                debug!(entity = %entity_name, %direction, "impact cache hit");
                return Ok(cached);
            }
        }

        let result = match direction {
            Direction::Upstream => self.upstream_dependencies(entity_name, options).await?,
            Direction::Downstream => self.downstream_impact(entity_name, options).await?,
        };
        if result.metadata.error.is_none() {
            self.cache.insert(key, result.clone()).await;
        }
        Ok(result)
    }

    /// Empty the result cache unconditionally.
    ///
    /// Callers invoke this on graph-mutation signals and for test
    /// isolation; the engine never invalidates implicitly.
    pub async fn clear_cache(&self) {
        self.cache.clear().await;
    }

    /// Result-cache effectiveness counters.
    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }
}

impl std::fmt::Debug for ImpactAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImpactAnalyzer")
            .field("store", &"<dyn GraphStore>")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
