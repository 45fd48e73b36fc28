//! Configuration for the analysis engine.
//!
//! Every tunable that shapes a score or a risk verdict lives here as data
//! rather than hard-coded logic, so thresholds can be tuned without code
//! changes. Configuration is validated eagerly: invalid values are a
//! caller mistake and fail the operation instead of being silently
//! corrected, since corrected values would produce misleading scores.
//!
//! Configuration round-trips through YAML via [`AnalysisConfig::load`] and
//! [`AnalysisConfig::save`].

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

/// Default maximum traversal depth.
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// Default cap on entities returned by one traversal.
pub const DEFAULT_MAX_ENTITIES: usize = 100;

/// Default per-hop decay multiplier for impact scores.
pub const DEFAULT_DECAY_FACTOR: f64 = 0.7;

/// Importance assumed for entities that carry none.
pub const DEFAULT_IMPORTANCE: f64 = 0.5;

/// Mention count assumed for entities that carry none.
pub const DEFAULT_MENTION_COUNT: u64 = 1;

/// Default time-to-live for cached analysis results, in seconds.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Conventional configuration file name.
pub const CONFIG_FILE_NAME: &str = "ripple.yaml";

/// Tolerance when checking that importance weights sum to 1.0.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Per-call options for dependency traversal and scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisOptions {
    /// Maximum traversal depth (hard limit, must be positive).
    pub max_depth: usize,

    /// Maximum entities returned by one traversal (hard limit, must be
    /// positive).
    pub max_entities: usize,

    /// Per-hop retention multiplier in `(0, 1]`.
    pub decay_factor: f64,

    /// When false, stored importance is ignored and every entity scores
    /// with the default importance, so results rank by depth alone.
    pub include_importance: bool,

    /// Bypass the result cache and recompute.
    pub force_refresh: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_entities: DEFAULT_MAX_ENTITIES,
            decay_factor: DEFAULT_DECAY_FACTOR,
            include_importance: true,
            force_refresh: false,
        }
    }
}

impl AnalysisOptions {
    /// Check that all options are inside their valid ranges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(Error::Config("maxDepth must be positive".to_string()));
        }
        if self.max_entities == 0 {
            return Err(Error::Config("maxEntities must be positive".to_string()));
        }
        if !(self.decay_factor > 0.0 && self.decay_factor <= 1.0) {
            return Err(Error::Config(format!(
                "decayFactor must be in (0, 1], got {}",
                self.decay_factor
            )));
        }
        Ok(())
    }
}

/// Weights for blending the composite importance score.
///
/// Must sum to exactly 1.0; anything else would rescale the composite
/// range and silently distort rankings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImportanceWeights {
    /// Weight of the normalized PageRank signal.
    pub page_rank: f64,

    /// Weight of the normalized betweenness signal.
    pub betweenness: f64,

    /// Weight of the normalized mention-frequency signal.
    pub mention_frequency: f64,
}

impl Default for ImportanceWeights {
    fn default() -> Self {
        Self {
            page_rank: 0.4,
            betweenness: 0.35,
            mention_frequency: 0.25,
        }
    }
}

impl ImportanceWeights {
    /// Check that each weight is in `[0, 1]` and the sum is 1.0.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] describing the violation.
    pub fn validate(&self) -> Result<()> {
        for (label, weight) in [
            ("pageRank", self.page_rank),
            ("betweenness", self.betweenness),
            ("mentionFrequency", self.mention_frequency),
        ] {
            if !(0.0..=1.0).contains(&weight) {
                return Err(Error::Config(format!(
                    "weight {label} must be in [0, 1], got {weight}"
                )));
            }
        }
        let sum = self.page_rank + self.betweenness + self.mention_frequency;
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(Error::Config(format!(
                "importance weights must sum to 1.0, got {sum}"
            )));
        }
        Ok(())
    }
}

/// Boundaries of the ordered risk scale and the critical-entity cutoff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RiskThresholds {
    /// Total impacted-entity count at which risk reaches Medium.
    pub medium_total: usize,

    /// Total impacted-entity count at which risk reaches High.
    pub high_total: usize,

    /// Total impacted-entity count above which risk is Critical.
    pub critical_total: usize,

    /// Number of critical entities at which risk is Critical.
    pub critical_count: usize,

    /// Importance at or above which an entity counts as critical.
    pub critical_importance: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            medium_total: 5,
            high_total: 15,
            critical_total: 40,
            critical_count: 3,
            critical_importance: 0.9,
        }
    }
}

impl RiskThresholds {
    /// Check ordering of the scale boundaries and cutoff range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] describing the violation.
    pub fn validate(&self) -> Result<()> {
        if self.medium_total > self.high_total || self.high_total > self.critical_total {
            return Err(Error::Config(format!(
                "risk totals must be ordered mediumTotal <= highTotal <= criticalTotal, \
                 got {} / {} / {}",
                self.medium_total, self.high_total, self.critical_total
            )));
        }
        if self.critical_count == 0 {
            return Err(Error::Config("criticalCount must be positive".to_string()));
        }
        if !(0.0..=1.0).contains(&self.critical_importance) {
            return Err(Error::Config(format!(
                "criticalImportance must be in [0, 1], got {}",
                self.critical_importance
            )));
        }
        Ok(())
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisConfig {
    /// Default traversal options handed to callers.
    pub options: AnalysisOptions,

    /// Risk scale boundaries.
    pub thresholds: RiskThresholds,

    /// Composite importance weights.
    pub weights: ImportanceWeights,

    /// Result cache time-to-live in seconds.
    pub cache_ttl_secs: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            options: AnalysisOptions::default(),
            thresholds: RiskThresholds::default(),
            weights: ImportanceWeights::default(),
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
        }
    }
}

impl AnalysisConfig {
    /// Validate every section.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for the first violated constraint.
    pub fn validate(&self) -> Result<()> {
        self.options.validate()?;
        self.thresholds.validate()?;
        self.weights.validate()?;
        Ok(())
    }

    /// Load and validate configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and
    /// [`Error::Config`] if it does not parse or fails validation.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        let config: Self =
            serde_yaml::from_str(&content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if serialization fails and [`Error::Io`]
    /// if the file cannot be written.
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::Config(format!("YAML error: {e}")))?;
        fs::write(path, content).await?;
        Ok(())
    }
}
