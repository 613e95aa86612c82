//! Configuration structures for the equity screening engine.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Main configuration for the screening engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Market-cap bucket boundaries.
    pub buckets: BucketConfig,
    /// Screening table pagination.
    pub pagination: PaginationConfig,
    /// Display formatting for comparison rows.
    pub display: DisplayConfig,
    /// Pair identifier generation.
    pub pairs: PairConfig,
    /// Autocomplete search.
    pub search: SearchConfig,
}

impl Config {
    /// Parse a (possibly partial) JSON configuration and validate it.
    ///
    /// Sections and fields that are absent keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        self.buckets.validate()?;

        if self.pagination.page_size == 0 {
            return Err(Error::config("pagination.page_size must be positive"));
        }
        if self.display.placeholder.is_empty() {
            return Err(Error::config("display.placeholder must not be empty"));
        }
        if self.pairs.separator.is_empty() {
            return Err(Error::config("pairs.separator must not be empty"));
        }

        Ok(())
    }
}

/// Market-cap bucket boundaries, in millions (the canonical unit).
///
/// Large: `> large_min`, Mid: `[mid_min, large_min]`,
/// Small: `[small_min, mid_min)`, Micro: `< small_min`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BucketConfig {
    /// Exclusive lower bound of the Large bucket.
    pub large_min: f64,
    /// Inclusive lower bound of the Mid bucket.
    pub mid_min: f64,
    /// Inclusive lower bound of the Small bucket.
    pub small_min: f64,
}

impl Default for BucketConfig {
    fn default() -> Self {
        Self {
            large_min: 10_000.0,
            mid_min: 500.0,
            small_min: 50.0,
        }
    }
}

impl BucketConfig {
    /// Boundaries must be finite and strictly increasing.
    pub fn validate(&self) -> Result<()> {
        let bounds = [self.small_min, self.mid_min, self.large_min];
        if bounds.iter().any(|b| !b.is_finite()) {
            return Err(Error::config("bucket boundaries must be finite"));
        }
        if !(self.small_min < self.mid_min && self.mid_min < self.large_min) {
            return Err(Error::config(format!(
                "bucket boundaries must increase: small_min={} mid_min={} large_min={}",
                self.small_min, self.mid_min, self.large_min
            )));
        }
        Ok(())
    }
}

/// Pagination configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Rows per page when a request does not specify one.
    pub page_size: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self { page_size: 50 }
    }
}

/// Display formatting configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Prefix for currency values (e.g., "A$").
    pub currency_prefix: String,
    /// Rendered in place of an absent metric.
    pub placeholder: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_prefix: "A$".to_string(),
            placeholder: "\u{2014}".to_string(),
        }
    }
}

/// Pair identifier configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PairConfig {
    /// Joins the two tickers of a pair identifier.
    pub separator: String,
    /// Size of the top-K subset used for pre-rendered comparison pages.
    pub top_k: usize,
}

impl Default for PairConfig {
    fn default() -> Self {
        Self {
            separator: "-vs-".to_string(),
            top_k: 10,
        }
    }
}

/// Autocomplete search configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of suggestions returned.
    pub suggestion_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            suggestion_limit: 8,
        }
    }
}
