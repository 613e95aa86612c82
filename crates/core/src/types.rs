//! Core data types for the equity screening engine.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::BucketConfig;
use crate::error::{Error, Result};
use crate::magnitude::parse_magnitude;

/// An optional numeric metric.
///
/// Absence is distinct from zero: a daily change of `0.0` is a real value.
/// Callers pick one of two explicit conversions: [`Metric::value`] for
/// display and verdicts, [`Metric::ordering_value`] for sorting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metric(Option<f64>);

impl Metric {
    /// A metric with no value.
    #[inline]
    pub const fn unset() -> Self {
        Metric(None)
    }

    /// A metric holding `value`.
    #[inline]
    pub const fn set(value: f64) -> Self {
        Metric(Some(value))
    }

    /// The raw value, if present.
    #[inline]
    pub fn value(self) -> Option<f64> {
        self.0
    }

    /// Whether a value is present.
    #[inline]
    pub fn is_set(self) -> bool {
        self.0.is_some()
    }

    /// Value used purely for ordering: absent sorts as `0.0`.
    #[inline]
    pub fn ordering_value(self) -> f64 {
        self.0.unwrap_or(0.0)
    }
}

impl From<Option<f64>> for Metric {
    fn from(value: Option<f64>) -> Self {
        Metric(value)
    }
}

impl From<f64> for Metric {
    fn from(value: f64) -> Self {
        Metric(Some(value))
    }
}

/// Secondary metrics, any of which may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SecondaryMetrics {
    /// Daily percentage change.
    pub daily_change: Metric,
    /// Traded volume (shares).
    pub volume: Metric,
    /// 52-week high price.
    #[serde(rename = "high52")]
    pub high_52w: Metric,
    /// 52-week low price.
    #[serde(rename = "low52")]
    pub low_52w: Metric,
    /// Price/earnings ratio.
    pub pe_ratio: Metric,
    /// Dividend yield percentage.
    pub dividend_yield: Metric,
    /// Earnings per share.
    pub eps: Metric,
}

/// A single listed equity.
///
/// Field names follow the external dataset (`marketCap`, `performance1y`, ...);
/// other dataset fields such as descriptions and FAQs are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    /// Ticker symbol (case-insensitive identity).
    pub ticker: String,
    /// Display name.
    pub name: String,
    /// Sector label.
    pub sector: String,
    /// Market capitalisation in compact notation, e.g. "A$220B".
    pub market_cap: String,
    /// Share price.
    pub price: f64,
    /// One-year performance, percent.
    #[serde(rename = "performance1y")]
    pub performance_1y: f64,
    /// Optional secondary metrics.
    #[serde(flatten)]
    pub metrics: SecondaryMetrics,
}

impl Instrument {
    /// Create an instrument with no secondary metrics.
    pub fn new(
        ticker: impl Into<String>,
        name: impl Into<String>,
        sector: impl Into<String>,
        market_cap: impl Into<String>,
        price: f64,
        performance_1y: f64,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            name: name.into(),
            sector: sector.into(),
            market_cap: market_cap.into(),
            price,
            performance_1y,
            metrics: SecondaryMetrics::default(),
        }
    }

    /// Attach secondary metrics.
    pub fn with_metrics(mut self, metrics: SecondaryMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Canonical market cap in millions (0 when the string is malformed).
    #[inline]
    pub fn market_cap_value(&self) -> f64 {
        parse_magnitude(&self.market_cap)
    }

    /// Check record invariants.
    pub fn validate(&self) -> Result<()> {
        let ticker = self.ticker.trim();
        if ticker.is_empty() {
            return Err(Error::missing_field(self.name.as_str(), "ticker"));
        }
        if let Some(ch) = ticker.chars().find(|c| !is_ticker_char(*c)) {
            return Err(Error::invalid_record(format!(
                "ticker {:?} contains invalid character {:?}",
                self.ticker, ch
            )));
        }
        if self.name.trim().is_empty() {
            return Err(Error::missing_field(ticker, "name"));
        }
        if self.sector.trim().is_empty() {
            return Err(Error::missing_field(ticker, "sector"));
        }
        if self.market_cap.trim().is_empty() {
            return Err(Error::missing_field(ticker, "marketCap"));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(Error::invalid_record(format!(
                "{} has invalid price {}",
                ticker, self.price
            )));
        }
        if !self.performance_1y.is_finite() {
            return Err(Error::invalid_record(format!(
                "{} has non-finite performance",
                ticker
            )));
        }
        Ok(())
    }
}

/// Characters allowed in a ticker symbol.
#[inline]
pub fn is_ticker_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '.'
}

/// URL slug for a sector label.
pub fn sector_slug(label: &str) -> String {
    label.to_lowercase()
}

/// Named market-cap range used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketCapBucket {
    /// Above `large_min`.
    Large,
    /// `[mid_min, large_min]`.
    Mid,
    /// `[small_min, mid_min)`.
    Small,
    /// Below `small_min`.
    Micro,
}

impl MarketCapBucket {
    /// All buckets, largest first.
    pub const ALL: [MarketCapBucket; 4] = [
        MarketCapBucket::Large,
        MarketCapBucket::Mid,
        MarketCapBucket::Small,
        MarketCapBucket::Micro,
    ];

    /// Bucket for a canonical market cap value.
    pub fn classify(value: f64, bounds: &BucketConfig) -> Self {
        if value > bounds.large_min {
            MarketCapBucket::Large
        } else if value >= bounds.mid_min {
            MarketCapBucket::Mid
        } else if value >= bounds.small_min {
            MarketCapBucket::Small
        } else {
            MarketCapBucket::Micro
        }
    }

    /// Whether a canonical value falls inside this bucket.
    #[inline]
    pub fn contains(self, value: f64, bounds: &BucketConfig) -> bool {
        Self::classify(value, bounds) == self
    }

    /// Parse a filter value ("large", "Mid", ...).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "large" => Some(MarketCapBucket::Large),
            "mid" => Some(MarketCapBucket::Mid),
            "small" => Some(MarketCapBucket::Small),
            "micro" => Some(MarketCapBucket::Micro),
            _ => None,
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            MarketCapBucket::Large => "Large",
            MarketCapBucket::Mid => "Mid",
            MarketCapBucket::Small => "Small",
            MarketCapBucket::Micro => "Micro",
        }
    }
}

impl fmt::Display for MarketCapBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-metric outcome of a pairwise comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// The first instrument is better on this metric.
    A,
    /// The second instrument is better on this metric.
    B,
    /// Neither side wins.
    Tie,
}

impl Verdict {
    /// The verdict with sides swapped.
    #[inline]
    pub fn mirrored(self) -> Self {
        match self {
            Verdict::A => Verdict::B,
            Verdict::B => Verdict::A,
            Verdict::Tie => Verdict::Tie,
        }
    }

    /// Verdict favouring the strictly larger value.
    pub fn larger_wins(a: f64, b: f64) -> Self {
        if a > b {
            Verdict::A
        } else if a < b {
            Verdict::B
        } else {
            Verdict::Tie
        }
    }
}
