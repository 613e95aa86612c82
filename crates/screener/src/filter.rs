//! Conjunctive predicate filtering over the catalog.

use equity_catalog::Catalog;
use equity_core::{config::BucketConfig, Instrument, MarketCapBucket};
use serde::{Deserialize, Serialize};

/// Sector criterion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SectorFilter {
    /// Match every sector.
    #[default]
    All,
    /// Case-insensitive exact match on a sector label.
    Named(String),
}

impl SectorFilter {
    /// Parse a filter value; "all" (any case) or an empty string matches everything.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            SectorFilter::All
        } else {
            SectorFilter::Named(value.to_string())
        }
    }

    /// Whether `sector` satisfies this criterion.
    pub fn matches(&self, sector: &str) -> bool {
        match self {
            SectorFilter::All => true,
            SectorFilter::Named(label) => sector.to_lowercase() == label.to_lowercase(),
        }
    }
}

impl From<String> for SectorFilter {
    fn from(value: String) -> Self {
        SectorFilter::parse(&value)
    }
}

impl From<SectorFilter> for String {
    fn from(value: SectorFilter) -> Self {
        match value {
            SectorFilter::All => "all".to_string(),
            SectorFilter::Named(label) => label,
        }
    }
}

/// Screening criteria. All criteria must hold for an instrument to match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    /// Sector restriction.
    pub sector: SectorFilter,
    /// Market-cap bucket; `None` matches every bucket.
    pub bucket: Option<MarketCapBucket>,
    /// Free-text search over ticker and name.
    pub query: String,
}

impl FilterCriteria {
    /// Criteria matching only `sector`.
    pub fn sector(label: &str) -> Self {
        Self {
            sector: SectorFilter::parse(label),
            ..Self::default()
        }
    }

    /// Criteria matching only `bucket`.
    pub fn bucket(bucket: MarketCapBucket) -> Self {
        Self {
            bucket: Some(bucket),
            ..Self::default()
        }
    }

    /// Criteria matching only the free-text `query`.
    pub fn query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }
}

/// Evaluates [`FilterCriteria`] against instruments.
#[derive(Debug, Clone, Default)]
pub struct FilterEngine {
    buckets: BucketConfig,
}

impl FilterEngine {
    /// Create a filter engine with the given bucket boundaries.
    pub fn new(buckets: BucketConfig) -> Self {
        Self { buckets }
    }

    /// Bucket boundaries in use.
    pub fn buckets(&self) -> &BucketConfig {
        &self.buckets
    }

    /// Whether a single instrument satisfies every criterion.
    pub fn matches(&self, instrument: &Instrument, criteria: &FilterCriteria) -> bool {
        criteria.sector.matches(&instrument.sector)
            && criteria
                .bucket
                .map_or(true, |b| b.contains(instrument.market_cap_value(), &self.buckets))
            && text_matches(instrument, &criteria.query)
    }

    /// Matching instruments in catalog order.
    pub fn apply<'a>(&self, catalog: &'a Catalog, criteria: &FilterCriteria) -> Vec<&'a Instrument> {
        catalog
            .iter()
            .filter(|inst| self.matches(inst, criteria))
            .collect()
    }
}

/// Trimmed, case-insensitive substring match on ticker or name.
pub fn text_matches(instrument: &Instrument, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }
    let query = query.to_lowercase();
    instrument.ticker.to_lowercase().contains(&query)
        || instrument.name.to_lowercase().contains(&query)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make(ticker: &str, name: &str, sector: &str, market_cap: &str) -> Instrument {
        Instrument::new(ticker, name, sector, market_cap, 10.0, 0.0)
    }

    fn sample() -> Catalog {
        Catalog::load(vec![
            make("BHP", "BHP Group", "Materials", "A$220B"),
            make("CBA", "Commonwealth Bank", "Financials", "A$180B"),
            make("LRG", "Boundary Large", "Materials", "A$10.00001B"),
            make("MDT", "Boundary Mid Top", "Industrials", "A$10B"),
            make("MDB", "Boundary Mid Bottom", "Industrials", "A$500M"),
            make("SMT", "Boundary Small Top", "Energy", "A$499.99M"),
            make("SMB", "Boundary Small Bottom", "Energy", "A$50M"),
            make("MIC", "Boundary Micro", "Energy", "A$49.99M"),
            make("JUNK", "Unparseable Cap", "Energy", "unknown"),
        ])
        .unwrap()
    }

    fn tickers(items: &[&Instrument]) -> Vec<String> {
        items.iter().map(|i| i.ticker.clone()).collect()
    }

    #[test]
    fn test_sector_filter() {
        let catalog = sample();
        let engine = FilterEngine::default();

        let result = engine.apply(&catalog, &FilterCriteria::sector("materials"));
        assert_eq!(tickers(&result), vec!["BHP", "LRG"]);

        let all = engine.apply(&catalog, &FilterCriteria::sector("All"));
        assert_eq!(all.len(), catalog.len());

        assert!(engine.apply(&catalog, &FilterCriteria::sector("Utilities")).is_empty());
    }

    #[test]
    fn test_bucket_boundaries() {
        let catalog = sample();
        let engine = FilterEngine::default();

        let large = engine.apply(&catalog, &FilterCriteria::bucket(MarketCapBucket::Large));
        assert_eq!(tickers(&large), vec!["BHP", "CBA", "LRG"]);

        let mid = engine.apply(&catalog, &FilterCriteria::bucket(MarketCapBucket::Mid));
        assert_eq!(tickers(&mid), vec!["MDT", "MDB"]);

        let small = engine.apply(&catalog, &FilterCriteria::bucket(MarketCapBucket::Small));
        assert_eq!(tickers(&small), vec!["SMT", "SMB"]);

        let micro = engine.apply(&catalog, &FilterCriteria::bucket(MarketCapBucket::Micro));
        assert_eq!(tickers(&micro), vec!["MIC", "JUNK"]);
    }

    #[test]
    fn test_bucket_survivors_within_bounds() {
        let catalog = sample();
        let engine = FilterEngine::default();
        let bounds = engine.buckets().clone();

        for bucket in MarketCapBucket::ALL {
            for inst in engine.apply(&catalog, &FilterCriteria::bucket(bucket)) {
                let value = inst.market_cap_value();
                let within = match bucket {
                    MarketCapBucket::Large => value > bounds.large_min,
                    MarketCapBucket::Mid => value >= bounds.mid_min && value <= bounds.large_min,
                    MarketCapBucket::Small => value >= bounds.small_min && value < bounds.mid_min,
                    MarketCapBucket::Micro => value < bounds.small_min,
                };
                assert!(within, "{} ({}) outside {}", inst.ticker, value, bucket);
            }
        }
    }

    #[test]
    fn test_text_search() {
        let catalog = sample();
        let engine = FilterEngine::default();

        let by_ticker = engine.apply(&catalog, &FilterCriteria::query("  cba "));
        assert_eq!(tickers(&by_ticker), vec!["CBA"]);

        let by_name = engine.apply(&catalog, &FilterCriteria::query("BOUNDARY MID"));
        assert_eq!(tickers(&by_name), vec!["MDT", "MDB"]);

        let empty = engine.apply(&catalog, &FilterCriteria::query("   "));
        assert_eq!(empty.len(), catalog.len());
    }

    #[test]
    fn test_criteria_are_conjunctive() {
        let catalog = sample();
        let engine = FilterEngine::default();
        let criteria = FilterCriteria {
            sector: SectorFilter::parse("Energy"),
            bucket: Some(MarketCapBucket::Small),
            query: "top".to_string(),
        };
        assert_eq!(tickers(&engine.apply(&catalog, &criteria)), vec!["SMT"]);
    }

    #[test]
    fn test_criteria_deserialize() {
        let criteria: FilterCriteria =
            serde_json::from_str(r#"{"sector": "all", "bucket": "mid", "query": "bank"}"#).unwrap();
        assert_eq!(criteria.sector, SectorFilter::All);
        assert_eq!(criteria.bucket, Some(MarketCapBucket::Mid));

        let defaults: FilterCriteria = serde_json::from_str("{}").unwrap();
        assert_eq!(defaults, FilterCriteria::default());
    }
}
