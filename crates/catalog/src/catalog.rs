//! Immutable instrument catalog.
//!
//! Built once from an already-validated external dataset and shared by
//! reference afterwards. Insertion order is preserved because it is the
//! default display order before any sort is applied.

use equity_core::{try_parse_magnitude, Error, Instrument, Result};
use std::collections::{BTreeMap, HashMap};
use std::io::Read;
use tracing::{info, warn};

/// Statistics gathered while loading the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogStats {
    /// Number of instruments loaded.
    pub instruments: usize,
    /// Number of distinct sectors.
    pub sectors: usize,
    /// Records whose market cap could not be parsed (treated as zero).
    pub malformed_market_caps: usize,
}

/// Read-only collection of instruments keyed by ticker.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Records in dataset order.
    instruments: Vec<Instrument>,
    /// Uppercased ticker -> position in `instruments`.
    index: HashMap<String, usize>,
    /// Distinct sector labels, sorted case-insensitively.
    sectors: Vec<String>,
    /// Load statistics.
    stats: CatalogStats,
}

impl Catalog {
    /// Build a catalog, rejecting invalid records and duplicate tickers.
    pub fn load(records: Vec<Instrument>) -> Result<Self> {
        let mut index = HashMap::with_capacity(records.len());
        // Lowercased label -> first spelling seen
        let mut sectors = BTreeMap::new();
        let mut malformed = 0usize;

        for (pos, record) in records.iter().enumerate() {
            record.validate()?;

            let key = ticker_key(&record.ticker);
            if index.insert(key, pos).is_some() {
                return Err(Error::duplicate_ticker(record.ticker.trim()));
            }

            if let Err(err) = try_parse_magnitude(&record.market_cap) {
                malformed += 1;
                warn!(ticker = %record.ticker, error = %err, "market cap unparseable, treating as zero");
            }

            sectors
                .entry(record.sector.trim().to_lowercase())
                .or_insert_with(|| record.sector.clone());
        }

        let sectors: Vec<String> = sectors.into_values().collect();
        let stats = CatalogStats {
            instruments: records.len(),
            sectors: sectors.len(),
            malformed_market_caps: malformed,
        };

        info!(
            instruments = stats.instruments,
            sectors = stats.sectors,
            malformed_market_caps = stats.malformed_market_caps,
            "catalog loaded"
        );

        Ok(Self {
            instruments: records,
            index,
            sectors,
            stats,
        })
    }

    /// Build a catalog from a JSON array of dataset records.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let records: Vec<Instrument> = serde_json::from_str(json)?;
        Self::load(records)
    }

    /// Build a catalog from a reader yielding a JSON array of records.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let records: Vec<Instrument> = serde_json::from_reader(reader)?;
        Self::load(records)
    }

    /// Look up an instrument by ticker (case-insensitive).
    pub fn get(&self, ticker: &str) -> Option<&Instrument> {
        self.index
            .get(&ticker_key(ticker))
            .map(|&pos| &self.instruments[pos])
    }

    /// Look up an instrument, turning absence into [`Error::NotFound`].
    pub fn require(&self, ticker: &str) -> Result<&Instrument> {
        self.get(ticker).ok_or_else(|| Error::not_found(ticker.trim()))
    }

    /// Dataset position of `ticker` (case-insensitive).
    pub fn position(&self, ticker: &str) -> Option<usize> {
        self.index.get(&ticker_key(ticker)).copied()
    }

    /// Whether the catalog holds `ticker`.
    pub fn contains(&self, ticker: &str) -> bool {
        self.index.contains_key(&ticker_key(ticker))
    }

    /// Instruments in a sector (case-insensitive exact match), dataset order.
    pub fn by_sector(&self, label: &str) -> Vec<&Instrument> {
        let label = label.trim().to_lowercase();
        self.instruments
            .iter()
            .filter(|inst| inst.sector.to_lowercase() == label)
            .collect()
    }

    /// Instruments for a list of tickers, skipping unknown ones.
    pub fn featured(&self, tickers: &[&str]) -> Vec<&Instrument> {
        tickers.iter().filter_map(|t| self.get(t)).collect()
    }

    /// All instruments in dataset order.
    pub fn all(&self) -> &[Instrument] {
        &self.instruments
    }

    /// Iterate instruments in dataset order.
    pub fn iter(&self) -> std::slice::Iter<'_, Instrument> {
        self.instruments.iter()
    }

    /// Distinct sector labels, sorted case-insensitively.
    ///
    /// Labels differing only in case collapse to the first spelling seen.
    pub fn sectors(&self) -> &[String] {
        &self.sectors
    }

    /// Number of instruments.
    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    /// Load statistics.
    pub fn stats(&self) -> &CatalogStats {
        &self.stats
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Instrument;
    type IntoIter = std::slice::Iter<'a, Instrument>;

    fn into_iter(self) -> Self::IntoIter {
        self.instruments.iter()
    }
}

/// Normalized lookup key for a ticker.
#[inline]
fn ticker_key(ticker: &str) -> String {
    ticker.trim().to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make(ticker: &str, sector: &str, market_cap: &str) -> Instrument {
        Instrument::new(ticker, format!("{} Ltd", ticker), sector, market_cap, 10.0, 1.0)
    }

    fn sample() -> Catalog {
        Catalog::load(vec![
            make("WOW", "Consumer Staples", "A$40B"),
            make("BHP", "Materials", "A$220B"),
            make("CSL", "Health Care", "A$140B"),
            make("RIO", "Materials", "A$180B"),
        ])
        .unwrap()
    }

    #[test]
    fn test_get_case_insensitive() {
        let catalog = sample();
        assert_eq!(catalog.get("bhp").map(|i| i.ticker.as_str()), Some("BHP"));
        assert_eq!(catalog.get(" Csl ").map(|i| i.ticker.as_str()), Some("CSL"));
        assert!(catalog.get("XYZ").is_none());
        assert!(matches!(catalog.require("XYZ"), Err(Error::NotFound(t)) if t == "XYZ"));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let catalog = sample();
        let tickers: Vec<&str> = catalog.all().iter().map(|i| i.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["WOW", "BHP", "CSL", "RIO"]);
    }

    #[test]
    fn test_by_sector() {
        let catalog = sample();
        let materials: Vec<&str> = catalog
            .by_sector("MATERIALS")
            .iter()
            .map(|i| i.ticker.as_str())
            .collect();
        assert_eq!(materials, vec!["BHP", "RIO"]);
        assert!(catalog.by_sector("Energy").is_empty());
    }

    #[test]
    fn test_sectors_sorted_and_distinct() {
        let catalog = sample();
        assert_eq!(
            catalog.sectors(),
            &["Consumer Staples", "Health Care", "Materials"]
        );
    }

    #[test]
    fn test_sectors_collapse_case_variants() {
        let catalog = Catalog::load(vec![
            make("BHP", "Materials", "A$220B"),
            make("RIO", "materials", "A$180B"),
            make("CSL", "Health Care", "A$140B"),
        ])
        .unwrap();
        assert_eq!(catalog.sectors(), &["Health Care", "Materials"]);
        assert_eq!(catalog.stats().sectors, 2);
        assert_eq!(catalog.by_sector("materials").len(), 2);
    }

    #[test]
    fn test_position() {
        let catalog = sample();
        assert_eq!(catalog.position("WOW"), Some(0));
        assert_eq!(catalog.position("rio"), Some(3));
        assert_eq!(catalog.position("XYZ"), None);
    }

    #[test]
    fn test_duplicate_ticker_rejected() {
        let result = Catalog::load(vec![
            make("BHP", "Materials", "A$220B"),
            make("bhp", "Materials", "A$1B"),
        ]);
        assert!(matches!(result, Err(Error::DuplicateTicker(t)) if t == "bhp"));
    }

    #[test]
    fn test_missing_field_rejected() {
        let result = Catalog::load(vec![make("BHP", "", "A$220B")]);
        assert!(matches!(result, Err(Error::MissingField { field: "sector", .. })));
    }

    #[test]
    fn test_malformed_market_cap_is_counted_not_fatal() {
        let catalog = Catalog::load(vec![
            make("BHP", "Materials", "A$220B"),
            make("XYZ", "Materials", "n/a"),
        ])
        .unwrap();
        assert_eq!(catalog.stats().malformed_market_caps, 1);
        assert_eq!(catalog.get("XYZ").unwrap().market_cap_value(), 0.0);
    }

    #[test]
    fn test_featured_skips_unknown() {
        let catalog = sample();
        let featured: Vec<&str> = catalog
            .featured(&["RIO", "NOPE", "wow"])
            .iter()
            .map(|i| i.ticker.as_str())
            .collect();
        assert_eq!(featured, vec!["RIO", "WOW"]);
    }

    #[test]
    fn test_from_json_str() {
        let json = r#"[
            {"ticker": "BHP", "name": "BHP Group", "sector": "Materials",
             "marketCap": "A$220B", "price": 45.5, "performance1y": 12.3},
            {"ticker": "CBA", "name": "Commonwealth Bank", "sector": "Financials",
             "marketCap": "A$180B", "price": 110.2, "performance1y": 8.1, "volume": 2500000}
        ]"#;
        let catalog = Catalog::from_json_str(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("cba").unwrap().metrics.volume.value(), Some(2_500_000.0));
        assert_eq!(catalog.stats().sectors, 2);
    }

    #[test]
    fn test_from_json_missing_required_field() {
        let json = r#"[{"ticker": "BHP", "name": "BHP Group", "sector": "Materials", "price": 45.5, "performance1y": 1.0}]"#;
        assert!(matches!(Catalog::from_json_str(json), Err(Error::Json(_))));
    }

    #[test]
    fn test_from_reader() {
        let json = br#"[{"ticker": "BHP", "name": "BHP Group", "sector": "Materials",
                         "marketCap": "A$220B", "price": 45.5, "performance1y": 12.3}]"#;
        let catalog = Catalog::from_reader(&json[..]).unwrap();
        assert!(catalog.contains("bhp"));
    }
}
