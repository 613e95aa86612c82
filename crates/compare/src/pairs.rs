//! Unordered pair enumeration for pre-published comparison pages.
//!
//! The first ticker of a pair always precedes the second in catalog order,
//! so every pair has exactly one identifier, reproducible for a stable
//! catalog order. Parsing accepts only that canonical ordering.

use equity_catalog::Catalog;
use equity_core::{config::PairConfig, is_ticker_char, Error, Instrument, Result};
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Reverse;
use tracing::debug;

/// Two tickers in canonical order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PairId {
    /// Ticker earlier in catalog order.
    pub first: String,
    /// Ticker later in catalog order.
    pub second: String,
}

impl PairId {
    fn new(a: &Instrument, b: &Instrument) -> Self {
        Self {
            first: a.ticker.clone(),
            second: b.ticker.clone(),
        }
    }
}

/// Number of unordered pairs among `n` items.
#[inline]
pub fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// All i < j pairs over `items`, in traversal order.
fn pairs_of(items: &[&Instrument]) -> Vec<PairId> {
    let mut pairs = Vec::with_capacity(pair_count(items.len()));
    for (i, a) in items.iter().enumerate() {
        for b in &items[i + 1..] {
            pairs.push(PairId::new(a, b));
        }
    }
    pairs
}

/// Catalog positions of the `k` largest instruments, largest first.
fn ranked_positions(items: &[Instrument], k: usize) -> Vec<usize> {
    let mut ranked: Vec<usize> = (0..items.len()).collect();
    ranked.sort_by_cached_key(|&pos| {
        let inst = &items[pos];
        (Reverse(OrderedFloat(inst.market_cap_value())), inst.ticker.to_ascii_uppercase())
    });
    ranked.truncate(k);
    ranked
}

/// Generates and parses pair identifiers.
#[derive(Debug, Clone)]
pub struct PairEnumerator {
    /// Joins the two tickers of an identifier.
    separator: String,
    /// Subset size for [`featured_pairs`](Self::featured_pairs).
    top_k: usize,
}

impl PairEnumerator {
    /// Create an enumerator joining tickers with `separator`.
    ///
    /// The separator must contain a character that cannot occur in a ticker,
    /// otherwise identifiers could be split more than one way.
    pub fn new(separator: impl Into<String>, top_k: usize) -> Result<Self> {
        let separator = separator.into();
        if separator.is_empty() {
            return Err(Error::config("pair separator must not be empty"));
        }
        if separator.chars().all(is_ticker_char) {
            return Err(Error::config(format!(
                "pair separator {:?} must contain a character not allowed in tickers",
                separator
            )));
        }
        Ok(Self { separator, top_k })
    }

    /// Create an enumerator from configuration.
    pub fn from_config(config: &PairConfig) -> Result<Self> {
        Self::new(config.separator.clone(), config.top_k)
    }

    /// Separator in use.
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Render a pair identifier, e.g. `BHP-vs-CBA`.
    pub fn identifier(&self, pair: &PairId) -> String {
        format!("{}{}{}", pair.first, self.separator, pair.second)
    }

    /// Render a list of pairs.
    pub fn identifiers(&self, pairs: &[PairId]) -> Vec<String> {
        pairs.iter().map(|p| self.identifier(p)).collect()
    }

    /// Every unordered pair in catalog order: exactly n(n-1)/2 entries.
    pub fn all_pairs(&self, catalog: &Catalog) -> Vec<PairId> {
        let items: Vec<&Instrument> = catalog.iter().collect();
        let pairs = pairs_of(&items);
        debug!(instruments = items.len(), pairs = pairs.len(), "enumerated all pairs");
        pairs
    }

    /// Same result as [`all_pairs`](Self::all_pairs), with the outer index
    /// partitioned across rayon workers.
    pub fn par_all_pairs(&self, catalog: &Catalog) -> Vec<PairId> {
        let items = catalog.all();
        let pairs: Vec<PairId> = (0..items.len())
            .into_par_iter()
            .flat_map_iter(|i| {
                let a = &items[i];
                items[i + 1..].iter().map(move |b| PairId::new(a, b))
            })
            .collect();
        debug!(instruments = items.len(), pairs = pairs.len(), "enumerated all pairs in parallel");
        pairs
    }

    /// The `k` largest instruments by canonical market cap, largest first.
    ///
    /// Ties are broken by ticker ascending; `k` is clamped to the catalog size.
    pub fn top_k<'a>(&self, catalog: &'a Catalog, k: usize) -> Vec<&'a Instrument> {
        let items = catalog.all();
        ranked_positions(items, k)
            .into_iter()
            .map(|pos| &items[pos])
            .collect()
    }

    /// Every pair within the top-`k` subset.
    ///
    /// The subset is selected by rank but paired in catalog order, so each
    /// identifier is the same one [`all_pairs`](Self::all_pairs) produces.
    pub fn top_k_pairs(&self, catalog: &Catalog, k: usize) -> Vec<PairId> {
        let items = catalog.all();
        let mut positions = ranked_positions(items, k);
        positions.sort_unstable();
        let top: Vec<&Instrument> = positions.iter().map(|&pos| &items[pos]).collect();
        let pairs = pairs_of(&top);
        debug!(k, selected = top.len(), pairs = pairs.len(), "enumerated top-k pairs");
        pairs
    }

    /// Pairs among the configured top-K, used for pre-rendered pages.
    pub fn featured_pairs(&self, catalog: &Catalog) -> Vec<PairId> {
        self.top_k_pairs(catalog, self.top_k)
    }

    /// Resolve an identifier such as `bhp-VS-cba` to its two instruments.
    ///
    /// Fails with [`Error::InvalidPairId`] when the identifier does not split
    /// into two tickers, names the same instrument twice, or lists the
    /// tickers out of catalog order. Fails with [`Error::NotFound`] when
    /// either ticker is unknown.
    pub fn parse<'a>(
        &self,
        catalog: &'a Catalog,
        id: &str,
    ) -> Result<(&'a Instrument, &'a Instrument)> {
        let trimmed = id.trim();
        // ASCII lowercasing keeps byte offsets aligned with `trimmed`
        let pos = trimmed
            .to_ascii_lowercase()
            .find(&self.separator.to_ascii_lowercase())
            .ok_or_else(|| Error::invalid_pair_id(id))?;

        let first = &trimmed[..pos];
        let second = &trimmed[pos + self.separator.len()..];
        if first.is_empty() || second.is_empty() {
            return Err(Error::invalid_pair_id(id));
        }

        let i = catalog
            .position(first)
            .ok_or_else(|| Error::not_found(first.trim()))?;
        let j = catalog
            .position(second)
            .ok_or_else(|| Error::not_found(second.trim()))?;
        if i >= j {
            return Err(Error::invalid_pair_id(id));
        }
        let items = catalog.all();
        Ok((&items[i], &items[j]))
    }
}

impl Default for PairEnumerator {
    fn default() -> Self {
        let config = PairConfig::default();
        Self {
            separator: config.separator,
            top_k: config.top_k,
        }
    }
}
