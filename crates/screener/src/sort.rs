//! Stable, direction-aware ordering of screening results.

use equity_core::Instrument;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Column to sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Ticker symbol, case-insensitive.
    Ticker,
    /// Company name, case-insensitive.
    Name,
    /// Sector label, case-insensitive.
    Sector,
    /// Share price.
    Price,
    /// Daily percentage change; absent orders as zero.
    DailyChange,
    /// Traded volume; absent orders as zero.
    Volume,
    /// Canonical market cap.
    MarketCap,
    /// One-year performance.
    Performance1y,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    /// Smallest first.
    #[serde(rename = "asc")]
    Ascending,
    /// Largest first.
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Apply this direction to an ascending ordering.
    #[inline]
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Sort key plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    /// Best one-year performers first.
    fn default() -> Self {
        Self {
            key: SortKey::Performance1y,
            direction: SortDirection::Descending,
        }
    }
}

impl SortSpec {
    /// Create a sort spec.
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Column-header click: same key flips direction, new key sorts descending.
    pub fn toggle(self, key: SortKey) -> Self {
        if self.key == key {
            Self::new(key, self.direction.flipped())
        } else {
            Self::new(key, SortDirection::Descending)
        }
    }
}

/// Precomputed comparison value for one instrument.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum SortValue {
    Text(String),
    Number(OrderedFloat<f64>),
}

impl SortKey {
    /// Ordering value of `instrument` under this key.
    ///
    /// Absent daily change and volume order as zero; market cap orders by
    /// its canonical value.
    fn value(self, instrument: &Instrument) -> SortValue {
        match self {
            SortKey::Ticker => SortValue::Text(instrument.ticker.to_lowercase()),
            SortKey::Name => SortValue::Text(instrument.name.to_lowercase()),
            SortKey::Sector => SortValue::Text(instrument.sector.to_lowercase()),
            SortKey::Price => SortValue::Number(OrderedFloat(instrument.price)),
            SortKey::DailyChange => {
                SortValue::Number(OrderedFloat(instrument.metrics.daily_change.ordering_value()))
            }
            SortKey::Volume => {
                SortValue::Number(OrderedFloat(instrument.metrics.volume.ordering_value()))
            }
            SortKey::MarketCap => SortValue::Number(OrderedFloat(instrument.market_cap_value())),
            SortKey::Performance1y => SortValue::Number(OrderedFloat(instrument.performance_1y)),
        }
    }
}

/// Sort a slice of instruments in place.
///
/// The sort is stable in both directions: descending reverses the
/// comparator, so equal keys keep their prior relative order.
pub fn sort_in_place(items: &mut [&Instrument], spec: &SortSpec) {
    let mut keyed: Vec<(SortValue, &Instrument)> = items
        .iter()
        .map(|inst| (spec.key.value(inst), *inst))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| spec.direction.apply(a.cmp(b)));

    for (slot, (_, inst)) in items.iter_mut().zip(keyed) {
        *slot = inst;
    }
}

/// Return a sorted copy of `items`.
pub fn sort<'a>(items: &[&'a Instrument], spec: &SortSpec) -> Vec<&'a Instrument> {
    let mut sorted = items.to_vec();
    sort_in_place(&mut sorted, spec);
    sorted
}
