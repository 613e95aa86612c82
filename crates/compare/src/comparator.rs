//! Head-to-head comparison of two instruments.
//!
//! Produces a fixed sequence of metric rows with a per-row verdict. Row order
//! never depends on the caller, and swapping the inputs mirrors every verdict.

use equity_catalog::Catalog;
use equity_core::{config::DisplayConfig, Error, Instrument, Metric, Result, Verdict};
use serde::Serialize;

use crate::format::Formatter;

/// Metrics compared, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricKind {
    /// Share price; informational.
    SharePrice,
    /// Market cap; larger wins.
    MarketCap,
    /// Daily change; larger wins.
    DailyChange,
    /// One-year performance; larger wins.
    Performance1y,
    /// Traded volume; larger wins.
    Volume,
    /// 52-week high; informational.
    High52w,
    /// 52-week low; informational.
    Low52w,
    /// Price/earnings; lower positive wins.
    PeRatio,
    /// Dividend yield; larger wins.
    DividendYield,
    /// Earnings per share; larger wins.
    Eps,
}

impl MetricKind {
    /// Every metric in row order.
    pub const ORDER: [MetricKind; 10] = [
        MetricKind::SharePrice,
        MetricKind::MarketCap,
        MetricKind::DailyChange,
        MetricKind::Performance1y,
        MetricKind::Volume,
        MetricKind::High52w,
        MetricKind::Low52w,
        MetricKind::PeRatio,
        MetricKind::DividendYield,
        MetricKind::Eps,
    ];

    /// Row label.
    pub fn label(self) -> &'static str {
        match self {
            MetricKind::SharePrice => "Share Price",
            MetricKind::MarketCap => "Market Cap",
            MetricKind::DailyChange => "Daily Change",
            MetricKind::Performance1y => "1Y Performance",
            MetricKind::Volume => "Volume",
            MetricKind::High52w => "52W High",
            MetricKind::Low52w => "52W Low",
            MetricKind::PeRatio => "P/E Ratio",
            MetricKind::DividendYield => "Dividend Yield",
            MetricKind::Eps => "EPS",
        }
    }
}

/// One metric of a comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    /// Metric compared.
    pub metric: MetricKind,
    /// Display label.
    pub label: &'static str,
    /// Formatted value for the first instrument.
    pub value_a: String,
    /// Formatted value for the second instrument.
    pub value_b: String,
    /// Which side is better on this metric.
    pub verdict: Verdict,
}

/// Win counts across a comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tally {
    /// Rows won by the first instrument.
    pub a_wins: usize,
    /// Rows won by the second instrument.
    pub b_wins: usize,
    /// Rows with no winner.
    pub ties: usize,
}

impl Tally {
    /// Count verdicts over `rows`.
    pub fn from_rows(rows: &[ComparisonRow]) -> Self {
        rows.iter().fold(Tally::default(), |mut tally, row| {
            match row.verdict {
                Verdict::A => tally.a_wins += 1,
                Verdict::B => tally.b_wins += 1,
                Verdict::Tie => tally.ties += 1,
            }
            tally
        })
    }
}

/// Both values present: strictly larger wins. Otherwise tie.
fn larger_if_both(a: Metric, b: Metric) -> Verdict {
    match (a.value(), b.value()) {
        (Some(a), Some(b)) => Verdict::larger_wins(a, b),
        _ => Verdict::Tie,
    }
}

/// Both ratios present and positive: lower wins. Otherwise tie.
fn lower_positive_pe(a: Metric, b: Metric) -> Verdict {
    match (a.value(), b.value()) {
        (Some(a), Some(b)) if a > 0.0 && b > 0.0 => Verdict::larger_wins(b, a),
        _ => Verdict::Tie,
    }
}

/// Pairwise comparator.
#[derive(Debug, Clone, Default)]
pub struct Comparator {
    formatter: Formatter,
}

impl Comparator {
    /// Create a comparator using the given display settings.
    pub fn new(display: DisplayConfig) -> Self {
        Self {
            formatter: Formatter::new(display),
        }
    }

    /// Compare two instruments, one row per [`MetricKind::ORDER`] entry.
    pub fn compare(&self, a: &Instrument, b: &Instrument) -> Vec<ComparisonRow> {
        MetricKind::ORDER
            .iter()
            .map(|&metric| self.row(metric, a, b))
            .collect()
    }

    /// Resolve two tickers and compare them.
    ///
    /// Fails with [`Error::NotFound`] for an unknown ticker and
    /// [`Error::SelfComparison`] when both name the same instrument.
    pub fn compare_tickers(
        &self,
        catalog: &Catalog,
        first: &str,
        second: &str,
    ) -> Result<Vec<ComparisonRow>> {
        let a = catalog.require(first)?;
        let b = catalog.require(second)?;
        if a.ticker == b.ticker {
            return Err(Error::SelfComparison(a.ticker.clone()));
        }
        Ok(self.compare(a, b))
    }

    fn row(&self, metric: MetricKind, a: &Instrument, b: &Instrument) -> ComparisonRow {
        let fmt = &self.formatter;
        let (ma, mb) = (&a.metrics, &b.metrics);

        let (value_a, value_b, verdict) = match metric {
            MetricKind::SharePrice => (
                fmt.currency(a.price, 2),
                fmt.currency(b.price, 2),
                Verdict::Tie,
            ),
            MetricKind::MarketCap => (
                a.market_cap.clone(),
                b.market_cap.clone(),
                Verdict::larger_wins(a.market_cap_value(), b.market_cap_value()),
            ),
            MetricKind::DailyChange => (
                fmt.optional(ma.daily_change, |f, v| f.signed_percent(v, 2)),
                fmt.optional(mb.daily_change, |f, v| f.signed_percent(v, 2)),
                larger_if_both(ma.daily_change, mb.daily_change),
            ),
            MetricKind::Performance1y => (
                fmt.signed_percent(a.performance_1y, 1),
                fmt.signed_percent(b.performance_1y, 1),
                Verdict::larger_wins(a.performance_1y, b.performance_1y),
            ),
            MetricKind::Volume => (
                fmt.optional(ma.volume, Formatter::volume),
                fmt.optional(mb.volume, Formatter::volume),
                larger_if_both(ma.volume, mb.volume),
            ),
            MetricKind::High52w => (
                fmt.optional(ma.high_52w, |f, v| f.currency(v, 2)),
                fmt.optional(mb.high_52w, |f, v| f.currency(v, 2)),
                Verdict::Tie,
            ),
            MetricKind::Low52w => (
                fmt.optional(ma.low_52w, |f, v| f.currency(v, 2)),
                fmt.optional(mb.low_52w, |f, v| f.currency(v, 2)),
                Verdict::Tie,
            ),
            MetricKind::PeRatio => (
                fmt.optional(ma.pe_ratio, |f, v| f.decimal(v, 2)),
                fmt.optional(mb.pe_ratio, |f, v| f.decimal(v, 2)),
                lower_positive_pe(ma.pe_ratio, mb.pe_ratio),
            ),
            MetricKind::DividendYield => (
                fmt.optional(ma.dividend_yield, |f, v| f.percent(v, 2)),
                fmt.optional(mb.dividend_yield, |f, v| f.percent(v, 2)),
                larger_if_both(ma.dividend_yield, mb.dividend_yield),
            ),
            MetricKind::Eps => (
                fmt.optional(ma.eps, |f, v| f.currency(v, 4)),
                fmt.optional(mb.eps, |f, v| f.currency(v, 4)),
                larger_if_both(ma.eps, mb.eps),
            ),
        };

        ComparisonRow {
            metric,
            label: metric.label(),
            value_a,
            value_b,
            verdict,
        }
    }
}
