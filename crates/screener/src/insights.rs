//! Derived listings for profile and sector pages.
//!
//! Leaderboards, per-sector summaries, related instruments and autocomplete
//! suggestions. Everything here is built from the filter and sort engines.

use equity_catalog::Catalog;
use equity_core::{sector_slug, Instrument};
use serde::Serialize;

use crate::filter::text_matches;
use crate::sort::{sort, SortDirection, SortKey, SortSpec};

/// Summary of one sector.
#[derive(Debug, Clone, Serialize)]
pub struct SectorSummary<'a> {
    /// Sector label as it appears in the dataset.
    pub name: String,
    /// URL slug.
    pub slug: String,
    /// Number of instruments in the sector.
    pub count: usize,
    /// Best one-year performer.
    pub best: Option<&'a Instrument>,
    /// Worst one-year performer.
    pub worst: Option<&'a Instrument>,
}

fn by_performance<'a>(items: &[&'a Instrument], direction: SortDirection) -> Vec<&'a Instrument> {
    sort(items, &SortSpec::new(SortKey::Performance1y, direction))
}

/// Best one-year performers across the catalog.
pub fn top_performers(catalog: &Catalog, limit: usize) -> Vec<&Instrument> {
    let all: Vec<&Instrument> = catalog.iter().collect();
    let mut ranked = by_performance(&all, SortDirection::Descending);
    ranked.truncate(limit);
    ranked
}

/// Worst one-year performers across the catalog.
pub fn worst_performers(catalog: &Catalog, limit: usize) -> Vec<&Instrument> {
    let all: Vec<&Instrument> = catalog.iter().collect();
    let mut ranked = by_performance(&all, SortDirection::Ascending);
    ranked.truncate(limit);
    ranked
}

/// Summary for one sector, or `None` if no instrument carries the label.
pub fn sector_summary<'a>(catalog: &'a Catalog, label: &str) -> Option<SectorSummary<'a>> {
    let members = catalog.by_sector(label);
    let first = members.first()?;
    let ranked = by_performance(&members, SortDirection::Descending);

    Some(SectorSummary {
        name: first.sector.clone(),
        slug: sector_slug(&first.sector),
        count: members.len(),
        best: ranked.first().copied(),
        worst: ranked.last().copied(),
    })
}

/// Summaries for every sector, in sorted sector order.
pub fn sector_summaries(catalog: &Catalog) -> Vec<SectorSummary<'_>> {
    catalog
        .sectors()
        .iter()
        .filter_map(|label| sector_summary(catalog, label))
        .collect()
}

/// Other instruments in the same sector as `ticker`, dataset order.
pub fn related<'a>(catalog: &'a Catalog, ticker: &str, limit: usize) -> Vec<&'a Instrument> {
    let Some(instrument) = catalog.get(ticker) else {
        return Vec::new();
    };
    catalog
        .by_sector(&instrument.sector)
        .into_iter()
        .filter(|other| !other.ticker.eq_ignore_ascii_case(&instrument.ticker))
        .take(limit)
        .collect()
}

/// Autocomplete matches on ticker or name, dataset order.
///
/// An empty query suggests nothing.
pub fn suggest<'a>(catalog: &'a Catalog, query: &str, limit: usize) -> Vec<&'a Instrument> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    catalog
        .iter()
        .filter(|inst| text_matches(inst, query))
        .take(limit)
        .collect()
}
