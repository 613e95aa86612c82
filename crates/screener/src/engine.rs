//! Screening engine.
//!
//! Runs Filter -> Sort -> Paginate for a single explicit request. A UI layer
//! keeps a [`ScreenRequest`] as its state and re-issues it on every change.

use equity_catalog::Catalog;
use equity_core::{Config, Instrument, MarketCapBucket};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    filter::{FilterCriteria, FilterEngine, SectorFilter},
    insights,
    paginate::{paginate, Page},
    sort::{sort_in_place, SortKey, SortSpec},
};

/// Complete state of a screening table view.
///
/// Setters that change filtering or ordering reset `page` to 1, since the
/// old position no longer refers to the same rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScreenRequest {
    /// Filter criteria.
    pub criteria: FilterCriteria,
    /// Ordering.
    pub sort: SortSpec,
    /// Requested 1-indexed page.
    pub page: usize,
    /// Page size override; the configured default applies when `None`.
    pub page_size: Option<usize>,
}

impl Default for ScreenRequest {
    fn default() -> Self {
        Self {
            criteria: FilterCriteria::default(),
            sort: SortSpec::default(),
            page: 1,
            page_size: None,
        }
    }
}

impl ScreenRequest {
    /// Change the sector filter.
    pub fn set_sector(&mut self, sector: &str) {
        self.criteria.sector = SectorFilter::parse(sector);
        self.page = 1;
    }

    /// Change the market-cap bucket filter.
    pub fn set_bucket(&mut self, bucket: Option<MarketCapBucket>) {
        self.criteria.bucket = bucket;
        self.page = 1;
    }

    /// Change the free-text query.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.criteria.query = query.into();
        self.page = 1;
    }

    /// Replace the sort spec.
    pub fn set_sort(&mut self, sort: SortSpec) {
        self.sort = sort;
        self.page = 1;
    }

    /// Column-header click on `key`.
    pub fn toggle_sort(&mut self, key: SortKey) {
        self.set_sort(self.sort.toggle(key));
    }

    /// Move to another page.
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }
}

/// Result of running a [`ScreenRequest`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenResult<'a> {
    /// The requested page of sorted matches.
    pub page: Page<&'a Instrument>,
    /// Number of instruments matching the filter.
    pub total_matches: usize,
}

/// Screening engine over a loaded catalog.
pub struct Screener<'a> {
    /// Catalog being screened.
    catalog: &'a Catalog,
    /// Filter evaluator.
    filter: FilterEngine,
    /// Default page size.
    page_size: usize,
    /// Maximum autocomplete suggestions.
    suggestion_limit: usize,
}

impl<'a> Screener<'a> {
    /// Create a screener from configuration.
    pub fn new(catalog: &'a Catalog, config: &Config) -> Self {
        Self {
            catalog,
            filter: FilterEngine::new(config.buckets.clone()),
            page_size: config.pagination.page_size,
            suggestion_limit: config.search.suggestion_limit,
        }
    }

    /// Catalog being screened.
    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Filter and sort without paginating.
    pub fn matches(&self, criteria: &FilterCriteria, sort: &SortSpec) -> Vec<&'a Instrument> {
        let mut matched = self.filter.apply(self.catalog, criteria);
        sort_in_place(&mut matched, sort);
        matched
    }

    /// Autocomplete suggestions for a partially typed ticker or name.
    pub fn suggest(&self, query: &str) -> Vec<&'a Instrument> {
        insights::suggest(self.catalog, query, self.suggestion_limit)
    }

    /// Run a request.
    pub fn run(&self, request: &ScreenRequest) -> ScreenResult<'a> {
        let matched = self.matches(&request.criteria, &request.sort);
        let page_size = request.page_size.unwrap_or(self.page_size);
        let page = paginate(&matched, page_size, request.page);

        debug!(
            matches = matched.len(),
            page = page.current_page,
            total_pages = page.total_pages,
            sort_key = ?request.sort.key,
            "screen request served"
        );

        ScreenResult {
            total_matches: matched.len(),
            page,
        }
    }
}
