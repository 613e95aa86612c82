//! Screening for the equity engine.
//!
//! This crate handles:
//! - Conjunctive filtering (sector, market-cap bucket, free-text search)
//! - Stable multi-key sorting
//! - Deterministic pagination
//! - Screening requests combining all three
//! - Leaderboards, sector summaries, related instruments and suggestions

pub mod filter;
pub mod sort;
pub mod paginate;
pub mod engine;
pub mod insights;

pub use filter::{FilterCriteria, FilterEngine, SectorFilter};
pub use sort::{sort, sort_in_place, SortDirection, SortKey, SortSpec};
pub use paginate::{paginate, Page};
pub use engine::{ScreenRequest, ScreenResult, Screener};
pub use insights::SectorSummary;
