//! Pairwise comparison for the equity engine.
//!
//! This crate provides:
//! - Display formatting with placeholders for absent metrics
//! - Head-to-head metric rows with per-row verdicts
//! - Unordered pair enumeration (all pairs, top-K by market cap)
//! - Pair identifier generation and parsing

pub mod format;
pub mod comparator;
pub mod pairs;

pub use format::Formatter;
pub use comparator::{Comparator, ComparisonRow, MetricKind, Tally};
pub use pairs::{pair_count, PairEnumerator, PairId};
