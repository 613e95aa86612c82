//! Instrument catalog for the equity screening engine.
//!
//! This crate handles:
//! - Loading and validating the external instrument dataset
//! - Duplicate ticker detection
//! - Case-insensitive ticker and sector lookup
//! - Sector enumeration

pub mod catalog;

pub use catalog::{Catalog, CatalogStats};
