//! Core types and configuration for the equity screening engine.
//!
//! This crate provides shared types used across all other crates:
//! - Instrument records and optional metrics
//! - Canonical numeric normalization of magnitude strings
//! - Market-cap buckets and comparison verdicts
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod magnitude;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use magnitude::{parse_magnitude, try_parse_magnitude};
pub use types::*;
