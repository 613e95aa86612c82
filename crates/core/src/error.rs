//! Error types for the equity screening engine.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the equity screening engine.
#[derive(Error, Debug)]
pub enum Error {
    /// Lookup of a ticker that is not in the catalog.
    #[error("Instrument not found: {0}")]
    NotFound(String),

    /// Two records share the same ticker (case-insensitive).
    #[error("Duplicate ticker: {0}")]
    DuplicateTicker(String),

    /// A required field is empty or absent.
    #[error("Missing field `{field}` on record {ticker:?}")]
    MissingField { ticker: String, field: &'static str },

    /// A record violates a data-model invariant.
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// A market-cap string with no extractable magnitude.
    #[error("Malformed magnitude: {0:?}")]
    MalformedMagnitude(String),

    /// A pair identifier that cannot be split into two distinct tickers.
    #[error("Invalid pair identifier: {0:?}")]
    InvalidPairId(String),

    /// Both sides of a comparison resolve to the same instrument.
    #[error("Cannot compare {0} with itself")]
    SelfComparison(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a not-found error.
    pub fn not_found(ticker: impl Into<String>) -> Self {
        Error::NotFound(ticker.into())
    }

    /// Create a duplicate ticker error.
    pub fn duplicate_ticker(ticker: impl Into<String>) -> Self {
        Error::DuplicateTicker(ticker.into())
    }

    /// Create a missing field error.
    pub fn missing_field(ticker: impl Into<String>, field: &'static str) -> Self {
        Error::MissingField {
            ticker: ticker.into(),
            field,
        }
    }

    /// Create an invalid record error.
    pub fn invalid_record(msg: impl Into<String>) -> Self {
        Error::InvalidRecord(msg.into())
    }

    /// Create a malformed magnitude error.
    pub fn malformed_magnitude(input: impl Into<String>) -> Self {
        Error::MalformedMagnitude(input.into())
    }

    /// Create an invalid pair identifier error.
    pub fn invalid_pair_id(id: impl Into<String>) -> Self {
        Error::InvalidPairId(id.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }
}
