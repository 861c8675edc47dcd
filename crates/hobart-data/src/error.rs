//! Error types for price panel operations.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors raised while reading, normalizing or validating a price panel.
///
/// Every variant is fatal to a pipeline run.
#[derive(Debug, Error)]
pub enum DataError {
    /// Required column missing, or a column has an unusable type
    #[error("Schema error: {0}")]
    Schema(String),

    /// A date value could not be converted to a calendar date
    #[error("Invalid date at row {row}: {value}")]
    Date {
        /// Zero-based row index in the raw table
        row: usize,
        /// Offending raw value
        value: String,
    },

    /// The same `(date, ticker)` key appears more than once
    #[error("Duplicate (date, ticker) key: ({date}, {ticker})")]
    DuplicateKey {
        /// Ticker of the repeated key
        ticker: String,
        /// Date of the repeated key
        date: NaiveDate,
    },

    /// Dates for a ticker are not strictly increasing in row order
    #[error("Dates are not strictly increasing for {ticker}: {current} follows {previous}")]
    Order {
        /// Ticker with the ordering violation
        ticker: String,
        /// Date of the preceding row for this ticker
        previous: NaiveDate,
        /// Date of the row that broke the ordering
        current: NaiveDate,
    },

    /// A price or volume field is negative
    #[error("Negative {column} for {ticker} on {date}: {value}")]
    NegativePrice {
        /// Ticker of the offending row
        ticker: String,
        /// Date of the offending row
        date: NaiveDate,
        /// Column holding the negative value
        column: &'static str,
        /// The negative value
        value: f64,
    },

    /// File extension does not map to a known price source
    #[error("Unsupported price source format: {0}")]
    UnsupportedFormat(String),

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
