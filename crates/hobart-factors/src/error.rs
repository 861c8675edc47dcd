//! Error types for factor computations.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type for factor operations.
pub type Result<T> = std::result::Result<T, FactorError>;

/// Errors raised by the factor validator or while materializing factor tables.
#[derive(Debug, Error)]
pub enum FactorError {
    /// A rolling volatility came out negative
    #[error("vol_20d is negative for {ticker} on {date}: {value}")]
    NegativeVolatility {
        /// Ticker of the offending row
        ticker: String,
        /// Date of the offending row
        date: NaiveDate,
        /// The negative volatility
        value: f64,
    },

    /// A factor value is infinite or NaN where a finite value is required
    #[error("{column} is not finite for {ticker} on {date}: {value}")]
    NonFiniteValue {
        /// Column holding the value
        column: &'static str,
        /// Ticker of the offending row
        ticker: String,
        /// Date of the offending row
        date: NaiveDate,
        /// The non-finite value
        value: f64,
    },

    /// Too few tickers survived warm-up and tail trimming
    #[error("Insufficient tickers: need at least {required}, found {found}")]
    InsufficientTickers {
        /// Minimum number of distinct tickers
        required: usize,
        /// Distinct tickers in the factor table
        found: usize,
    },

    /// Polars DataFrame error
    #[error("DataFrame error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}
