//! Sanity gates on a built factor table.
//!
//! Checks run in a fixed order and stop at the first violation: negative
//! volatility, then non-finite z-scores, then ticker coverage.

use crate::{
    error::{FactorError, Result},
    frame::{FactorColumn, FactorFrame},
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Thresholds for [`validate_factors`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactorValidationConfig {
    /// Minimum distinct tickers the factor table must cover.
    pub min_tickers: usize,
}

impl Default for FactorValidationConfig {
    fn default() -> Self {
        Self { min_tickers: 10 }
    }
}

/// Validate a factor table.
pub fn validate_factors(frame: &FactorFrame, config: &FactorValidationConfig) -> Result<()> {
    let outcome = check_volatility(frame)
        .and_then(|()| check_zscore_finite(frame))
        .and_then(|()| check_ticker_count(frame, config.min_tickers));

    match &outcome {
        Ok(()) => info!(rows = frame.len(), tickers = frame.ticker_count(), "factor table validated"),
        Err(e) => warn!(error = %e, "factor validation failed"),
    }
    outcome
}

fn check_volatility(frame: &FactorFrame) -> Result<()> {
    match frame.rows().iter().find(|r| r.features.vol_20d < 0.0) {
        Some(row) => Err(FactorError::NegativeVolatility {
            ticker: row.ticker.clone(),
            date: row.date,
            value: row.features.vol_20d,
        }),
        None => Ok(()),
    }
}

fn check_zscore_finite(frame: &FactorFrame) -> Result<()> {
    let column = FactorColumn::ZScore20dPrice;
    match frame.rows().iter().find(|r| !r.value(column).is_finite()) {
        Some(row) => Err(FactorError::NonFiniteValue {
            column: column.name(),
            ticker: row.ticker.clone(),
            date: row.date,
            value: row.value(column),
        }),
        None => Ok(()),
    }
}

fn check_ticker_count(frame: &FactorFrame, required: usize) -> Result<()> {
    let found = frame.ticker_count();
    if found < required {
        return Err(FactorError::InsufficientTickers { required, found });
    }
    Ok(())
}
