//! Panel validator.
//!
//! Checks run in a fixed order and stop at the first violation:
//! key uniqueness, per-ticker chronological order, then non-negative prices.
//! The panel is never reordered or de-duplicated here.

use crate::{
    error::{DataError, Result},
    panel::PricePanel,
};
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use tracing::{info, warn};

/// Validate a loaded price panel.
///
/// # Errors
///
/// - [`DataError::DuplicateKey`] if a `(date, ticker)` pair repeats.
/// - [`DataError::Order`] if a ticker's dates are not strictly increasing in
///   row order.
/// - [`DataError::NegativePrice`] if any price or volume is below zero.
pub fn validate_prices(panel: &PricePanel) -> Result<()> {
    let result = check_unique_keys(panel)
        .and_then(|()| check_chronological(panel))
        .and_then(|()| check_non_negative(panel));

    match &result {
        Ok(()) => info!(rows = panel.len(), "price panel passed validation"),
        Err(e) => warn!(error = %e, "price panel rejected"),
    }
    result
}

fn check_unique_keys(panel: &PricePanel) -> Result<()> {
    let mut seen: HashSet<(&str, NaiveDate)> = HashSet::with_capacity(panel.len());
    for row in panel.rows() {
        if !seen.insert((row.ticker.as_str(), row.date)) {
            return Err(DataError::DuplicateKey {
                ticker: row.ticker.clone(),
                date: row.date,
            });
        }
    }
    Ok(())
}

fn check_chronological(panel: &PricePanel) -> Result<()> {
    let mut last_seen: HashMap<&str, NaiveDate> = HashMap::new();
    for row in panel.rows() {
        if let Some(previous) = last_seen.insert(row.ticker.as_str(), row.date)
            && row.date <= previous
        {
            return Err(DataError::Order {
                ticker: row.ticker.clone(),
                previous,
                current: row.date,
            });
        }
    }
    Ok(())
}

fn check_non_negative(panel: &PricePanel) -> Result<()> {
    for row in panel.rows() {
        if let Some((column, value)) = row
            .numeric_fields()
            .into_iter()
            .find(|(_, value)| *value < 0.0)
        {
            return Err(DataError::NegativePrice {
                ticker: row.ticker.clone(),
                date: row.date,
                column,
                value,
            });
        }
    }
    Ok(())
}
