//! Panel loader and normalizer.
//!
//! Turns a raw price table into a [`PricePanel`]: checks that every required
//! column is present, normalizes the date column and casts the numeric
//! columns to `f64`. No numeric computation happens before the schema check.

use crate::{
    dates::normalize_dates,
    error::{DataError, Result},
    panel::{PRICE_COLUMNS, PricePanel, PricePoint, REQUIRED_COLUMNS},
};
use polars::prelude::*;
use tracing::info;

/// Load and normalize a raw price table.
///
/// # Errors
///
/// - [`DataError::Schema`] if a required column is absent, `ticker` is not a
///   non-null string column, or a price column is not numeric.
/// - [`DataError::Date`] if any date value cannot be parsed.
pub fn load_prices(df: &DataFrame) -> Result<PricePanel> {
    check_schema(df)?;

    let dates = normalize_dates(df.column("date")?.as_materialized_series())?;
    let tickers = ticker_column(df)?;
    let [open, high, low, close, adj_close, volume] = numeric_columns(df)?;

    let rows: Vec<PricePoint> = (0..df.height())
        .map(|i| PricePoint {
            date: dates[i],
            ticker: tickers[i].clone(),
            open: open[i],
            high: high[i],
            low: low[i],
            close: close[i],
            adj_close: adj_close[i],
            volume: volume[i],
        })
        .collect();

    let panel = PricePanel::new(rows);
    info!(
        rows = panel.len(),
        tickers = panel.ticker_count(),
        "loaded price panel"
    );
    Ok(panel)
}

/// Fail with every missing required column, sorted by name.
fn check_schema(df: &DataFrame) -> Result<()> {
    let mut missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|name| df.column(name).is_err())
        .collect();

    if missing.is_empty() {
        return Ok(());
    }
    missing.sort_unstable();
    Err(DataError::Schema(format!(
        "missing required columns: {}",
        missing.join(", ")
    )))
}

fn ticker_column(df: &DataFrame) -> Result<Vec<String>> {
    let series = df.column("ticker")?.as_materialized_series();
    let tickers = series.str().map_err(|_| {
        DataError::Schema(format!(
            "column 'ticker' must be a string column, found {}",
            series.dtype()
        ))
    })?;

    tickers
        .into_iter()
        .enumerate()
        .map(|(row, ticker)| {
            ticker
                .map(str::to_string)
                .ok_or_else(|| DataError::Schema(format!("null ticker at row {row}")))
        })
        .collect()
}

fn numeric_columns(df: &DataFrame) -> Result<[Vec<f64>; 6]> {
    let mut columns: [Vec<f64>; 6] = Default::default();
    for (slot, name) in columns.iter_mut().zip(PRICE_COLUMNS) {
        *slot = numeric_column(df, name)?;
    }
    Ok(columns)
}

/// Cast a numeric column to `f64`, mapping nulls to `NaN`.
fn numeric_column(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let series = df.column(name)?.as_materialized_series();
    match series.dtype() {
        DataType::Float32
        | DataType::Float64
        | DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64 => {}
        other => {
            return Err(DataError::Schema(format!(
                "column '{name}' must be numeric, found {other}"
            )));
        }
    }

    let cast = series.cast(&DataType::Float64)?;
    Ok(cast
        .f64()?
        .into_iter()
        .map(|v| v.unwrap_or(f64::NAN))
        .collect())
}
