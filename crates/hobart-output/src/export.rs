//! Export primitives shared by the sinks.
//!
//! Every file is written to `<path>.tmp` and renamed into place, so readers
//! never observe a half-written artifact.

use chrono::NaiveDate;
use hobart_factors::{FactorError, FactorRow};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parquet or DataFrame error.
    #[error("DataFrame error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// The factor table could not be materialized.
    #[error("Factor table error: {0}")]
    Frame(#[from] FactorError),

    /// Invalid format error.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// File formats for the factor table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Apache Parquet.
    Parquet,

    /// Comma-separated values with a header row.
    Csv,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Parquet => "parquet",
            Self::Csv => "csv",
        }
    }

    /// Infer the format from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("parquet" | "pq") => Ok(Self::Parquet),
            Some("csv") => Ok(Self::Csv),
            _ => Err(ExportError::InvalidFormat(format!(
                "cannot infer output format from {}",
                path.display()
            ))),
        }
    }
}

/// Flat factor row for CSV export, columns in output order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FactorRecord {
    /// Trading date.
    pub date: NaiveDate,
    /// Ticker symbol.
    pub ticker: String,
    /// One-day return.
    pub ret_1d: f64,
    /// Five-day forward return (label).
    pub ret_fwd_5d: f64,
    /// 20-day momentum.
    pub mom_20d: f64,
    /// 60-day momentum.
    pub mom_60d: f64,
    /// 20-day return volatility.
    pub vol_20d: f64,
    /// 20-day price z-score.
    pub zscore_20d_price: f64,
    /// 20-day average daily volume.
    pub adv_20d: f64,
    /// 20-day dollar volume.
    pub dollar_vol_20d: f64,
}

impl From<&FactorRow> for FactorRecord {
    fn from(row: &FactorRow) -> Self {
        let f = &row.features;
        Self {
            date: row.date,
            ticker: row.ticker.clone(),
            ret_1d: f.ret_1d,
            ret_fwd_5d: row.label.ret_fwd_5d,
            mom_20d: f.mom_20d,
            mom_60d: f.mom_60d,
            vol_20d: f.vol_20d,
            zscore_20d_price: f.zscore_20d_price,
            adv_20d: f.adv_20d,
            dollar_vol_20d: f.dollar_vol_20d,
        }
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Write `path` atomically.
///
/// Parent directories are created, `write` fills `<path>.tmp`, and the temp
/// file is renamed over `path`. On any failure the temp file is removed and
/// `path` is left untouched.
pub fn write_atomic<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(File) -> Result<()>,
{
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let tmp = tmp_path(path);
    let outcome = File::create(&tmp)
        .map_err(ExportError::from)
        .and_then(write)
        .and_then(|()| fs::rename(&tmp, path).map_err(ExportError::from));

    if outcome.is_err() {
        let _ = fs::remove_file(&tmp);
        debug!(path = %path.display(), "atomic write failed, temp file removed");
    }
    outcome
}
