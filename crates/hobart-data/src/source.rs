//! Tabular price sources.
//!
//! The pipeline never fetches prices itself. It reads a raw table from a
//! [`PriceSource`], which is either an in-memory frame or a file on disk.

use crate::error::{DataError, Result};
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};

/// A provider of the raw price table.
pub trait PriceSource: Send + Sync + std::fmt::Debug {
    /// Human-readable identifier used in logs.
    fn name(&self) -> String;

    /// Read the raw price table.
    fn read(&self) -> Result<DataFrame>;
}

/// A price table that is already in memory.
#[derive(Debug, Clone)]
pub struct FramePriceSource {
    frame: DataFrame,
}

impl FramePriceSource {
    /// Wrap an existing frame.
    pub const fn new(frame: DataFrame) -> Self {
        Self { frame }
    }
}

impl PriceSource for FramePriceSource {
    fn name(&self) -> String {
        format!("in-memory frame ({} rows)", self.frame.height())
    }

    fn read(&self) -> Result<DataFrame> {
        Ok(self.frame.clone())
    }
}

/// A Parquet file holding the raw price table.
#[derive(Debug, Clone)]
pub struct ParquetPriceSource {
    path: PathBuf,
}

impl ParquetPriceSource {
    /// Source backed by the Parquet file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PriceSource for ParquetPriceSource {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn read(&self) -> Result<DataFrame> {
        let file = File::open(&self.path)?;
        Ok(ParquetReader::new(file).finish()?)
    }
}

/// A CSV file with a header row holding the raw price table.
///
/// Dates are read as strings and parsed by the loader.
#[derive(Debug, Clone)]
pub struct CsvPriceSource {
    path: PathBuf,
}

impl CsvPriceSource {
    /// Source backed by the CSV file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PriceSource for CsvPriceSource {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn read(&self) -> Result<DataFrame> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(self.path.clone()))?
            .finish()?;
        Ok(df)
    }
}

/// Pick a file-backed source from the extension of `path`.
///
/// `parquet`/`pq` map to [`ParquetPriceSource`], `csv` to [`CsvPriceSource`].
pub fn open_source(path: &Path) -> Result<Box<dyn PriceSource>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("parquet" | "pq") => Ok(Box::new(ParquetPriceSource::new(path))),
        Some("csv") => Ok(Box::new(CsvPriceSource::new(path))),
        _ => Err(DataError::UnsupportedFormat(path.display().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;
    use std::io::Write;

    #[test]
    fn test_open_source_by_extension() {
        assert!(open_source(Path::new("prices.parquet")).is_ok());
        assert!(open_source(Path::new("prices.PQ")).is_ok());
        assert!(open_source(Path::new("prices.csv")).is_ok());
        assert!(matches!(
            open_source(Path::new("prices.xlsx")),
            Err(DataError::UnsupportedFormat(_))
        ));
        assert!(open_source(Path::new("prices")).is_err());
    }

    #[test]
    fn test_frame_source_returns_copy() {
        let df = df! { "a" => [1, 2, 3] }.unwrap();
        let source = FramePriceSource::new(df);
        assert_eq!(source.read().unwrap().height(), 3);
        assert!(source.name().contains("3 rows"));
    }

    #[test]
    fn test_csv_source_reads_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prices.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "date,ticker,open,high,low,close,adj_close,volume").unwrap();
        writeln!(file, "2024-01-02,AAPL,1.0,1.0,1.0,1.0,1.0,100").unwrap();
        drop(file);

        let df = CsvPriceSource::new(&path).read().unwrap();
        assert_eq!(df.height(), 1);
        assert_eq!(df.width(), 8);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let source = ParquetPriceSource::new("/nonexistent/prices.parquet");
        assert!(matches!(source.read(), Err(DataError::Io(_))));
    }
}
