//! Factor and summary sinks.

use crate::{
    export::{ExportFormat, FactorRecord, Result, write_atomic},
    summary::{FactorSummary, OUTPUT_COLUMNS},
};
use hobart_factors::FactorFrame;
use polars::prelude::*;
use std::fmt::Debug;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Destination for a validated factor table.
pub trait FactorSink: Send + Sync + Debug {
    /// Where the table goes, for logging.
    fn name(&self) -> String;

    /// Persist the whole table or nothing.
    fn write(&self, frame: &FactorFrame) -> Result<()>;
}

/// Destination for a run summary.
pub trait SummarySink: Send + Sync + Debug {
    /// Where the summary goes, for logging.
    fn name(&self) -> String;

    /// Persist the summary or nothing.
    fn write(&self, summary: &FactorSummary) -> Result<()>;
}

/// Writes the factor table as Parquet.
#[derive(Debug, Clone)]
pub struct ParquetFactorSink {
    path: PathBuf,
}

impl ParquetFactorSink {
    /// Sink writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FactorSink for ParquetFactorSink {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn write(&self, frame: &FactorFrame) -> Result<()> {
        let mut df = frame.to_dataframe()?;
        write_atomic(&self.path, |file| {
            ParquetWriter::new(file).finish(&mut df)?;
            Ok(())
        })?;
        info!(path = %self.path.display(), rows = frame.len(), "wrote factor table");
        Ok(())
    }
}

/// Writes the factor table as CSV with a header row.
#[derive(Debug, Clone)]
pub struct CsvFactorSink {
    path: PathBuf,
}

impl CsvFactorSink {
    /// Sink writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FactorSink for CsvFactorSink {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn write(&self, frame: &FactorFrame) -> Result<()> {
        write_atomic(&self.path, |file| {
            // header written explicitly so an empty table still carries it
            let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(file);
            wtr.write_record(OUTPUT_COLUMNS)?;
            for row in frame.rows() {
                wtr.serialize(FactorRecord::from(row))?;
            }
            wtr.flush()?;
            Ok(())
        })?;
        info!(path = %self.path.display(), rows = frame.len(), "wrote factor table");
        Ok(())
    }
}

/// Writes the summary as pretty-printed JSON.
#[derive(Debug, Clone)]
pub struct JsonSummarySink {
    path: PathBuf,
}

impl JsonSummarySink {
    /// Sink writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SummarySink for JsonSummarySink {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn write(&self, summary: &FactorSummary) -> Result<()> {
        write_atomic(&self.path, |file| {
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, summary)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
            Ok(())
        })?;
        info!(path = %self.path.display(), "wrote summary");
        Ok(())
    }
}

/// Pick a factor sink from the file extension of `path`.
pub fn open_sink(path: &Path) -> Result<Box<dyn FactorSink>> {
    let sink: Box<dyn FactorSink> = match ExportFormat::from_path(path)? {
        ExportFormat::Parquet => Box::new(ParquetFactorSink::new(path)),
        ExportFormat::Csv => Box::new(CsvFactorSink::new(path)),
    };
    Ok(sink)
}
