#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod export;
pub mod sink;
pub mod summary;

pub use export::{ExportError, ExportFormat, FactorRecord, Result, write_atomic};
pub use sink::{
    CsvFactorSink, FactorSink, JsonSummarySink, ParquetFactorSink, SummarySink, open_sink,
};
pub use summary::{FactorSummary, OUTPUT_COLUMNS, summarize};
