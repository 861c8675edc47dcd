//! Pipeline error type.

use hobart_data::DataError;
use hobart_factors::FactorError;
use hobart_output::ExportError;
use thiserror::Error;

/// Result type for pipeline runs.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// A failed gate. The wrapped error is the stage's own, unchanged.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Loading or panel validation failed
    #[error(transparent)]
    Data(#[from] DataError),

    /// Factor validation failed
    #[error(transparent)]
    Factor(#[from] FactorError),

    /// Persisting an artifact failed
    #[error(transparent)]
    Export(#[from] ExportError),
}
