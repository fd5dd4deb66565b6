//! Error types for ua-output.

use thiserror::Error;

use ua_attrs::AttrError;

/// Errors that can occur when writing ActivitySim inputs.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON write error: {0}")]
    Json(#[from] serde_json::Error),

    /// A column the export needs is missing or has the wrong kind.
    #[error(transparent)]
    Attr(#[from] AttrError),

    #[error("matrix {name} is {found}x{found}, expected {expected}x{expected}")]
    MatrixSize { name: String, expected: usize, found: usize },

    #[error("matrix format {0:?} is not available in this build")]
    FormatUnavailable(String),

    #[cfg(feature = "parquet")]
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[cfg(feature = "parquet")]
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;
