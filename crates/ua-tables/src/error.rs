use std::path::PathBuf;

use thiserror::Error;

use ua_core::UaError;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("{table}: {reason}")]
    Parse { table: String, reason: String },

    #[error("input table not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("directory request {url} failed: {reason}")]
    Fetch { url: String, reason: String },

    #[error(transparent)]
    Core(#[from] UaError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type TableResult<T> = Result<T, TableError>;
