//! The `MatrixWriter` trait implemented by the skim container backends.

use std::path::Path;

use serde::{Deserialize, Serialize};

use ua_skims::SkimMatrices;

use crate::{OutputError, OutputResult};

/// Trait implemented by the CSV and Parquet skim writers.
///
/// Every backend writes one wide table: `origin`, `destination` (TAZ ids,
/// origin-major), then one column per named matrix in catalog order.
pub trait MatrixWriter {
    /// Write every matrix of `skims`.
    fn write(&mut self, skims: &SkimMatrices) -> OutputResult<()>;

    /// Flush and close the underlying file.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

/// Skim container file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatrixFormat {
    Csv,
    #[default]
    Parquet,
}

impl MatrixFormat {
    /// Name as written in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            MatrixFormat::Csv => "csv",
            MatrixFormat::Parquet => "parquet",
        }
    }

    /// Whether this build can write the format.  Parquet needs the
    /// `parquet` feature.
    pub fn is_available(self) -> bool {
        match self {
            MatrixFormat::Csv => true,
            MatrixFormat::Parquet => cfg!(feature = "parquet"),
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            MatrixFormat::Csv => "skims.csv",
            MatrixFormat::Parquet => "skims.parquet",
        }
    }
}

/// Open the writer for `format` in `dir`.
///
/// Fails with [`OutputError::FormatUnavailable`] for Parquet when the crate
/// was built without the `parquet` feature.
pub fn open_matrix_writer(format: MatrixFormat, dir: &Path) -> OutputResult<Box<dyn MatrixWriter>> {
    match format {
        MatrixFormat::Csv => Ok(Box::new(crate::csv::CsvMatrixWriter::new(dir)?)),
        #[cfg(feature = "parquet")]
        MatrixFormat::Parquet => Ok(Box::new(crate::parquet::ParquetMatrixWriter::new(dir)?)),
        #[cfg(not(feature = "parquet"))]
        MatrixFormat::Parquet => Err(OutputError::FormatUnavailable(format.name().into())),
    }
}

/// Every matrix must be `n × n` for the container's `n`.
pub(crate) fn check_sizes(skims: &SkimMatrices) -> OutputResult<()> {
    for (name, m) in &skims.matrices {
        if m.n() != skims.n {
            return Err(OutputError::MatrixSize {
                name:     name.clone(),
                expected: skims.n,
                found:    m.n(),
            });
        }
    }
    Ok(())
}
