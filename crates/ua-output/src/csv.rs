//! CSV skim container (`skims.csv`).

use std::fs::File;
use std::path::Path;

use csv::Writer;

use ua_skims::SkimMatrices;

use crate::writer::{check_sizes, MatrixFormat, MatrixWriter};
use crate::OutputResult;

/// Writes every matrix to one wide CSV file.
pub struct CsvMatrixWriter {
    out:      Writer<File>,
    finished: bool,
}

impl CsvMatrixWriter {
    /// Create (or truncate) `skims.csv` in `dir`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let out = Writer::from_path(dir.join(MatrixFormat::Csv.file_name()))?;
        Ok(Self { out, finished: false })
    }
}

impl MatrixWriter for CsvMatrixWriter {
    fn write(&mut self, skims: &SkimMatrices) -> OutputResult<()> {
        check_sizes(skims)?;
        let n = skims.n;

        self.out.write_field("origin")?;
        self.out.write_field("destination")?;
        for name in skims.matrices.keys() {
            self.out.write_field(name)?;
        }
        self.out.write_record(None::<&[u8]>)?;

        for k in 0..n * n {
            self.out.write_field((k / n + 1).to_string())?;
            self.out.write_field((k % n + 1).to_string())?;
            for m in skims.matrices.values() {
                self.out.write_field(m.at(k).to_string())?;
            }
            self.out.write_record(None::<&[u8]>)?;
        }
        log::debug!("wrote {} skim rows to csv", n * n);
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.out.flush()?;
        Ok(())
    }
}
