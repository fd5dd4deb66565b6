//! Parquet skim container (`skims.parquet`, feature `parquet`).
//!
//! The OD rows are streamed in record batches of [`BATCH_ROWS`], so only one
//! batch of each column is materialised at a time.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, UInt32Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use ua_skims::SkimMatrices;

use crate::writer::{check_sizes, MatrixFormat, MatrixWriter};
use crate::OutputResult;

/// OD pairs per record batch.
pub const BATCH_ROWS: usize = 65_536;

fn schema(skims: &SkimMatrices) -> Arc<Schema> {
    let mut fields = vec![
        Field::new("origin",      DataType::UInt32, false),
        Field::new("destination", DataType::UInt32, false),
    ];
    fields.extend(skims.matrices.keys().map(|name| Field::new(name, DataType::Float64, false)));
    Arc::new(Schema::new(fields))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

/// Writes every matrix to one wide Parquet file.
///
/// The schema depends on the matrix names, so the file is created on the
/// first `write`.  `finish()` **must** be called to write the footer.
pub struct ParquetMatrixWriter {
    path:   std::path::PathBuf,
    writer: Option<ArrowWriter<File>>,
}

impl ParquetMatrixWriter {
    pub fn new(dir: &Path) -> OutputResult<Self> {
        Ok(Self {
            path:   dir.join(MatrixFormat::Parquet.file_name()),
            writer: None,
        })
    }
}

impl MatrixWriter for ParquetMatrixWriter {
    fn write(&mut self, skims: &SkimMatrices) -> OutputResult<()> {
        check_sizes(skims)?;
        let schema = schema(skims);
        let file = File::create(&self.path)?;
        let writer = self
            .writer
            .insert(ArrowWriter::try_new(file, Arc::clone(&schema), Some(snappy_props()))?);

        let n = skims.n;
        let total = n * n;
        let mut start = 0;
        while start < total {
            let end = (start + BATCH_ROWS).min(total);
            let mut columns: Vec<ArrayRef> = Vec::with_capacity(skims.len() + 2);
            columns.push(Arc::new(UInt32Array::from_iter_values(
                (start..end).map(|k| (k / n + 1) as u32),
            )));
            columns.push(Arc::new(UInt32Array::from_iter_values(
                (start..end).map(|k| (k % n + 1) as u32),
            )));
            for m in skims.matrices.values() {
                columns.push(Arc::new(Float64Array::from_iter_values((start..end).map(|k| m.at(k)))));
            }
            writer.write(&RecordBatch::try_new(Arc::clone(&schema), columns)?)?;
            start = end;
        }
        log::debug!("wrote {total} skim rows to parquet");
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if let Some(w) = self.writer.take() {
            w.close()?;
        }
        Ok(())
    }
}
