//! `ua-output`: writers for the ActivitySim input files.
//!
//! | File               | Writer                                             |
//! |--------------------|----------------------------------------------------|
//! | `households.csv`   | [`write_households`]                               |
//! | `persons.csv`      | [`write_persons`]                                  |
//! | `land_use.csv`     | [`write_land_use`]                                 |
//! | `zones.geojson`    | [`write_zones_geojson`]                            |
//! | `skims.csv`        | [`CsvMatrixWriter`]                                |
//! | `skims.parquet`    | `ParquetMatrixWriter` (feature `parquet`)          |
//!
//! Table writers take any `io::Write`; the skim writers implement
//! [`MatrixWriter`] and create their file in a directory.

pub mod csv;
pub mod error;
pub mod geojson;
pub mod row;
pub mod tables;
pub mod writer;

#[cfg(feature = "parquet")]
pub mod parquet;

#[cfg(test)]
mod tests;

pub use crate::csv::CsvMatrixWriter;
pub use error::{OutputError, OutputResult};
pub use crate::geojson::{write_zones_geojson, ZONES_FILE};
pub use row::{HouseholdRow, PersonRow};
pub use tables::{
    write_households, write_land_use, write_persons, ExportStats, HOUSEHOLDS_FILE, LAND_USE_FILE,
    PERSONS_FILE,
};
pub use writer::{open_matrix_writer, MatrixFormat, MatrixWriter};

#[cfg(feature = "parquet")]
pub use crate::parquet::ParquetMatrixWriter;
