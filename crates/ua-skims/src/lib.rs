//! `ua-skims`: the Skim Reshaping Engine.
//!
//! Turns BEAM's long OD skim table into the dense, named zone-by-zone
//! matrices ActivitySim expects.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`record`]  | `SkimRecord`, `SourceColumn`, CSV loading, `origin_cells`    |
//! | [`table`]   | `SkimTable`: validated `(hour, mode)` groups in zone order  |
//! | [`matrix`]  | `Matrix`: shared dense `n × n` buffer                       |
//! | [`catalog`] | `SkimCatalog`: matrix names, sources, period hours          |
//! | [`reshape`] | `reshape`, `SkimMatrices`                                    |
//! | [`error`]   | `SkimError`, `SkimResult<T>`                                 |
//!
//! # Zone order
//!
//! Matrix row/column `i` is the `i`-th distinct origin cell of the table,
//! which is also `ZoneId(i + 1)` in the zone table built from the same
//! [`origin_cells`].

pub mod catalog;
pub mod error;
pub mod matrix;
pub mod record;
pub mod reshape;
pub mod table;


pub use catalog::{FixedMatrix, HighwayFamily, MatrixSpec, MeasureSpec, SkimCatalog, TransitFamily};
pub use error::{SkimError, SkimResult};
pub use matrix::Matrix;
pub use record::{load_skims, load_skims_reader, origin_cells, SkimRecord, SourceColumn};
pub use reshape::{reshape, SkimMatrices};
pub use table::SkimTable;
