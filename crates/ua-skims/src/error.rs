use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SkimError {
    #[error("skim parse error: {0}")]
    Parse(String),

    #[error("skim table not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("skim table has no rows")]
    Empty,

    #[error("hour {hour} mode {mode}: {rows} rows is not a square number of OD pairs")]
    NonSquare { hour: u32, mode: String, rows: usize },

    #[error("hour {hour} mode {mode}: {found}x{found} OD pairs but the table has {expected} origin zones")]
    ZoneCountMismatch {
        hour:     u32,
        mode:     String,
        expected: usize,
        found:    usize,
    },

    #[error("destination cell {cell:?} never appears as an origin")]
    UnknownZone { cell: String },

    #[error("hour {hour} mode {mode}: OD pair {origin:?} -> {destination:?} appears more than once")]
    DuplicatePair {
        hour:        u32,
        mode:        String,
        origin:      String,
        destination: String,
    },

    #[error("cannot pick an hour for {period}: table has hours {hours:?}; set period_hours or default_hour")]
    AmbiguousHour { period: String, hours: Vec<u32> },

    #[error("no skim rows for hour {hour} mode {mode}")]
    MissingGroup { hour: u32, mode: String },

    #[error("matrix {0} is defined more than once")]
    DuplicateMatrix(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SkimResult<T> = Result<T, SkimError>;
