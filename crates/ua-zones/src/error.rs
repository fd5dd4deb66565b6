//! Zone-subsystem error type.

use thiserror::Error;

use ua_core::LonLat;

/// Errors produced by `ua-zones`.
#[derive(Debug, Error)]
pub enum ZoneError {
    #[error("cannot decode H3 cell {cell:?}: {reason}")]
    InvalidCell { cell: String, reason: String },

    #[error("{entity} has a non-finite coordinate {pos}")]
    NonFiniteCoordinate { entity: String, pos: LonLat },

    #[error("{entity} at {pos} is farther than {radius} from every zone")]
    Unassignable {
        entity: String,
        pos:    LonLat,
        radius: f64,
    },

    #[error("cannot assign entities against an empty zone table")]
    NoZones,

    #[error("invalid assignment settings: {0}")]
    Config(String),
}

pub type ZoneResult<T> = Result<T, ZoneError>;
