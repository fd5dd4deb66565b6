//! BEAM OD skim records.
//!
//! # CSV format
//!
//! One row per (origin, destination, hour, mode).  Zones are H3 cell ids.
//! BEAM writes more columns than these; the rest are ignored.
//!
//! ```csv
//! hour,mode,origTaz,destTaz,travelTimeInS,generalizedTimeInS,cost,generalizedCost,distanceInM,energy
//! 8,CAR,8948e1a2a0bffff,8948e1a2a0bffff,60,75.2,0,1.5,410.0,0
//! ```

use std::io::Read;
use std::path::Path;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use ua_core::units::{meters_to_miles, seconds_to_minutes};

use crate::{SkimError, SkimResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkimRecord {
    pub orig_taz:              String,
    pub dest_taz:              String,
    pub hour:                  u32,
    pub mode:                  String,
    pub distance_in_m:         f64,
    pub generalized_time_in_s: f64,
    pub generalized_cost:      f64,
}

impl SkimRecord {
    pub fn dist_miles(&self) -> f64 {
        meters_to_miles(self.distance_in_m)
    }

    pub fn gen_cost_min(&self) -> f64 {
        seconds_to_minutes(self.generalized_time_in_s)
    }
}

/// Which per-record value a matrix is filled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceColumn {
    /// `distanceInM` in miles.
    DistMiles,
    /// `generalizedTimeInS` in minutes.
    GenCostMin,
    /// `generalizedCost` as written.
    GeneralizedCost,
}

impl SourceColumn {
    pub const ALL: [SourceColumn; 3] = [
        SourceColumn::DistMiles,
        SourceColumn::GenCostMin,
        SourceColumn::GeneralizedCost,
    ];

    pub fn value(self, r: &SkimRecord) -> f64 {
        match self {
            SourceColumn::DistMiles => r.dist_miles(),
            SourceColumn::GenCostMin => r.gen_cost_min(),
            SourceColumn::GeneralizedCost => r.generalized_cost,
        }
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

pub fn load_skims(path: &Path) -> SkimResult<Vec<SkimRecord>> {
    if !path.is_file() {
        return Err(SkimError::MissingFile(path.to_path_buf()));
    }
    let file = std::fs::File::open(path)?;
    let records = load_skims_reader(file)?;
    log::info!("loaded {} skim rows from {}", records.len(), path.display());
    Ok(records)
}

/// Like [`load_skims`] but accepts any `Read` source.
pub fn load_skims_reader<R: Read>(reader: R) -> SkimResult<Vec<SkimRecord>> {
    // Cell ids are the zone identity downstream, so padding is stripped here.
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    csv_reader
        .deserialize::<SkimRecord>()
        .enumerate()
        .map(|(i, r)| r.map_err(|e| SkimError::Parse(format!("row {}: {e}", i + 2))))
        .collect()
}

/// Distinct origin cells in the order they first appear.
///
/// This order defines the zone ids: cell `i` becomes `ZoneId(i + 1)` and
/// matrix row/column `i`.
pub fn origin_cells(records: &[SkimRecord]) -> Vec<String> {
    let cells: IndexSet<&str> = records.iter().map(|r| r.orig_taz.as_str()).collect();
    cells.into_iter().map(str::to_owned).collect()
}
