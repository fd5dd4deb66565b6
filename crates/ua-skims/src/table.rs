//! Validated skim table.
//!
//! [`SkimTable::new`] checks the long OD table once and lays every
//! `(hour, mode)` group out as dense matrices in zone order.  After that,
//! looking up a matrix is a clone of a shared buffer.
//!
//! # Validation
//!
//! For `N` distinct origin cells, every group must hold exactly `N²` rows
//! covering each (origin, destination) pair once.  Rows are sorted by
//! (origin index, destination index) before placement, so the input order
//! of the CSV does not matter.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use crate::matrix::Matrix;
use crate::record::{origin_cells, SkimRecord, SourceColumn};
use crate::{SkimError, SkimResult};

/// Group key: `(hour, mode)`.
pub type GroupKey = (u32, String);

/// One `(hour, mode)` group, one dense buffer per source column.
#[derive(Debug, Clone)]
struct OdGroup {
    columns: [Arc<[f64]>; 3],
}

impl OdGroup {
    fn column(&self, c: SourceColumn) -> &Arc<[f64]> {
        match c {
            SourceColumn::DistMiles => &self.columns[0],
            SourceColumn::GenCostMin => &self.columns[1],
            SourceColumn::GeneralizedCost => &self.columns[2],
        }
    }
}

#[derive(Debug)]
pub struct SkimTable {
    cells:  Vec<String>,
    groups: BTreeMap<GroupKey, OdGroup>,
}

impl SkimTable {
    pub fn new(records: &[SkimRecord]) -> SkimResult<SkimTable> {
        if records.is_empty() {
            return Err(SkimError::Empty);
        }
        let cells = origin_cells(records);
        let n = cells.len();
        let index: HashMap<&str, usize> =
            cells.iter().enumerate().map(|(i, c)| (c.as_str(), i)).collect();

        let mut by_group: BTreeMap<GroupKey, Vec<&SkimRecord>> = BTreeMap::new();
        for r in records {
            by_group.entry((r.hour, r.mode.clone())).or_default().push(r);
        }

        let mut groups = BTreeMap::new();
        for ((hour, mode), rows) in by_group {
            let side = exact_sqrt(rows.len()).ok_or_else(|| SkimError::NonSquare {
                hour,
                mode: mode.clone(),
                rows: rows.len(),
            })?;
            if side != n {
                return Err(SkimError::ZoneCountMismatch { hour, mode, expected: n, found: side });
            }

            let mut placed: Vec<(usize, usize, &SkimRecord)> = Vec::with_capacity(rows.len());
            for r in rows {
                let o = index[r.orig_taz.as_str()];
                let d = *index
                    .get(r.dest_taz.as_str())
                    .ok_or_else(|| SkimError::UnknownZone { cell: r.dest_taz.clone() })?;
                placed.push((o, d, r));
            }
            placed.sort_by_key(|&(o, d, _)| (o, d));

            // n² rows, sorted, no repeats: the rows fill the grid exactly.
            if let Some(w) = placed.windows(2).find(|w| (w[0].0, w[0].1) == (w[1].0, w[1].1)) {
                return Err(SkimError::DuplicatePair {
                    hour,
                    mode,
                    origin: w[0].2.orig_taz.clone(),
                    destination: w[0].2.dest_taz.clone(),
                });
            }

            let columns = SourceColumn::ALL.map(|c| -> Arc<[f64]> {
                placed.iter().map(|&(_, _, r)| c.value(r)).collect()
            });
            log::debug!("skim group hour {hour} mode {mode}: {n}x{n}");
            groups.insert((hour, mode), OdGroup { columns });
        }

        Ok(SkimTable { cells, groups })
    }

    /// Zone count `N`.
    pub fn zone_count(&self) -> usize {
        self.cells.len()
    }

    /// Origin cells in zone order.
    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    /// Distinct hours present, ascending.
    pub fn hours(&self) -> BTreeSet<u32> {
        self.groups.keys().map(|(h, _)| *h).collect()
    }

    /// Group keys, ascending.
    pub fn groups(&self) -> impl Iterator<Item = &GroupKey> + '_ {
        self.groups.keys()
    }

    /// The `column` matrix of group `(hour, mode)`.
    pub fn matrix(&self, hour: u32, mode: &str, column: SourceColumn) -> SkimResult<Matrix> {
        let group = self
            .groups
            .get(&(hour, mode.to_owned()))
            .ok_or_else(|| SkimError::MissingGroup { hour, mode: mode.to_owned() })?;
        Ok(Matrix::from_shared(self.zone_count(), Arc::clone(group.column(column))))
    }
}

/// `Some(r)` when `x == r * r`.
fn exact_sqrt(x: usize) -> Option<usize> {
    let r = (x as f64).sqrt().round() as usize;
    (r * r == x).then_some(r)
}
