//! CSV table loader.
//!
//! # Input directory
//!
//! ```text
//! data/
//!   households.csv   household_id,block_id,persons,cars,income,workers
//!   persons.csv      person_id,household_id,member_id,age,worker,student[,sex]
//!   blocks.csv       block_id,x,y,residential_unit_capacity,employment_capacity,square_meters_land
//!   jobs.csv         job_id,block_id,sector_id
//! ```
//!
//! Extra columns are ignored, so raw UrbanSim exports load as-is.

use std::io::Read;
use std::path::Path;

use indexmap::IndexSet;
use serde::de::DeserializeOwned;

use crate::records::{Block, Household, Job, Person};
use crate::{TableError, TableResult};

pub const HOUSEHOLDS_FILE: &str = "households.csv";
pub const PERSONS_FILE: &str = "persons.csv";
pub const BLOCKS_FILE: &str = "blocks.csv";
pub const JOBS_FILE: &str = "jobs.csv";

// ── Generic loaders ───────────────────────────────────────────────────────────

/// Deserialize every row of a CSV file into `T`.
///
/// `table` names the table in error messages.
pub fn load_csv<T: DeserializeOwned>(path: &Path, table: &str) -> TableResult<Vec<T>> {
    if !path.is_file() {
        return Err(TableError::MissingFile(path.to_path_buf()));
    }
    let file = std::fs::File::open(path)?;
    load_csv_reader(file, table)
}

/// Like [`load_csv`] but accepts any `Read` source.
pub fn load_csv_reader<T: DeserializeOwned, R: Read>(reader: R, table: &str) -> TableResult<Vec<T>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();
    for (i, result) in csv_reader.deserialize::<T>().enumerate() {
        // +2: header line plus 1-based numbering.
        let row = result.map_err(|e| TableError::Parse {
            table:  table.to_owned(),
            reason: format!("row {}: {e}", i + 2),
        })?;
        rows.push(row);
    }
    log::debug!("loaded {} {table} rows", rows.len());
    Ok(rows)
}

// ── TableStore ────────────────────────────────────────────────────────────────

/// The four UrbanSim tables of one run.
#[derive(Debug, Clone, Default)]
pub struct TableStore {
    pub households: Vec<Household>,
    pub persons:    Vec<Person>,
    pub blocks:     Vec<Block>,
    pub jobs:       Vec<Job>,
}

impl TableStore {
    /// Load all four tables from `dir`.  Every file must exist.
    pub fn load(dir: &Path) -> TableResult<TableStore> {
        let store = TableStore {
            households: load_csv(&dir.join(HOUSEHOLDS_FILE), "households")?,
            persons:    load_csv(&dir.join(PERSONS_FILE), "persons")?,
            blocks:     load_csv(&dir.join(BLOCKS_FILE), "blocks")?,
            jobs:       load_csv(&dir.join(JOBS_FILE), "jobs")?,
        };
        log::info!(
            "loaded {} households, {} persons, {} blocks, {} jobs from {}",
            store.households.len(),
            store.persons.len(),
            store.blocks.len(),
            store.jobs.len(),
            dir.display(),
        );
        Ok(store)
    }

    /// Distinct 5-digit county codes of the blocks, in first-seen order.
    pub fn county_codes(&self) -> TableResult<Vec<String>> {
        let mut seen = IndexSet::new();
        for b in &self.blocks {
            seen.insert(b.block_id.county_code()?.to_owned());
        }
        Ok(seen.into_iter().collect())
    }

    /// Distinct 2-digit state FIPS codes of the blocks, in first-seen order.
    pub fn state_fips_codes(&self) -> TableResult<Vec<String>> {
        let mut seen = IndexSet::new();
        for b in &self.blocks {
            seen.insert(b.block_id.state_fips()?.to_owned());
        }
        Ok(seen.into_iter().collect())
    }
}
