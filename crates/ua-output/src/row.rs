//! Plain row types of the household and person exports.
//!
//! Field names are the ActivitySim column names.

use serde::Serialize;

/// One row of `households.csv`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HouseholdRow {
    #[serde(rename = "HHID")]
    pub household_id: u64,
    #[serde(rename = "TAZ")]
    pub taz:          u32,
    #[serde(rename = "PERSONS")]
    pub persons:      u32,
    #[serde(rename = "VEHICL")]
    pub cars:         u32,
    pub income:       f64,
    pub workers:      u32,
    #[serde(rename = "HHT")]
    pub hht:          i64,
    pub block_id:     String,
}

/// One row of `persons.csv`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonRow {
    /// Fresh 0-based id in output order.
    pub person_id:    u64,
    pub household_id: u64,
    #[serde(rename = "PNUM")]
    pub member_id:    u32,
    pub age:          u32,
    pub sex:          Option<u8>,
    pub worker:       u8,
    pub student:      u8,
    pub ptype:        i64,
    pub pemploy:      i64,
    pub pstudent:     i64,
    #[serde(rename = "TAZ")]
    pub taz:          u32,
}
