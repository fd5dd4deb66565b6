//! Per-entity derived values.
//!
//! Codes follow the ActivitySim example model conventions.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use ua_core::ZoneId;
use ua_tables::{Block, Job};

use crate::config::AttributeConfig;

/// Household type: 1 for single-person households, 4 otherwise.
pub fn hht(persons: u32) -> i64 {
    if persons == 1 { 1 } else { 4 }
}

/// Person type.  First match wins:
///
/// | Code | Rule                                   |
/// |------|----------------------------------------|
/// | 1    | 18+, worker, not a student             |
/// | 3    | 18+, student                           |
/// | 4    | 18–64, neither worker nor student      |
/// | 5    | 65+, neither worker nor student        |
/// | 6    | 16–17                                  |
/// | 7    | 6–16                                   |
/// | 8    | 0–5                                    |
/// | 0    | anything else                          |
pub fn ptype(age: u32, worker: bool, student: bool) -> i64 {
    match (age, worker, student) {
        (18.., true, false) => 1,
        (18.., _, true) => 3,
        (18..=64, false, false) => 4,
        (65.., false, false) => 5,
        (16..=17, _, _) => 6,
        (6..=16, _, _) => 7,
        (0..=5, _, _) => 8,
        _ => 0,
    }
}

/// Employment status: 1 employed 16+, 3 not employed 16+, 4 under 16.
pub fn pemploy(age: u32, worker: bool) -> i64 {
    match (age, worker) {
        (16.., true) => 1,
        (16.., false) => 3,
        _ => 4,
    }
}

/// Student status: 1 for 18 and under, 2 older students, 3 non-students.
pub fn pstudent(age: u32, student: bool) -> i64 {
    match (age, student) {
        (..=18, _) => 1,
        (_, true) => 2,
        (_, false) => 3,
    }
}

/// Zone of each child row, looked up through its parent's key.
///
/// Children whose parent is absent (or itself unassigned) get `None`.
pub fn inherit_zones<'a, K, C>(
    parents: impl IntoIterator<Item = (&'a K, Option<ZoneId>)>,
    children: &'a [C],
    parent_of: impl Fn(&'a C) -> &'a K,
) -> Vec<Option<ZoneId>>
where
    K: Eq + Hash + 'a,
{
    let lookup: FxHashMap<&K, Option<ZoneId>> = parents.into_iter().collect();
    children
        .iter()
        .map(|c| lookup.get(parent_of(c)).copied().flatten())
        .collect()
}

/// Number of commercial/industrial jobs per block, in block order.
/// Blocks without any get the configured fallback.
pub fn ci_employment(blocks: &[Block], jobs: &[Job], config: &AttributeConfig) -> Vec<f64> {
    let mut per_block: FxHashMap<&str, u64> = FxHashMap::default();
    for job in jobs.iter().filter(|j| config.ci_sectors.contains(&j.sector_id)) {
        *per_block.entry(job.block_id.as_str()).or_default() += 1;
    }
    blocks
        .iter()
        .map(|b| match per_block.get(b.block_id.as_str()) {
            Some(&n) if n > 0 => n as f64,
            _ => config.ci_employment_fallback,
        })
        .collect()
}

/// Acres of `block` attributable to `share` units of its total capacity
/// (residential units plus employment capacity).
///
/// A block with no capacity at all gets the acreage fallback.
pub fn capacity_acres(block: &Block, share: f64, config: &AttributeConfig) -> f64 {
    let total = block.residential_unit_capacity + block.employment_capacity;
    let acres = share / total * block.square_meters_land / config.sq_meters_per_acre;
    if total == 0.0 || !acres.is_finite() {
        config.acreage_fallback
    } else {
        acres
    }
}
