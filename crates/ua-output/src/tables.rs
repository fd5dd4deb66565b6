//! CSV exports: `households.csv`, `persons.csv`, `land_use.csv`.
//!
//! Households and persons carry their zone from the attribute store; rows
//! whose zone is unknown (their parent block or household is missing) are
//! left out and counted.

use std::io::Write;

use csv::Writer;

use ua_attrs::{AttrError, AttrKey, Column, ColumnStore, TableKind, TAZ};
use ua_tables::{Household, Person};
use ua_zones::ZoneTable;

use crate::row::{HouseholdRow, PersonRow};
use crate::OutputResult;

pub const HOUSEHOLDS_FILE: &str = "households.csv";
pub const PERSONS_FILE: &str = "persons.csv";
pub const LAND_USE_FILE: &str = "land_use.csv";

/// Rows written and rows left out of one export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportStats {
    pub written:  usize,
    pub excluded: usize,
}

fn warn_excluded(table: &str, stats: ExportStats) {
    if stats.excluded > 0 {
        log::warn!("{table}: {} rows have no zone and were not written", stats.excluded);
    }
}

/// Write `households.csv`.
///
/// Needs `households.TAZ` and `households.HHT` in `store`.
pub fn write_households<W: Write>(
    out: W,
    households: &[Household],
    store: &ColumnStore,
) -> OutputResult<ExportStats> {
    let zones = store.zone(&AttrKey::new(TableKind::Households, TAZ))?;
    let hht = store.int(&AttrKey::new(TableKind::Households, "HHT"))?;

    let mut w = Writer::from_writer(out);
    let mut stats = ExportStats::default();
    for ((h, zone), &hht) in households.iter().zip(&zones.zones).zip(hht) {
        let Some(zone) = zone else {
            stats.excluded += 1;
            continue;
        };
        w.serialize(HouseholdRow {
            household_id: h.household_id.0,
            taz:          zone.0,
            persons:      h.persons,
            cars:         h.cars,
            income:       h.income,
            workers:      h.workers,
            hht,
            block_id:     h.block_id.as_str().to_owned(),
        })?;
        stats.written += 1;
    }
    w.flush()?;
    warn_excluded("households", stats);
    Ok(stats)
}

/// Write `persons.csv`.
///
/// Rows are stably sorted by `household_id` and renumbered from 0 in that
/// order.  Needs `persons.TAZ`, `persons.ptype`, `persons.pemploy` and
/// `persons.pstudent` in `store`.
pub fn write_persons<W: Write>(
    out: W,
    persons: &[Person],
    store: &ColumnStore,
) -> OutputResult<ExportStats> {
    let key = |name| AttrKey::new(TableKind::Persons, name);
    let zones = store.zone(&key(TAZ))?;
    let ptype = store.int(&key("ptype"))?;
    let pemploy = store.int(&key("pemploy"))?;
    let pstudent = store.int(&key("pstudent"))?;

    let mut order: Vec<usize> = (0..persons.len()).filter(|&i| zones.zones[i].is_some()).collect();
    order.sort_by_key(|&i| persons[i].household_id);
    let stats = ExportStats {
        written:  order.len(),
        excluded: persons.len() - order.len(),
    };

    let mut w = Writer::from_writer(out);
    for (person_id, &i) in order.iter().enumerate() {
        let p = &persons[i];
        let Some(zone) = zones.zones[i] else { continue };
        w.serialize(PersonRow {
            person_id:    person_id as u64,
            household_id: p.household_id.0,
            member_id:    p.member_id,
            age:          p.age,
            sex:          p.sex,
            worker:       p.worker,
            student:      p.student,
            ptype:        ptype[i],
            pemploy:      pemploy[i],
            pstudent:     pstudent[i],
            taz:          zone.0,
        })?;
    }
    w.flush()?;
    warn_excluded("persons", stats);
    Ok(stats)
}

/// Write `land_use.csv`: `TAZ`, `h3_id`, `area`, then one column per key in
/// the order given.
pub fn write_land_use<'k, W, I>(
    out: W,
    zones: &ZoneTable,
    keys: I,
    store: &ColumnStore,
) -> OutputResult<()>
where
    W: Write,
    I: IntoIterator<Item = &'k AttrKey>,
{
    let columns = lookup_columns(keys, store)?;

    let mut w = Writer::from_writer(out);
    w.write_field(TAZ)?;
    w.write_field("h3_id")?;
    w.write_field("area")?;
    for (k, _) in &columns {
        w.write_field(&k.name)?;
    }
    w.write_record(None::<&[u8]>)?;

    for (i, zone) in zones.iter().enumerate() {
        w.write_field(zone.id.0.to_string())?;
        w.write_field(&zone.h3_id)?;
        w.write_field(zone.area.to_string())?;
        for (_, col) in &columns {
            w.write_field(cell(col, i))?;
        }
        w.write_record(None::<&[u8]>)?;
    }
    w.flush()?;
    log::info!("land use: {} zones, {} attribute columns", zones.len(), columns.len());
    Ok(())
}

/// Pair each key with its column; any key missing from `store` is an error.
pub(crate) fn lookup_columns<'k, 's, I>(keys: I, store: &'s ColumnStore) -> OutputResult<Vec<(&'k AttrKey, &'s Column)>>
where
    I: IntoIterator<Item = &'k AttrKey>,
{
    let columns = keys
        .into_iter()
        .map(|k| store.get(k).map(|c| (k, c)).ok_or_else(|| AttrError::Missing(k.clone())))
        .collect::<Result<_, _>>()?;
    Ok(columns)
}

fn cell(col: &Column, i: usize) -> String {
    match col {
        Column::Float(v) => v[i].to_string(),
        Column::Int(v) => v[i].to_string(),
        Column::Zone(z) => z.zones[i].map(|id| id.0.to_string()).unwrap_or_default(),
    }
}
