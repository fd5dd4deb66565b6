//! The standard attribute graph: every column the ActivitySim inputs need.
//!
//! # Nodes
//!
//! Per-entity:
//!
//! | Key                                   | Source                                   |
//! |---------------------------------------|------------------------------------------|
//! | `blocks/schools/colleges.TAZ`         | zone assignment engine                   |
//! | `households.TAZ`, `jobs.TAZ`          | `blocks.TAZ` via `block_id`              |
//! | `persons.TAZ`                         | `households.TAZ` via `household_id`      |
//! | `households.HHT`                      | household size                           |
//! | `persons.ptype/pemploy/pstudent`      | age, worker and student flags            |
//! | `blocks.CI_employment`                | jobs in commercial/industrial sectors    |
//! | `blocks.RESACRE`, `blocks.CIACRE`     | capacity share of land area              |
//!
//! Per-zone columns are registered in land-use file order, so
//! `graph.table_keys(TableKind::Zones)` is the column order of
//! `land_use.csv`.

use std::sync::Arc;

use ua_core::ZoneId;
use ua_tables::{College, Household, Job, Person, School};
use ua_zones::Assignment;

use crate::column::{Column, ZoneColumn};
use crate::config::{AttributeConfig, DensityRegression};
use crate::entity::{capacity_acres, ci_employment, hht, inherit_zones, pemploy, pstudent, ptype};
use crate::graph::{Attribute, AttributeGraph, Inputs};
use crate::key::{AttrKey, TableKind};
use crate::zonal::{count_where, ratio, sum_by};
use crate::AttrResult;

use TableKind::{Blocks, Colleges, Households, Jobs, Persons, Schools, Zones};

/// Name of the zone-membership attribute of every entity table.
pub const TAZ: &str = "TAZ";

fn k(table: TableKind, name: &str) -> AttrKey {
    AttrKey::new(table, name)
}

/// Build the standard graph.  Fails if `config` is invalid.
pub fn standard_graph(config: &AttributeConfig) -> AttrResult<AttributeGraph> {
    config.validate()?;
    let cfg = Arc::new(config.clone());
    let mut g = AttributeGraph::new();
    add_zone_membership(&mut g)?;
    add_entity_codes(&mut g)?;
    add_block_acreage(&mut g, &cfg)?;
    add_zone_columns(&mut g, &cfg)?;
    Ok(g)
}

// ── Table accessors ───────────────────────────────────────────────────────────

fn households<'i>(inp: &Inputs<'i>) -> &'i [Household] {
    inp.households
}

fn persons<'i>(inp: &Inputs<'i>) -> &'i [Person] {
    inp.persons
}

fn jobs<'i>(inp: &Inputs<'i>) -> &'i [Job] {
    inp.jobs
}

fn schools<'i>(inp: &Inputs<'i>) -> &'i [School] {
    inp.schools
}

fn colleges<'i>(inp: &Inputs<'i>) -> &'i [College] {
    inp.colleges
}

// ── Zone membership ───────────────────────────────────────────────────────────

fn assigned<K>(table: TableKind, a: Assignment<K>) -> Column {
    let s = a.stats;
    log::info!(
        "{table}: {} assigned, {} direct ({} in overlapping zones), {} by buffer (max {} steps)",
        s.entities,
        s.direct,
        s.overlaps,
        s.buffered,
        s.max_steps_used,
    );
    Column::Zone(ZoneColumn {
        zones: a.zones.into_iter().map(|(_, z)| Some(z)).collect(),
        stats: Some(s),
    })
}

fn inherited(zones: Vec<Option<ZoneId>>) -> Column {
    Column::Zone(ZoneColumn { zones, stats: None })
}

fn add_zone_membership(g: &mut AttributeGraph) -> AttrResult<()> {
    g.add(Attribute::new(k(Blocks, TAZ), vec![], |inp, _| {
        let a = inp
            .assigner
            .assign(inp.zones, inp.blocks.iter().map(|b| (&b.block_id, b.pos())))?;
        Ok(assigned(Blocks, a))
    }))?;
    g.add(Attribute::new(k(Schools, TAZ), vec![], |inp, _| {
        let a = inp
            .assigner
            .assign(inp.zones, inp.schools.iter().map(|s| (&s.ncessch, s.pos())))?;
        Ok(assigned(Schools, a))
    }))?;
    g.add(Attribute::new(k(Colleges, TAZ), vec![], |inp, _| {
        let a = inp
            .assigner
            .assign(inp.zones, inp.colleges.iter().map(|c| (c.unitid, c.pos())))?;
        Ok(assigned(Colleges, a))
    }))?;

    g.add(Attribute::new(k(Households, TAZ), vec![k(Blocks, TAZ)], |inp, cols| {
        let blocks = cols.zone(&k(Blocks, TAZ))?;
        let parents = inp.blocks.iter().map(|b| &b.block_id).zip(blocks.zones.iter().copied());
        Ok(inherited(inherit_zones(parents, inp.households, |h| &h.block_id)))
    }))?;
    g.add(Attribute::new(k(Persons, TAZ), vec![k(Households, TAZ)], |inp, cols| {
        let hh = cols.zone(&k(Households, TAZ))?;
        let parents = inp.households.iter().map(|h| &h.household_id).zip(hh.zones.iter().copied());
        Ok(inherited(inherit_zones(parents, inp.persons, |p| &p.household_id)))
    }))?;
    g.add(Attribute::new(k(Jobs, TAZ), vec![k(Blocks, TAZ)], |inp, cols| {
        let blocks = cols.zone(&k(Blocks, TAZ))?;
        let parents = inp.blocks.iter().map(|b| &b.block_id).zip(blocks.zones.iter().copied());
        Ok(inherited(inherit_zones(parents, inp.jobs, |j| &j.block_id)))
    }))
}

// ── Entity codes ──────────────────────────────────────────────────────────────

fn add_entity_codes(g: &mut AttributeGraph) -> AttrResult<()> {
    g.add(Attribute::new(k(Households, "HHT"), vec![], |inp, _| {
        Ok(Column::Int(inp.households.iter().map(|h| hht(h.persons)).collect()))
    }))?;
    g.add(Attribute::new(k(Persons, "ptype"), vec![], |inp, _| {
        Ok(Column::Int(
            inp.persons
                .iter()
                .map(|p| ptype(p.age, p.is_worker(), p.is_student()))
                .collect(),
        ))
    }))?;
    g.add(Attribute::new(k(Persons, "pemploy"), vec![], |inp, _| {
        Ok(Column::Int(inp.persons.iter().map(|p| pemploy(p.age, p.is_worker())).collect()))
    }))?;
    g.add(Attribute::new(k(Persons, "pstudent"), vec![], |inp, _| {
        Ok(Column::Int(inp.persons.iter().map(|p| pstudent(p.age, p.is_student())).collect()))
    }))
}

// ── Block acreage ─────────────────────────────────────────────────────────────

fn add_block_acreage(g: &mut AttributeGraph, cfg: &Arc<AttributeConfig>) -> AttrResult<()> {
    let c = Arc::clone(cfg);
    g.add(Attribute::new(k(Blocks, "CI_employment"), vec![], move |inp, _| {
        Ok(Column::Float(ci_employment(inp.blocks, inp.jobs, &c)))
    }))?;

    let c = Arc::clone(cfg);
    g.add(Attribute::new(k(Blocks, "RESACRE"), vec![], move |inp, _| {
        Ok(Column::Float(
            inp.blocks
                .iter()
                .map(|b| capacity_acres(b, b.residential_unit_capacity, &c))
                .collect(),
        ))
    }))?;

    let c = Arc::clone(cfg);
    g.add(Attribute::new(k(Blocks, "CIACRE"), vec![k(Blocks, "CI_employment")], move |inp, cols| {
        let ci = cols.float(&k(Blocks, "CI_employment"))?;
        Ok(Column::Float(
            inp.blocks
                .iter()
                .zip(ci)
                .map(|(b, &n)| capacity_acres(b, n, &c))
                .collect(),
        ))
    }))
}

// ── Zone columns ──────────────────────────────────────────────────────────────

/// Rows of `table` per zone that satisfy `pred`.
fn zone_count<T: 'static>(
    g: &mut AttributeGraph,
    name: &str,
    table: TableKind,
    rows: for<'i> fn(&Inputs<'i>) -> &'i [T],
    pred: impl Fn(&T) -> bool + 'static,
) -> AttrResult<()> {
    let taz = k(table, TAZ);
    g.add(Attribute::new(k(Zones, name), vec![taz.clone()], move |inp, cols| {
        let zones = cols.zone(&taz)?;
        Ok(Column::Int(count_where(&zones.zones, rows(inp), inp.zones.len(), &pred)))
    }))
}

/// Sum of `value(row)` over the rows of `table` per zone.
fn zone_sum<T: 'static>(
    g: &mut AttributeGraph,
    name: &str,
    table: TableKind,
    rows: for<'i> fn(&Inputs<'i>) -> &'i [T],
    value: impl Fn(&T) -> f64 + 'static,
) -> AttrResult<()> {
    let taz = k(table, TAZ);
    g.add(Attribute::new(k(Zones, name), vec![taz.clone()], move |inp, cols| {
        let zones = cols.zone(&taz)?;
        Ok(Column::Float(sum_by(&zones.zones, rows(inp), inp.zones.len(), &value)))
    }))
}

/// Sum of the block attribute `block_attr` per zone.
fn zone_block_sum(g: &mut AttributeGraph, name: &str, block_attr: &str) -> AttrResult<()> {
    let taz = k(Blocks, TAZ);
    let attr = k(Blocks, block_attr);
    g.add(Attribute::new(k(Zones, name), vec![taz.clone(), attr.clone()], move |inp, cols| {
        let zones = cols.zone(&taz)?;
        let values = cols.float(&attr)?;
        Ok(Column::Float(sum_by(&zones.zones, values, inp.zones.len(), |v| *v)))
    }))
}

fn zone_constant(g: &mut AttributeGraph, name: &str, value: i64) -> AttrResult<()> {
    g.add(Attribute::new(k(Zones, name), vec![], move |inp, _| {
        Ok(Column::Int(vec![value; inp.zones.len()]))
    }))
}

/// `numerator / TOTACRE`, 0 for zero-acre zones.
fn zone_density(g: &mut AttributeGraph, name: &str, numerator: &str) -> AttrResult<()> {
    let num = k(Zones, numerator);
    let acres = k(Zones, "TOTACRE");
    g.add(Attribute::new(k(Zones, name), vec![num.clone(), acres.clone()], move |_, cols| {
        Ok(Column::Float(ratio(&cols.numeric(&num)?, cols.float(&acres)?)))
    }))
}

fn zone_parking(g: &mut AttributeGraph, name: &str, model: DensityRegression) -> AttrResult<()> {
    let keys = ["pop_density", "hh_density", "hq1_density", "employment_density"].map(|n| k(Zones, n));
    let deps = keys.to_vec();
    g.add(Attribute::new(k(Zones, name), deps, move |_, cols| {
        let [pop, hh, hq1, emp] = [&keys[0], &keys[1], &keys[2], &keys[3]];
        let (pop, hh, hq1, emp) = (cols.float(pop)?, cols.float(hh)?, cols.float(hq1)?, cols.float(emp)?);
        Ok(Column::Float(
            (0..pop.len())
                .map(|i| model.apply(pop[i], hh[i], hq1[i], emp[i]))
                .collect(),
        ))
    }))
}

fn add_zone_columns(g: &mut AttributeGraph, cfg: &Arc<AttributeConfig>) -> AttrResult<()> {
    // ── Households and persons ────────────────────────────────────────────
    zone_count(g, "TOTHH", Households, households, |_| true)?;
    zone_count(g, "HHPOP", Persons, persons, |_| true)?;
    zone_workers(g)?;

    let income_names = cfg.income_bucket_names();
    for (bucket, name) in income_names.iter().enumerate() {
        let c = Arc::clone(cfg);
        zone_count(g, name, Households, households, move |h| c.income_bucket(h.income) == bucket)?;
    }

    for (bucket, b) in cfg.age_buckets.iter().enumerate() {
        let c = Arc::clone(cfg);
        zone_count(g, &b.name, Persons, persons, move |p| c.age_bucket(p.age) == Some(bucket))?;
    }
    let senior_age = cfg.senior_age;
    zone_count(g, "AGE62P", Persons, persons, move |p| p.age >= senior_age)?;

    let (seniors, pop) = (k(Zones, "AGE62P"), k(Zones, "HHPOP"));
    g.add(Attribute::new(k(Zones, "SHPOP62P"), vec![seniors.clone(), pop.clone()], move |_, cols| {
        Ok(Column::Float(ratio(&cols.numeric(&seniors)?, &cols.numeric(&pop)?)))
    }))?;

    // ── Employment ────────────────────────────────────────────────────────
    zone_count(g, "TOTEMP", Jobs, jobs, |_| true)?;
    for (cat, c) in cfg.employment_categories.iter().enumerate() {
        let cf = Arc::clone(cfg);
        zone_count(g, &c.name, Jobs, jobs, move |j| cf.employment_category(j.sector_id) == Some(cat))?;
    }
    let c = Arc::clone(cfg);
    zone_count(g, &cfg.other_employment, Jobs, jobs, move |j| c.employment_category(j.sector_id).is_none())?;

    // ── Land ──────────────────────────────────────────────────────────────
    g.add(Attribute::new(k(Zones, "TOTACRE"), vec![], |inp, _| {
        Ok(Column::Float(inp.zones.iter().map(|z| z.acres()).collect()))
    }))?;
    zone_block_sum(g, "RESACRE", "RESACRE")?;
    zone_block_sum(g, "CIACRE", "CIACRE")?;
    zone_sum(g, "HSENROLL", Schools, schools, |s| s.enrollment)?;
    zone_constant(g, "TOPOLOGY", cfg.constants.topology)?;

    // ── Densities and parking ─────────────────────────────────────────────
    zone_density(g, "employment_density", "TOTEMP")?;
    zone_density(g, "pop_density", "HHPOP")?;
    zone_density(g, "hh_density", "TOTHH")?;
    zone_density(g, "hq1_density", &income_names[0])?;
    zone_parking(g, "PRKCST", cfg.parking.prkcst)?;
    zone_parking(g, "OPRKCST", cfg.parking.oprkcst)?;

    // ── Colleges and constants ────────────────────────────────────────────
    zone_sum(g, "COLLFTE", Colleges, colleges, |c| c.full_time_enrollment)?;
    zone_sum(g, "COLLPTE", Colleges, colleges, |c| c.part_time_enrollment)?;
    zone_constant(g, "area_type", cfg.constants.area_type)?;
    zone_constant(g, "TERMINAL", cfg.constants.terminal)?;
    zone_constant(g, "COUNTY", cfg.constants.county)
}

/// `EMPRES`: workers summed over households.
fn zone_workers(g: &mut AttributeGraph) -> AttrResult<()> {
    let taz = k(Households, TAZ);
    g.add(Attribute::new(k(Zones, "EMPRES"), vec![taz.clone()], move |inp, cols| {
        let zones = cols.zone(&taz)?;
        Ok(Column::Int(sum_by(&zones.zones, inp.households, inp.zones.len(), |h| i64::from(h.workers))))
    }))
}
