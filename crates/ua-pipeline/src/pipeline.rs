//! The end-to-end run.
//!
//! Everything is loaded, checked and computed before the first file is
//! written, so a failing run leaves nothing behind in `output_dir`.
//!
//! ```text
//! LoadSkims          read the OD table; its distinct origin cells are the zones
//! BuildZones         H3 cells → zone polygons + R-tree
//! ReshapeSkims       validate (hour, mode) groups, build the named matrices
//! LoadTables         households, persons, blocks, jobs
//! FetchDirectory     schools and colleges of the blocks' counties
//! ComputeAttributes  the standard attribute graph (zone assignment included)
//! ── outputs ─────────────────────────────────────────────────────────────
//! WriteInputs        households.csv, persons.csv, land_use.csv, zones.geojson
//! WriteSkims         skims.csv or skims.parquet
//! ```

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use ua_attrs::{standard_graph, AttrKey, ColumnStore, Inputs, TableKind};
use ua_output::{
    open_matrix_writer, write_households, write_land_use, write_persons, write_zones_geojson,
    ExportStats, HOUSEHOLDS_FILE, LAND_USE_FILE, PERSONS_FILE, ZONES_FILE,
};
use ua_skims::{load_skims, origin_cells, reshape, SkimRecord, SkimTable};
use ua_tables::{load_colleges, load_schools, College, DirectorySource, School, TableStore};
use ua_zones::{ZoneAssigner, ZoneTable};

use crate::observer::{PipelineObserver, Step};
use crate::{PipelineConfig, PipelineResult};

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub zones:       usize,
    /// `None` when inputs were not created.
    pub households:  Option<ExportStats>,
    pub persons:     Option<ExportStats>,
    /// Entities placed by the buffered search, per spatially assigned table.
    pub buffered:    Vec<(TableKind, usize)>,
    pub matrices:    usize,
    pub zero_filled: usize,
}

/// What `validate` checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub zones:        usize,
    pub skim_records: usize,
    /// `(hour, mode)` groups in the skim table.
    pub skim_groups:  usize,
    pub matrices:     usize,
    pub households:   usize,
    pub persons:      usize,
    pub blocks:       usize,
    pub jobs:         usize,
}

/// Land-use tables and their computed attributes, ready to write.
struct LandUse {
    tables:    TableStore,
    store:     ColumnStore,
    /// `zones.*` columns in land-use order.
    zone_keys: Vec<AttrKey>,
}

/// A configured run.  Build with [`PipelineBuilder`](crate::PipelineBuilder).
pub struct Pipeline {
    pub(crate) config:    PipelineConfig,
    pub(crate) assigner:  ZoneAssigner,
    pub(crate) directory: Option<Box<dyn DirectorySource>>,
}

impl Pipeline {
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every enabled step and write the outputs.
    pub fn run<O: PipelineObserver>(&self, observer: &mut O) -> PipelineResult<RunSummary> {
        let records = step(observer, Step::LoadSkims, || self.load_skims())?;
        let zones = step(observer, Step::BuildZones, || build_zones(&records))?;
        let mut summary = RunSummary { zones: zones.len(), ..RunSummary::default() };

        let skims = if self.config.create_skims {
            Some(step(observer, Step::ReshapeSkims, || {
                let table = SkimTable::new(&records)?;
                Ok(reshape(&table, &self.config.skims)?)
            })?)
        } else {
            log::info!("create_skims is off; skipping skim container");
            None
        };
        drop(records);

        let land_use = if self.config.create_inputs {
            Some(self.compute_inputs(&zones, observer)?)
        } else {
            log::info!("create_inputs is off; skipping land-use outputs");
            None
        };

        if skims.is_some() || land_use.is_some() {
            fs::create_dir_all(&self.config.output_dir)?;
        }

        if let Some(land_use) = &land_use {
            summary.buffered = buffered_counts(&land_use.store);
            step(observer, Step::WriteInputs, || self.write_inputs(&zones, land_use, &mut summary))?;
        }

        if let Some(skims) = &skims {
            step(observer, Step::WriteSkims, || {
                let mut writer = open_matrix_writer(self.config.matrix_format, &self.config.output_dir)?;
                writer.write(skims)?;
                writer.finish()?;
                Ok(())
            })?;
            summary.matrices = skims.len();
            summary.zero_filled = skims.zero_filled;
        }

        observer.on_run_end(&summary);
        Ok(summary)
    }

    /// Load every input and check it without writing anything: the skim
    /// table must be complete and every catalog period must resolve to an
    /// hour; the land-use tables must parse.
    pub fn validate<O: PipelineObserver>(&self, observer: &mut O) -> PipelineResult<ValidationReport> {
        let records = step(observer, Step::LoadSkims, || self.load_skims())?;
        let zones = step(observer, Step::BuildZones, || build_zones(&records))?;

        let (groups, matrices) = step(observer, Step::ReshapeSkims, || {
            let table = SkimTable::new(&records)?;
            let hours: Vec<u32> = table.hours().into_iter().collect();
            let specs = self.config.skims.matrix_specs()?;
            for spec in specs.iter().filter(|s| s.source.is_some()) {
                self.config.skims.resolve_hour(spec.period.as_deref(), &hours)?;
            }
            Ok((table.groups().count(), specs.len()))
        })?;

        let tables = step(observer, Step::LoadTables, || Ok(TableStore::load(&self.config.input_dir)?))?;
        tables.county_codes()?;

        Ok(ValidationReport {
            zones: zones.len(),
            skim_records: records.len(),
            skim_groups: groups,
            matrices,
            households: tables.households.len(),
            persons: tables.persons.len(),
            blocks: tables.blocks.len(),
            jobs: tables.jobs.len(),
        })
    }

    fn load_skims(&self) -> PipelineResult<Vec<SkimRecord>> {
        Ok(load_skims(&self.config.skims_path)?)
    }

    fn compute_inputs<O: PipelineObserver>(&self, zones: &ZoneTable, observer: &mut O) -> PipelineResult<LandUse> {
        let tables = step(observer, Step::LoadTables, || Ok(TableStore::load(&self.config.input_dir)?))?;
        let (schools, colleges) = step(observer, Step::FetchDirectory, || self.fetch_directory(&tables))?;

        let graph = standard_graph(&self.config.attributes)?;
        let store = step(observer, Step::ComputeAttributes, || {
            let inputs = Inputs {
                households: &tables.households,
                persons:    &tables.persons,
                blocks:     &tables.blocks,
                jobs:       &tables.jobs,
                schools:    &schools,
                colleges:   &colleges,
                zones,
                assigner:   &self.assigner,
            };
            Ok(graph.evaluate(&inputs)?)
        })?;
        let zone_keys = graph.table_keys(TableKind::Zones).cloned().collect();
        Ok(LandUse { tables, store, zone_keys })
    }

    fn write_inputs(&self, zones: &ZoneTable, land_use: &LandUse, summary: &mut RunSummary) -> PipelineResult<()> {
        let LandUse { tables, store, zone_keys } = land_use;
        let dir = &self.config.output_dir;
        summary.households = Some(write_file(dir, HOUSEHOLDS_FILE, |w| {
            Ok(write_households(w, &tables.households, store)?)
        })?);
        summary.persons = Some(write_file(dir, PERSONS_FILE, |w| {
            Ok(write_persons(w, &tables.persons, store)?)
        })?);
        write_file(dir, LAND_USE_FILE, |w| Ok(write_land_use(w, zones, zone_keys, store)?))?;
        write_file(dir, ZONES_FILE, |w| Ok(write_zones_geojson(w, zones, zone_keys, store)?))
    }

    fn fetch_directory(&self, tables: &TableStore) -> PipelineResult<(Vec<School>, Vec<College>)> {
        let Some(source) = self.directory.as_deref() else {
            log::info!("directory fetching is disabled; no schools or colleges");
            return Ok((Vec::new(), Vec::new()));
        };
        let counties = tables.county_codes()?;
        let states = tables.state_fips_codes()?;
        let year = self.config.directory.year;
        log::debug!("directory counties {counties:?}, states {states:?}");
        let schools = load_schools(source, year, &counties)?;
        let colleges = load_colleges(source, year, &counties, &states)?;
        Ok((schools, colleges))
    }
}

fn step<O, T>(observer: &mut O, step: Step, f: impl FnOnce() -> PipelineResult<T>) -> PipelineResult<T>
where
    O: PipelineObserver,
{
    observer.on_step_start(step);
    let out = f()?;
    observer.on_step_end(step);
    Ok(out)
}

fn build_zones(records: &[SkimRecord]) -> PipelineResult<ZoneTable> {
    let zones = ZoneTable::from_cells(origin_cells(records))?;
    log::info!("built {} zones", zones.len());
    Ok(zones)
}

fn buffered_counts(store: &ColumnStore) -> Vec<(TableKind, usize)> {
    store
        .iter()
        .filter_map(|(k, c)| match c {
            ua_attrs::Column::Zone(z) => z.stats.map(|s| (k.table, s.buffered)),
            _ => None,
        })
        .collect()
}

fn write_file<T>(
    dir: &Path,
    name: &str,
    write: impl FnOnce(&mut BufWriter<File>) -> PipelineResult<T>,
) -> PipelineResult<T> {
    let path = dir.join(name);
    let mut out = BufWriter::new(File::create(&path)?);
    let value = write(&mut out)?;
    out.flush()?;
    log::info!("wrote {}", path.display());
    Ok(value)
}
