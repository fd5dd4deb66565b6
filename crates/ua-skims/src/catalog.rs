//! Matrix catalog: which named matrices to build and where each comes from.
//!
//! The defaults reproduce the skim names ActivitySim's example models read:
//!
//! - `DIST`, `DISTWALK`, `DISTBIKE`: one matrix each, no time period.
//! - highway `{path}_{measure}__{period}`, e.g. `SOV_TIME__AM`.
//! - transit `{access}_{line_haul}_{egress}_{measure}__{period}`, e.g.
//!   `WLK_LOC_WLK_TOTIVT__AM`.
//!
//! Measures without a source are written as all-zero matrices.  Everything
//! here is plain data and can be overridden from the run configuration.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::record::SourceColumn;
use crate::{SkimError, SkimResult};

/// A matrix not tied to a time period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedMatrix {
    pub name:   String,
    pub mode:   String,
    pub column: SourceColumn,
}

/// A measure of a matrix family; `source = None` means zero-filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureSpec {
    pub name:   String,
    #[serde(default)]
    pub source: Option<SourceColumn>,
}

impl MeasureSpec {
    fn new(name: &str, source: Option<SourceColumn>) -> Self {
        Self { name: name.to_owned(), source }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighwayFamily {
    /// BEAM mode the values are read from.
    pub mode:     String,
    pub paths:    Vec<String>,
    pub measures: Vec<MeasureSpec>,
}

impl Default for HighwayFamily {
    fn default() -> Self {
        use SourceColumn::*;
        Self {
            mode:     "CAR".into(),
            paths:    strings(&["SOV", "HOV2", "HOV3", "SOVTOLL", "HOV2TOLL", "HOV3TOLL"]),
            measures: vec![
                MeasureSpec::new("TIME", Some(GenCostMin)),
                MeasureSpec::new("DIST", Some(DistMiles)),
                MeasureSpec::new("BTOLL", None),
                MeasureSpec::new("VTOLL", Some(GeneralizedCost)),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitFamily {
    /// BEAM mode the values are read from.  BEAM has no transit skims in
    /// this table, so car values stand in.
    pub mode:      String,
    pub line_haul: Vec<String>,
    pub access:    Vec<String>,
    pub egress:    Vec<String>,
    pub measures:  Vec<MeasureSpec>,
}

impl Default for TransitFamily {
    fn default() -> Self {
        use SourceColumn::*;
        Self {
            mode:      "CAR".into(),
            line_haul: strings(&["COM", "EXP", "HVY", "LOC", "LRF", "TRN"]),
            access:    strings(&["WLK", "DRV"]),
            egress:    strings(&["WLK", "DRV"]),
            measures:  vec![
                MeasureSpec::new("WAIT", None),
                MeasureSpec::new("TOTIVT", Some(GenCostMin)),
                MeasureSpec::new("KEYIVT", None),
                MeasureSpec::new("FERRYIVT", None),
                MeasureSpec::new("FAR", Some(GeneralizedCost)),
                MeasureSpec::new("DTIM", None),
                MeasureSpec::new("DDIST", None),
                MeasureSpec::new("WAUX", None),
                MeasureSpec::new("WEGR", None),
                MeasureSpec::new("WACC", None),
                MeasureSpec::new("IWAIT", None),
                MeasureSpec::new("XWAIT", None),
                MeasureSpec::new("BOARDS", None),
                MeasureSpec::new("IVT", Some(GenCostMin)),
            ],
        }
    }
}

/// Full catalog of output matrices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkimCatalog {
    pub periods:      Vec<String>,
    /// Skim hour to read for each period.
    pub period_hours: IndexMap<String, u32>,
    /// Hour for periods missing from `period_hours` and for fixed matrices.
    pub default_hour: Option<u32>,
    pub fixed:        Vec<FixedMatrix>,
    pub highway:      HighwayFamily,
    pub transit:      TransitFamily,
}

impl Default for SkimCatalog {
    fn default() -> Self {
        let fixed = |name: &str, mode: &str| FixedMatrix {
            name:   name.into(),
            mode:   mode.into(),
            column: SourceColumn::DistMiles,
        };
        Self {
            periods:      strings(&["EA", "AM", "MD", "PM", "EV"]),
            period_hours: IndexMap::new(),
            default_hour: None,
            // No walk skims in BEAM output; bike distance stands in.
            fixed:        vec![fixed("DIST", "CAR"), fixed("DISTWALK", "BIKE"), fixed("DISTBIKE", "BIKE")],
            highway:      HighwayFamily::default(),
            transit:      TransitFamily::default(),
        }
    }
}

/// One fully named output matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixSpec {
    pub name:   String,
    /// `None` for fixed matrices.
    pub period: Option<String>,
    pub mode:   String,
    pub source: Option<SourceColumn>,
}

impl SkimCatalog {
    /// Every output matrix, in write order: fixed matrices, then per period
    /// the highway family followed by the transit family.
    pub fn matrix_specs(&self) -> SkimResult<Vec<MatrixSpec>> {
        let mut specs: IndexMap<String, MatrixSpec> = IndexMap::new();
        let mut push = |spec: MatrixSpec| -> SkimResult<()> {
            if specs.contains_key(&spec.name) {
                return Err(SkimError::DuplicateMatrix(spec.name));
            }
            specs.insert(spec.name.clone(), spec);
            Ok(())
        };

        for f in &self.fixed {
            push(MatrixSpec {
                name:   f.name.clone(),
                period: None,
                mode:   f.mode.clone(),
                source: Some(f.column),
            })?;
        }

        for period in &self.periods {
            for path in &self.highway.paths {
                for m in &self.highway.measures {
                    push(MatrixSpec {
                        name:   format!("{path}_{}__{period}", m.name),
                        period: Some(period.clone()),
                        mode:   self.highway.mode.clone(),
                        source: m.source,
                    })?;
                }
            }
            for line_haul in &self.transit.line_haul {
                for access in &self.transit.access {
                    for egress in &self.transit.egress {
                        for m in &self.transit.measures {
                            push(MatrixSpec {
                                name:   format!("{access}_{line_haul}_{egress}_{}__{period}", m.name),
                                period: Some(period.clone()),
                                mode:   self.transit.mode.clone(),
                                source: m.source,
                            })?;
                        }
                    }
                }
            }
        }

        Ok(specs.into_values().collect())
    }

    /// The skim hour to read for `period` (`None` for fixed matrices).
    ///
    /// Falls back to `default_hour`, then to the only hour in `hours`.
    pub fn resolve_hour(&self, period: Option<&str>, hours: &[u32]) -> SkimResult<u32> {
        if let Some(h) = period.and_then(|p| self.period_hours.get(p)) {
            return Ok(*h);
        }
        if let Some(h) = self.default_hour {
            return Ok(h);
        }
        match hours {
            [h] => Ok(*h),
            _ => Err(SkimError::AmbiguousHour {
                period: period.unwrap_or("fixed matrices").to_owned(),
                hours:  hours.to_vec(),
            }),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
