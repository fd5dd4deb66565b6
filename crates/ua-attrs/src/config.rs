//! Attribute settings.
//!
//! Every threshold, sector list and coefficient the attribute graph uses is
//! named here.  All fields have defaults, so an empty `[attributes]` table
//! in the run configuration reproduces the standard ActivitySim land-use
//! columns.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use ua_core::units::SQ_METERS_PER_ACRE;

use crate::{AttrError, AttrResult};

/// Persons aged `min_age` up to the next bucket's `min_age` (exclusive).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeBucket {
    pub name:    String,
    pub min_age: u32,
}

/// Jobs whose `sector_id` is in `sectors`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmploymentCategory {
    pub name:    String,
    pub sectors: Vec<u32>,
}

/// `max(0, Σ coefficient · density)`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DensityRegression {
    pub pop_density:        f64,
    pub hh_density:         f64,
    pub hq1_density:        f64,
    pub employment_density: f64,
}

impl DensityRegression {
    pub fn apply(&self, pop: f64, hh: f64, hq1: f64, emp: f64) -> f64 {
        let v = self.pop_density * pop
            + self.hh_density * hh
            + self.hq1_density * hq1
            + self.employment_density * emp;
        if v > 0.0 { v } else { 0.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParkingConfig {
    /// Hourly parking cost.
    pub prkcst:  DensityRegression,
    /// Daily parking cost.
    pub oprkcst: DensityRegression,
}

impl Default for ParkingConfig {
    fn default() -> Self {
        Self {
            prkcst:  DensityRegression {
                pop_density:        -1.921_687_43,
                hh_density:         4.895_114_03,
                hq1_density:        4.277_200_1,
                employment_density: 0.657_846_43,
            },
            oprkcst: DensityRegression {
                pop_density:        -6.178_335_44,
                hh_density:         17.551_557_03,
                hq1_density:        0.0,
                employment_density: 2.078_646_6,
            },
        }
    }
}

/// Columns written with the same value for every zone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneConstants {
    pub topology:  i64,
    pub area_type: i64,
    pub terminal:  i64,
    pub county:    i64,
}

impl Default for ZoneConstants {
    fn default() -> Self {
        Self {
            topology:  1,
            area_type: 0,
            terminal:  0,
            county:    1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeConfig {
    /// Ascending by `min_age`; the last bucket is open-ended.
    pub age_buckets:            Vec<AgeBucket>,
    /// Persons at or above this age count towards `AGE62P`.
    pub senior_age:             u32,
    /// Ascending; `k` thresholds give `HHINCQ1..=HHINCQ{k+1}`.
    pub income_thresholds:      Vec<f64>,
    /// Must not share sector codes.
    pub employment_categories:  Vec<EmploymentCategory>,
    /// Jobs in no category.
    pub other_employment:       String,
    /// Commercial/industrial sectors counted per block for `CIACRE`.
    pub ci_sectors:             Vec<u32>,
    /// Block acreage when the block has no capacity at all.
    pub acreage_fallback:       f64,
    /// `CI_employment` of blocks without commercial/industrial jobs.
    pub ci_employment_fallback: f64,
    pub sq_meters_per_acre:     f64,
    pub parking:                ParkingConfig,
    pub constants:              ZoneConstants,
}

impl Default for AttributeConfig {
    fn default() -> Self {
        let bucket = |name: &str, min_age| AgeBucket { name: name.into(), min_age };
        let category = |name: &str, sectors: &[u32]| EmploymentCategory {
            name:    name.into(),
            sectors: sectors.to_vec(),
        };
        Self {
            age_buckets:            vec![
                bucket("AGE0004", 0),
                bucket("AGE0519", 5),
                bucket("AGE2044", 20),
                bucket("AGE4564", 45),
                bucket("AGE65P", 65),
            ],
            senior_age:             62,
            income_thresholds:      vec![30_000.0, 60_000.0, 100_000.0],
            employment_categories:  vec![
                category("RETEMPN", &[4445]),
                category("FPSEMPN", &[52, 54]),
                category("HEREMPN", &[61, 62, 71]),
                category("AGREMPN", &[11]),
                category("MWTEMPN", &[42, 3133, 32, 4849]),
            ],
            other_employment:       "OTHEMPN".into(),
            ci_sectors:             vec![11, 3133, 42, 4445, 4849, 52, 54, 7172],
            acreage_fallback:       0.01,
            ci_employment_fallback: 0.01,
            sq_meters_per_acre:     SQ_METERS_PER_ACRE,
            parking:                ParkingConfig::default(),
            constants:              ZoneConstants::default(),
        }
    }
}

impl AttributeConfig {
    pub fn validate(&self) -> AttrResult<()> {
        if self.age_buckets.is_empty() {
            return Err(AttrError::Config("age_buckets must not be empty".into()));
        }
        if self.age_buckets.windows(2).any(|w| w[0].min_age >= w[1].min_age) {
            return Err(AttrError::Config("age_buckets must be strictly ascending by min_age".into()));
        }
        if self.income_thresholds.iter().any(|t| !t.is_finite())
            || self.income_thresholds.windows(2).any(|w| w[0] >= w[1])
        {
            return Err(AttrError::Config(
                "income_thresholds must be finite and strictly ascending".into(),
            ));
        }
        if !(self.sq_meters_per_acre > 0.0) {
            return Err(AttrError::Config("sq_meters_per_acre must be positive".into()));
        }

        let mut owner: HashMap<u32, &str> = HashMap::new();
        for cat in &self.employment_categories {
            if cat.name == self.other_employment {
                return Err(AttrError::Config(format!(
                    "employment category {} clashes with other_employment",
                    cat.name
                )));
            }
            for &sector in &cat.sectors {
                if let Some(prev) = owner.insert(sector, &cat.name) {
                    return Err(AttrError::Config(format!(
                        "sector {sector} is in both {prev} and {}",
                        cat.name
                    )));
                }
            }
        }
        Ok(())
    }

    /// Income bucket names, `HHINCQ1` upwards.
    pub fn income_bucket_names(&self) -> Vec<String> {
        (1..=self.income_thresholds.len() + 1).map(|k| format!("HHINCQ{k}")).collect()
    }

    /// 0-based income bucket.  Thresholds are lower bounds of the next
    /// bucket; non-finite incomes land in the first.
    pub fn income_bucket(&self, income: f64) -> usize {
        self.income_thresholds.partition_point(|t| *t <= income)
    }

    /// 0-based age bucket, or `None` below the first bucket.
    pub fn age_bucket(&self, age: u32) -> Option<usize> {
        self.age_buckets.partition_point(|b| b.min_age <= age).checked_sub(1)
    }

    /// Employment category of a sector: its index, or `None` for "other".
    pub fn employment_category(&self, sector: u32) -> Option<usize> {
        self.employment_categories
            .iter()
            .position(|c| c.sectors.contains(&sector))
    }
}
