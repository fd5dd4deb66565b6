//! School and college directory data.
//!
//! Schools come from the Common Core of Data directory, colleges from the
//! IPEDS directory plus its fall-enrollment tables, both served by the Urban
//! Institute Education Data API:
//!
//! | Data               | Endpoint (relative to the base URL)                                   |
//! |--------------------|-----------------------------------------------------------------------|
//! | schools            | `schools/ccd/directory/{year}/?county_code={county}`                   |
//! | colleges           | `college-university/ipeds/directory/{year}/?county_fips={county}`      |
//! | college enrollment | `college-university/ipeds/fall-enrollment/{year}/{level}/?ftpt=…&fips={state}` |
//!
//! [`DirectorySource`] abstracts the transport.  [`UrbanInstituteClient`]
//! (feature `http`) talks to the live API; [`StaticDirectory`] serves rows
//! held in memory.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::records::{College, School};
use crate::TableResult;

pub const DEFAULT_BASE_URL: &str = "https://educationdata.urban.org/api/v1";
pub const DEFAULT_YEAR: u16 = 2015;

// ── Query parameters ──────────────────────────────────────────────────────────

/// IPEDS enrollment level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Undergraduate,
    Graduate,
}

impl Level {
    pub const ALL: [Level; 2] = [Level::Undergraduate, Level::Graduate];

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Undergraduate => "undergraduate",
            Level::Graduate => "graduate",
        }
    }
}

/// IPEDS full-time / part-time status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attendance {
    FullTime,
    PartTime,
}

impl Attendance {
    /// The `ftpt` query code.
    pub fn code(self) -> u8 {
        match self {
            Attendance::FullTime => 1,
            Attendance::PartTime => 2,
        }
    }
}

pub fn schools_url(base: &str, year: u16, county: &str) -> String {
    format!("{}/schools/ccd/directory/{year}/?county_code={county}", base.trim_end_matches('/'))
}

pub fn colleges_url(base: &str, year: u16, county: &str) -> String {
    format!(
        "{}/college-university/ipeds/directory/{year}/?county_fips={county}",
        base.trim_end_matches('/')
    )
}

/// Totals over sex, race, class level and degree-seeking status (`99`).
pub fn enrollment_url(base: &str, year: u16, level: Level, attendance: Attendance, state: &str) -> String {
    format!(
        "{}/college-university/ipeds/fall-enrollment/{year}/{}/?ftpt={}&sex=99&race=99&class_level=99&degree_seeking=99&fips={state}",
        base.trim_end_matches('/'),
        level.as_str(),
        attendance.code(),
    )
}

// ── Raw API rows ──────────────────────────────────────────────────────────────

/// One school as returned by the directory endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolRow {
    #[serde(deserialize_with = "string_or_number")]
    pub ncessch:     String,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub county_code: Option<String>,
    #[serde(default)]
    pub latitude:    Option<f64>,
    #[serde(default)]
    pub longitude:   Option<f64>,
    #[serde(default)]
    pub enrollment:  Option<f64>,
}

/// One institution as returned by the IPEDS directory endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollegeRow {
    pub unitid:    u64,
    #[serde(default)]
    pub inst_name: String,
    #[serde(default)]
    pub latitude:  Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

/// One `(institution, level, attendance)` enrollment count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollmentRow {
    pub unitid:          u64,
    #[serde(default)]
    pub enrollment_fall: Option<f64>,
}

// The API is not consistent about quoting identifier columns.
fn string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    opt_string_or_number(d)?.ok_or_else(|| de::Error::custom("expected a string or number, got null"))
}

fn opt_string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    match serde_json::Value::deserialize(d)? {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::String(s) => Ok(Some(s)),
        serde_json::Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(de::Error::custom(format!("expected a string or number, got {other}"))),
    }
}

/// Count fields use negative values as "missing" codes.
fn count(v: Option<f64>) -> Option<f64> {
    v.filter(|n| n.is_finite() && *n >= 0.0)
}

// ── DirectorySource ───────────────────────────────────────────────────────────

/// Where school and college rows come from.
pub trait DirectorySource {
    fn schools(&self, year: u16, county: &str) -> TableResult<Vec<SchoolRow>>;

    fn colleges(&self, year: u16, county: &str) -> TableResult<Vec<CollegeRow>>;

    fn enrollment(
        &self,
        year: u16,
        level: Level,
        attendance: Attendance,
        state: &str,
    ) -> TableResult<Vec<EnrollmentRow>>;
}

// ── StaticDirectory ───────────────────────────────────────────────────────────

/// In-memory [`DirectorySource`].  Unknown counties and states yield no rows.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    schools:    HashMap<String, Vec<SchoolRow>>,
    colleges:   HashMap<String, Vec<CollegeRow>>,
    enrollment: HashMap<(String, Level, Attendance), Vec<EnrollmentRow>>,
}

impl StaticDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_school(mut self, county: &str, row: SchoolRow) -> Self {
        self.schools.entry(county.to_owned()).or_default().push(row);
        self
    }

    pub fn with_college(mut self, county: &str, row: CollegeRow) -> Self {
        self.colleges.entry(county.to_owned()).or_default().push(row);
        self
    }

    pub fn with_enrollment(
        mut self,
        state: &str,
        level: Level,
        attendance: Attendance,
        row: EnrollmentRow,
    ) -> Self {
        self.enrollment
            .entry((state.to_owned(), level, attendance))
            .or_default()
            .push(row);
        self
    }
}

impl DirectorySource for StaticDirectory {
    fn schools(&self, _year: u16, county: &str) -> TableResult<Vec<SchoolRow>> {
        Ok(self.schools.get(county).cloned().unwrap_or_default())
    }

    fn colleges(&self, _year: u16, county: &str) -> TableResult<Vec<CollegeRow>> {
        Ok(self.colleges.get(county).cloned().unwrap_or_default())
    }

    fn enrollment(
        &self,
        _year: u16,
        level: Level,
        attendance: Attendance,
        state: &str,
    ) -> TableResult<Vec<EnrollmentRow>> {
        Ok(self
            .enrollment
            .get(&(state.to_owned(), level, attendance))
            .cloned()
            .unwrap_or_default())
    }
}

// ── UrbanInstituteClient ──────────────────────────────────────────────────────

#[cfg(feature = "http")]
pub use http::UrbanInstituteClient;

#[cfg(feature = "http")]
mod http {
    use reqwest::blocking::Client;
    use serde::de::DeserializeOwned;
    use serde::Deserialize;

    use super::*;
    use crate::TableError;

    /// One page of an Education Data API response.
    #[derive(Deserialize)]
    struct Page<T> {
        #[serde(default)]
        next:    Option<String>,
        results: Vec<T>,
    }

    /// Blocking client for the Education Data API.  Requests are not retried.
    pub struct UrbanInstituteClient {
        client:   Client,
        base_url: String,
    }

    impl UrbanInstituteClient {
        pub fn new(base_url: impl Into<String>) -> Self {
            Self {
                client:   Client::new(),
                base_url: base_url.into(),
            }
        }

        /// Fetch `url` and every page its `next` links lead to.
        fn fetch_all<T: DeserializeOwned>(&self, url: String) -> TableResult<Vec<T>> {
            let mut rows = Vec::new();
            let mut next = Some(url);
            while let Some(url) = next.take() {
                log::debug!("GET {url}");
                let page: Page<T> = self
                    .client
                    .get(&url)
                    .send()
                    .and_then(|r| r.error_for_status())
                    .and_then(|r| r.json())
                    .map_err(|e| TableError::Fetch {
                        url:    url.clone(),
                        reason: e.to_string(),
                    })?;
                rows.extend(page.results);
                next = page.next.filter(|n| *n != url);
            }
            Ok(rows)
        }
    }

    impl DirectorySource for UrbanInstituteClient {
        fn schools(&self, year: u16, county: &str) -> TableResult<Vec<SchoolRow>> {
            self.fetch_all(schools_url(&self.base_url, year, county))
        }

        fn colleges(&self, year: u16, county: &str) -> TableResult<Vec<CollegeRow>> {
            self.fetch_all(colleges_url(&self.base_url, year, county))
        }

        fn enrollment(
            &self,
            year: u16,
            level: Level,
            attendance: Attendance,
            state: &str,
        ) -> TableResult<Vec<EnrollmentRow>> {
            self.fetch_all(enrollment_url(&self.base_url, year, level, attendance, state))
        }
    }
}

// ── Table builders ────────────────────────────────────────────────────────────

/// Fetch the schools of every county.
///
/// Schools missing a coordinate or an enrollment count are dropped.
pub fn load_schools(
    source: &dyn DirectorySource,
    year: u16,
    counties: &[String],
) -> TableResult<Vec<School>> {
    let mut schools = Vec::new();
    let mut dropped = 0usize;
    for county in counties {
        for row in source.schools(year, county)? {
            match (row.longitude, row.latitude, count(row.enrollment)) {
                (Some(x), Some(y), Some(enrollment)) if x.is_finite() && y.is_finite() => {
                    schools.push(School {
                        ncessch: row.ncessch,
                        county_code: row.county_code.unwrap_or_else(|| county.clone()),
                        x,
                        y,
                        enrollment,
                    });
                }
                _ => dropped += 1,
            }
        }
    }
    log::info!("fetched {} schools ({dropped} dropped for missing data)", schools.len());
    Ok(schools)
}

/// Fetch the colleges of every county and attach fall enrollment.
///
/// Full-time enrollment is undergraduate plus graduate with `ftpt=1`,
/// part-time likewise with `ftpt=2`; a level with no count adds 0.
/// Institutions listed under several counties are kept once.  Colleges
/// without coordinates are dropped.
pub fn load_colleges(
    source: &dyn DirectorySource,
    year: u16,
    counties: &[String],
    states: &[String],
) -> TableResult<Vec<College>> {
    let mut directory: IndexMap<u64, CollegeRow> = IndexMap::new();
    for county in counties {
        for row in source.colleges(year, county)? {
            directory.entry(row.unitid).or_insert(row);
        }
    }

    let full_time = enrollment_totals(source, year, Attendance::FullTime, states)?;
    let part_time = enrollment_totals(source, year, Attendance::PartTime, states)?;

    let mut dropped = 0usize;
    let colleges: Vec<College> = directory
        .into_values()
        .filter_map(|row| match (row.longitude, row.latitude) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some(College {
                unitid: row.unitid,
                full_time_enrollment: full_time.get(&row.unitid).copied().unwrap_or(0.0),
                part_time_enrollment: part_time.get(&row.unitid).copied().unwrap_or(0.0),
                inst_name: row.inst_name,
                x,
                y,
            }),
            _ => {
                dropped += 1;
                None
            }
        })
        .collect();
    log::info!("fetched {} colleges ({dropped} dropped for missing coordinates)", colleges.len());
    Ok(colleges)
}

fn enrollment_totals(
    source: &dyn DirectorySource,
    year: u16,
    attendance: Attendance,
    states: &[String],
) -> TableResult<HashMap<u64, f64>> {
    let mut totals: HashMap<u64, f64> = HashMap::new();
    for state in states {
        for level in Level::ALL {
            for row in source.enrollment(year, level, attendance, state)? {
                if let Some(n) = count(row.enrollment_fall) {
                    *totals.entry(row.unitid).or_default() += n;
                }
            }
        }
    }
    Ok(totals)
}
