//! Entity records.
//!
//! Field names follow the UrbanSim export columns so rows deserialize
//! straight from the CSV headers.  Columns not listed here are ignored.

use serde::{Deserialize, Serialize};

use ua_core::{BlockId, HouseholdId, JobId, LonLat, PersonId};

/// A household.  Has no coordinates; it sits in its block's zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Household {
    pub household_id: HouseholdId,
    pub block_id:     BlockId,
    pub persons:      u32,
    pub cars:         u32,
    pub income:       f64,
    pub workers:      u32,
}

/// A person.  Sits in its household's zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub person_id:    PersonId,
    pub household_id: HouseholdId,
    /// 1-based position within the household.
    pub member_id:    u32,
    pub age:          u32,
    /// 1 = employed.
    pub worker:       u8,
    /// 1 = enrolled.
    pub student:      u8,
    #[serde(default)]
    pub sex:          Option<u8>,
}

impl Person {
    pub fn is_worker(&self) -> bool {
        self.worker == 1
    }

    pub fn is_student(&self) -> bool {
        self.student == 1
    }
}

/// A census block: the only UrbanSim table with coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub block_id:                  BlockId,
    pub x:                         f64,
    pub y:                         f64,
    pub residential_unit_capacity: f64,
    pub employment_capacity:       f64,
    pub square_meters_land:        f64,
}

impl Block {
    pub fn pos(&self) -> LonLat {
        LonLat::new(self.x, self.y)
    }
}

/// A job.  Sits in its block's zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub job_id:    JobId,
    pub block_id:  BlockId,
    pub sector_id: u32,
}

/// A K-12 school from the Common Core of Data directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct School {
    pub ncessch:     String,
    pub county_code: String,
    pub x:           f64,
    pub y:           f64,
    pub enrollment:  f64,
}

impl School {
    pub fn pos(&self) -> LonLat {
        LonLat::new(self.x, self.y)
    }
}

/// A post-secondary institution from the IPEDS directory, with fall
/// enrollment summed over undergraduate and graduate levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct College {
    pub unitid:               u64,
    pub inst_name:            String,
    pub x:                    f64,
    pub y:                    f64,
    pub full_time_enrollment: f64,
    pub part_time_enrollment: f64,
}

impl College {
    pub fn pos(&self) -> LonLat {
        LonLat::new(self.x, self.y)
    }
}
