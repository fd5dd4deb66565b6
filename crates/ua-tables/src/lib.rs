//! `ua-tables`: entity tables for the `usim2asim` land-use bridge.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`records`]   | `Household`, `Person`, `Block`, `Job`, `School`, `College`  |
//! | [`loader`]    | `load_csv`, `TableStore` (the four UrbanSim tables)         |
//! | [`directory`] | `DirectorySource`, `StaticDirectory`, school/college loading |
//! | [`error`]     | `TableError`, `TableResult<T>`                              |
//!
//! # Feature flags
//!
//! | Flag   | Effect                                                         |
//! |--------|----------------------------------------------------------------|
//! | `http` | Adds `UrbanInstituteClient`, a blocking `reqwest` source.      |

pub mod directory;
pub mod error;
pub mod loader;
pub mod records;

#[cfg(test)]
mod tests;

pub use directory::{
    load_colleges, load_schools, Attendance, CollegeRow, DirectorySource, EnrollmentRow, Level,
    SchoolRow, StaticDirectory,
};
#[cfg(feature = "http")]
pub use directory::UrbanInstituteClient;
pub use error::{TableError, TableResult};
pub use loader::{load_csv, load_csv_reader, TableStore};
pub use records::{Block, College, Household, Job, Person, School};
