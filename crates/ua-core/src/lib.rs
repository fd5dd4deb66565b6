//! `ua-core`: foundational types for the `usim2asim` land-use bridge.
//!
//! This crate is a dependency of every other `ua-*` crate.  It has no `ua-*`
//! dependencies and only `thiserror` plus optional `serde` externally.
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`ids`]     | `ZoneId`, `HouseholdId`, `PersonId`, `JobId`, `BlockId`   |
//! | [`geo`]     | `LonLat`, Web-Mercator projection                         |
//! | [`units`]   | Conversion constants (acres, miles, minutes)              |
//! | [`error`]   | `UaError`, `UaResult`                                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod units;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{UaError, UaResult};
pub use geo::LonLat;
pub use ids::{BlockId, HouseholdId, JobId, PersonId, ZoneId};
