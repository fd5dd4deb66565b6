//! `ua-zones`: zone geometry, spatial indexing, and zone assignment.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                     |
//! |------------|--------------------------------------------------------------|
//! | [`h3`]     | `cell_polygon`: H3 cell id → boundary polygon               |
//! | [`zone`]   | `Zone`, `ZoneTable` (polygons + R-tree), `ZoneTableBuilder`  |
//! | [`assign`] | `ZoneAssigner`, `AssignConfig`, `Assignment`, `AssignStats`  |
//! | [`error`]  | `ZoneError`, `ZoneResult<T>`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `AssignConfig`.          |

pub mod assign;
pub mod error;
pub mod h3;
pub mod zone;

#[cfg(test)]
mod tests;

pub use assign::{AssignConfig, AssignStats, Assignment, Match, ZoneAssigner};
pub use error::{ZoneError, ZoneResult};
pub use h3::cell_polygon;
pub use zone::{Zone, ZoneTable, ZoneTableBuilder};
