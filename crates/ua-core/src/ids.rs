//! Strongly typed identifier wrappers.
//!
//! Integer IDs are `Copy + Ord + Hash` so they can be used as map keys and
//! sorted collection elements without ceremony.  `BlockId` wraps the census
//! GEOID string because its prefix carries the county and state codes.

use std::fmt;

use crate::{UaError, UaResult};

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        $vis struct $name(pub $inner);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$inner> for $name {
            #[inline(always)]
            fn from(n: $inner) -> $name {
                $name(n)
            }
        }
    };
}

typed_id! {
    /// Traffic analysis zone.  Dense and 1-based: the first zone observed in
    /// the skim table is `ZoneId(1)`.
    pub struct ZoneId(u32);
}

typed_id! {
    /// UrbanSim household identifier.
    pub struct HouseholdId(u64);
}

typed_id! {
    /// UrbanSim person identifier.
    pub struct PersonId(u64);
}

typed_id! {
    /// UrbanSim job identifier.
    pub struct JobId(u64);
}

impl ZoneId {
    /// The zone at 0-based position `i` of the zone table.
    #[inline]
    pub fn from_index(i: usize) -> ZoneId {
        ZoneId(i as u32 + 1)
    }

    /// 0-based position in the zone table (and matrix row/column).
    ///
    /// # Panics
    /// Panics in debug mode on `ZoneId(0)`, which is never issued.
    #[inline]
    pub fn index(self) -> usize {
        (self.0 - 1) as usize
    }
}

// ── BlockId ───────────────────────────────────────────────────────────────────

/// Census block GEOID, e.g. `484530011001000`.
///
/// Layout: 2-digit state FIPS, 3-digit county, 6-digit tract, 4-digit block.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BlockId(pub String);

impl BlockId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 5-digit county FIPS code (state + county).
    pub fn county_code(&self) -> UaResult<&str> {
        self.prefix(5)
    }

    /// 2-digit state FIPS code.
    pub fn state_fips(&self) -> UaResult<&str> {
        self.prefix(2)
    }

    fn prefix(&self, len: usize) -> UaResult<&str> {
        self.0
            .get(..len)
            .filter(|p| p.bytes().all(|b| b.is_ascii_digit()))
            .ok_or_else(|| {
                UaError::Parse(format!(
                    "block id {:?} does not start with {len} FIPS digits",
                    self.0
                ))
            })
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
