//! Unit conversion constants shared by the attribute and skim crates.

/// Square metres in one acre.
pub const SQ_METERS_PER_ACRE: f64 = 4_046.86;

/// Miles in one metre.
pub const MILES_PER_METER: f64 = 0.621_371 / 1_000.0;

/// Seconds in one minute.
pub const SECONDS_PER_MINUTE: f64 = 60.0;

/// Sphere radius used by the Web-Mercator (EPSG:3857) projection, metres.
pub const WEB_MERCATOR_RADIUS_M: f64 = 6_378_137.0;

/// Convert an area in square metres to acres.
#[inline]
pub fn sq_meters_to_acres(sq_m: f64) -> f64 {
    sq_m / SQ_METERS_PER_ACRE
}

/// Convert a distance in metres to miles.
#[inline]
pub fn meters_to_miles(m: f64) -> f64 {
    m * MILES_PER_METER
}

/// Convert a duration in seconds to minutes.
#[inline]
pub fn seconds_to_minutes(s: f64) -> f64 {
    s / SECONDS_PER_MINUTE
}
