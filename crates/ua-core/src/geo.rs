//! Geographic coordinate type and projection helpers.
//!
//! `LonLat` stores WGS-84 longitude (`x`) and latitude (`y`) in `f64`.  The
//! zone polygons decoded from H3 cells use the same axis order (GeoJSON
//! order), so points and polygons can be compared without swapping.

use crate::units::WEB_MERCATOR_RADIUS_M;

/// A WGS-84 coordinate in `(x = longitude, y = latitude)` order.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LonLat {
    pub x: f64,
    pub y: f64,
}

impl LonLat {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// `true` if both components are finite (no NaN / ±inf).
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Project onto spherical Web-Mercator (EPSG:3857), returning metres.
    ///
    /// Areas measured in this plane are inflated by `1 / cos²(lat)`; that is
    /// the same distortion every GIS reprojection to 3857 produces, which the
    /// downstream acreage columns expect.
    pub fn to_web_mercator(self) -> (f64, f64) {
        let x = WEB_MERCATOR_RADIUS_M * self.x.to_radians();
        let y = WEB_MERCATOR_RADIUS_M
            * (std::f64::consts::FRAC_PI_4 + self.y.to_radians() * 0.5).tan().ln();
        (x, y)
    }
}

impl std::fmt::Display for LonLat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.x, self.y)
    }
}
