//! Zone table and builder.
//!
//! # Data layout
//!
//! Zones are stored in a dense `Vec<Zone>` indexed by `ZoneId::index()`, so
//! zone `i + 1` is always at position `i`.  That is the same position the
//! zone occupies as a row/column of every skim matrix.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) holds each zone's bounding box.  Point lookups
//! use it to shortlist candidate zones before the exact polygon test, and
//! the buffered fallback walks it outward in order of box distance.

use geo::{Area, BoundingRect, Coord, MapCoords, Polygon};
use indexmap::IndexSet;
use rstar::{PointDistance, RTree, RTreeObject, AABB};

use ua_core::units::sq_meters_to_acres;
use ua_core::{LonLat, ZoneId};

use crate::h3::cell_polygon;
use crate::ZoneResult;

// ── R-tree zone entry ─────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a zone's bounding box in `[lon, lat]`.
#[derive(Clone)]
struct ZoneEntry {
    min: [f64; 2],
    max: [f64; 2],
    id:  ZoneId,
}

impl RTreeObject for ZoneEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.min, self.max)
    }
}

impl PointDistance for ZoneEntry {
    /// Squared planar distance from `point` to the bounding box (0 inside).
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = (self.min[0] - point[0]).max(point[0] - self.max[0]).max(0.0);
        let dy = (self.min[1] - point[1]).max(point[1] - self.max[1]).max(0.0);
        dx * dx + dy * dy
    }
}

// ── Zone ──────────────────────────────────────────────────────────────────────

/// One traffic analysis zone.
#[derive(Debug, Clone)]
pub struct Zone {
    pub id: ZoneId,
    /// The H3 cell the zone was decoded from.
    pub h3_id: String,
    /// Boundary in `(lon, lat)` degrees.
    pub polygon: Polygon<f64>,
    /// Planar area in square degrees.  Only meaningful for comparing zones.
    pub area: f64,
}

impl Zone {
    /// Area in acres, measured on the Web-Mercator plane.
    pub fn acres(&self) -> f64 {
        let projected = self.polygon.map_coords(|c| {
            let (x, y) = LonLat::new(c.x, c.y).to_web_mercator();
            Coord { x, y }
        });
        sq_meters_to_acres(projected.unsigned_area())
    }
}

// ── ZoneTable ─────────────────────────────────────────────────────────────────

/// All zones of a run plus a spatial index over their bounding boxes.
///
/// Do not construct directly; use [`ZoneTable::from_cells`] or
/// [`ZoneTableBuilder`].
pub struct ZoneTable {
    zones:       Vec<Zone>,
    spatial_idx: RTree<ZoneEntry>,
}

impl ZoneTable {
    /// Build the zone table from H3 cell ids.
    ///
    /// Duplicate ids are skipped; zone ids are issued densely from 1 in the
    /// order each cell is first seen.  Ids are taken verbatim, so a padded
    /// id fails to decode; the first cell that fails aborts construction.
    pub fn from_cells<I, S>(cells: I) -> ZoneResult<ZoneTable>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let distinct: IndexSet<String> = cells.into_iter().map(|c| c.as_ref().to_owned()).collect();

        let mut builder = ZoneTableBuilder::with_capacity(distinct.len());
        for cell in distinct {
            let polygon = cell_polygon(&cell)?;
            builder.add_zone(cell, polygon);
        }
        let table = builder.build();
        log::debug!("decoded {} zones from H3 cells", table.len());
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn zone(&self, id: ZoneId) -> Option<&Zone> {
        if id.0 == 0 {
            return None;
        }
        self.zones.get(id.index())
    }

    /// All zones in id order.
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn iter(&self) -> impl Iterator<Item = &Zone> + '_ {
        self.zones.iter()
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Zones whose bounding box contains `pos`.  Callers still need the exact
    /// polygon test.
    pub(crate) fn box_candidates(&self, pos: LonLat) -> impl Iterator<Item = &Zone> + '_ {
        self.spatial_idx
            .locate_all_at_point(&[pos.x, pos.y])
            .map(|e| &self.zones[e.id.index()])
    }

    /// Zones whose bounding box lies within `radius` of `pos`, nearest first.
    pub(crate) fn boxes_within(&self, pos: LonLat, radius: f64) -> Vec<&Zone> {
        let point = [pos.x, pos.y];
        let r2 = radius * radius;
        self.spatial_idx
            .nearest_neighbor_iter(&point)
            .take_while(|e| e.distance_2(&point) <= r2)
            .map(|e| &self.zones[e.id.index()])
            .collect()
    }
}

// ── ZoneTableBuilder ──────────────────────────────────────────────────────────

/// Construct a [`ZoneTable`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use geo::polygon;
/// use ua_zones::ZoneTableBuilder;
///
/// let mut b = ZoneTableBuilder::new();
/// let z = b.add_zone("test", polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0)]);
/// let table = b.build();
/// assert_eq!(z.0, 1);
/// assert_eq!(table.len(), 1);
/// ```
pub struct ZoneTableBuilder {
    zones: Vec<Zone>,
}

impl ZoneTableBuilder {
    pub fn new() -> Self {
        Self { zones: Vec::new() }
    }

    pub fn with_capacity(zones: usize) -> Self {
        Self { zones: Vec::with_capacity(zones) }
    }

    /// Add a zone and return its `ZoneId` (sequential from 1).
    pub fn add_zone(&mut self, h3_id: impl Into<String>, polygon: Polygon<f64>) -> ZoneId {
        let id = ZoneId::from_index(self.zones.len());
        let area = polygon.unsigned_area();
        self.zones.push(Zone {
            id,
            h3_id: h3_id.into(),
            polygon,
            area,
        });
        id
    }

    /// Consume the builder and bulk-load the R-tree.
    pub fn build(self) -> ZoneTable {
        let entries: Vec<ZoneEntry> = self
            .zones
            .iter()
            .filter_map(|z| {
                let rect = z.polygon.bounding_rect()?;
                Some(ZoneEntry {
                    min: [rect.min().x, rect.min().y],
                    max: [rect.max().x, rect.max().y],
                    id:  z.id,
                })
            })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        ZoneTable {
            zones: self.zones,
            spatial_idx,
        }
    }
}

impl Default for ZoneTableBuilder {
    fn default() -> Self {
        Self::new()
    }
}
