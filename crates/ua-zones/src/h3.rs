//! H3 cell decoding.

use geo::{Coord, LineString, Polygon};
use h3o::CellIndex;

use crate::{ZoneError, ZoneResult};

/// Decode a hexadecimal H3 cell id into its boundary polygon.
///
/// Vertices are `(longitude, latitude)` degrees (GeoJSON order) and the
/// exterior ring is closed.  Pentagons yield five vertices, hexagons six
/// (more when the cell crosses an icosahedron edge).
pub fn cell_polygon(cell: &str) -> ZoneResult<Polygon<f64>> {
    let index = cell
        .parse::<CellIndex>()
        .map_err(|e| ZoneError::InvalidCell {
            cell:   cell.to_owned(),
            reason: e.to_string(),
        })?;

    let boundary = index.boundary();
    let coords: Vec<Coord<f64>> = boundary
        .iter()
        .map(|ll| Coord { x: ll.lng(), y: ll.lat() })
        .collect();

    if coords.len() < 3 {
        return Err(ZoneError::InvalidCell {
            cell:   cell.to_owned(),
            reason: format!("boundary has only {} vertices", coords.len()),
        });
    }

    // LineString::from does not close the ring; Polygon::new does.
    Ok(Polygon::new(LineString::from(coords), vec![]))
}
