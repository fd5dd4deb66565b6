//! `zones.geojson`: one polygon feature per zone.

use std::io::Write;

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};

use ua_attrs::{AttrKey, Column, ColumnStore, TAZ};
use ua_zones::ZoneTable;

use crate::tables::lookup_columns;
use crate::OutputResult;

pub const ZONES_FILE: &str = "zones.geojson";

/// Write the zone polygons with properties `TAZ`, `h3_id`, `area`, then
/// one property per key in the order given (the land-use columns).
///
/// Integer columns become JSON integers and float columns JSON numbers.
pub fn write_zones_geojson<'k, W, I>(out: W, zones: &ZoneTable, keys: I, store: &ColumnStore) -> OutputResult<()>
where
    W: Write,
    I: IntoIterator<Item = &'k AttrKey>,
{
    let columns = lookup_columns(keys, store)?;

    let features = zones
        .iter()
        .enumerate()
        .map(|(i, zone)| {
            let mut properties = JsonObject::new();
            properties.insert(TAZ.into(), zone.id.0.into());
            properties.insert("h3_id".into(), zone.h3_id.clone().into());
            properties.insert("area".into(), zone.area.into());
            for (key, col) in &columns {
                properties.insert(key.name.clone(), property(col, i));
            }
            Feature {
                bbox:            None,
                geometry:        Some(Geometry::new(Value::from(&zone.polygon))),
                id:              None,
                properties:      Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    let collection = FeatureCollection { bbox: None, features, foreign_members: None };
    serde_json::to_writer(out, &collection)?;
    Ok(())
}

fn property(col: &Column, i: usize) -> JsonValue {
    match col {
        Column::Float(v) => v[i].into(),
        Column::Int(v) => v[i].into(),
        Column::Zone(z) => z.zones[i].map_or(JsonValue::Null, |id| id.0.into()),
    }
}
