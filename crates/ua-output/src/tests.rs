//! Unit tests for ua-output.

#[cfg(test)]
mod fixture {
    use geo::polygon;
    use indexmap::IndexMap;
    use ua_attrs::{AttrKey, Column, ColumnStore, ZoneColumn};
    use ua_core::{BlockId, HouseholdId, PersonId, ZoneId};
    use ua_skims::{Matrix, SkimMatrices};
    use ua_tables::{Household, Person};
    use ua_zones::{ZoneTable, ZoneTableBuilder};

    pub fn zones() -> ZoneTable {
        let mut b = ZoneTableBuilder::new();
        b.add_zone("z1", polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0), (x: 0.0, y: 1.0)]);
        b.add_zone("z2", polygon![(x: 1.0, y: 0.0), (x: 2.0, y: 0.0), (x: 2.0, y: 1.0), (x: 1.0, y: 1.0)]);
        b.build()
    }

    pub fn households() -> Vec<Household> {
        (1..=3)
            .map(|i| Household {
                household_id: HouseholdId(i),
                block_id:     BlockId::new(format!("48001000100100{i}")),
                persons:      i as u32,
                cars:         1,
                income:       25_000.5,
                workers:      1,
            })
            .collect()
    }

    /// Household ids out of order; the last person has no zone.
    pub fn persons() -> Vec<Person> {
        [(10, 2, 1), (11, 1, 1), (12, 2, 2), (13, 9, 1)]
            .into_iter()
            .map(|(id, hh, member)| Person {
                person_id:    PersonId(id),
                household_id: HouseholdId(hh),
                member_id:    member,
                age:          30 + id as u32,
                worker:       1,
                student:      0,
                sex:          if id == 11 { None } else { Some(2) },
            })
            .collect()
    }

    fn zone_col(zones: &[Option<u32>]) -> Column {
        Column::Zone(ZoneColumn { zones: zones.iter().map(|z| z.map(ZoneId)).collect(), stats: None })
    }

    pub fn store() -> ColumnStore {
        let mut s = ColumnStore::new();
        let k = |s: &str| s.parse::<AttrKey>().unwrap();
        s.insert(k("households.TAZ"), zone_col(&[Some(1), None, Some(2)]));
        s.insert(k("households.HHT"), Column::Int(vec![1, 4, 4]));
        s.insert(k("persons.TAZ"), zone_col(&[Some(1), Some(2), Some(1), None]));
        s.insert(k("persons.ptype"), Column::Int(vec![1, 2, 3, 4]));
        s.insert(k("persons.pemploy"), Column::Int(vec![1, 1, 1, 1]));
        s.insert(k("persons.pstudent"), Column::Int(vec![3, 3, 3, 3]));
        s.insert(k("zones.TOTHH"), Column::Int(vec![1, 1]));
        s.insert(k("zones.TOTACRE"), Column::Float(vec![1.5, 2.25]));
        s.insert(k("zones.PRKCST"), Column::Float(vec![0.0, 3.5]));
        s
    }

    /// `A` holds 1..=4 row-major, `B` is zero-filled.
    pub fn skims() -> SkimMatrices {
        let mut matrices = IndexMap::new();
        matrices.insert("A".to_string(), Matrix::from_vec(2, vec![1.0, 2.0, 3.0, 4.0]));
        matrices.insert("B".to_string(), Matrix::zeros(2));
        SkimMatrices { n: 2, matrices, zero_filled: 1 }
    }

    pub fn read_csv(bytes: &[u8]) -> (Vec<String>, Vec<Vec<String>>) {
        let mut rdr = csv::Reader::from_reader(bytes);
        let headers = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        let rows = rdr
            .records()
            .map(|r| r.unwrap().iter().map(str::to_owned).collect())
            .collect();
        (headers, rows)
    }
}

// ── Entity and land-use tables ────────────────────────────────────────────────

#[cfg(test)]
mod tables {
    use ua_attrs::{AttrError, AttrKey, ColumnStore};

    use super::fixture::{households, persons, read_csv, store, zones};
    use crate::{write_households, write_land_use, write_persons, ExportStats, OutputError};

    #[test]
    fn households_skip_unassigned() {
        let mut buf = Vec::new();
        let stats = write_households(&mut buf, &households(), &store()).unwrap();
        assert_eq!(stats, ExportStats { written: 2, excluded: 1 });

        let (headers, rows) = read_csv(&buf);
        assert_eq!(headers, ["HHID", "TAZ", "PERSONS", "VEHICL", "income", "workers", "HHT", "block_id"]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], ["1", "1", "1", "1", "25000.5", "1", "1", "480010001001001"]);
        assert_eq!(&rows[1][0], "3");
        assert_eq!(&rows[1][1], "2");
    }

    #[test]
    fn persons_sorted_by_household_and_renumbered() {
        let mut buf = Vec::new();
        let stats = write_persons(&mut buf, &persons(), &store()).unwrap();
        assert_eq!(stats, ExportStats { written: 3, excluded: 1 });

        let (headers, rows) = read_csv(&buf);
        assert_eq!(
            headers,
            ["person_id", "household_id", "PNUM", "age", "sex", "worker", "student", "ptype", "pemploy", "pstudent", "TAZ"]
        );
        let ids: Vec<(&str, &str, &str)> =
            rows.iter().map(|r| (r[0].as_str(), r[1].as_str(), r[2].as_str())).collect();
        // Household 1 first; household 2's members keep their input order.
        assert_eq!(ids, vec![("0", "1", "1"), ("1", "2", "1"), ("2", "2", "2")]);
        assert_eq!(&rows[0][4], "", "missing sex is written empty");
        assert_eq!(&rows[0][7], "2", "ptype follows the row");
        assert_eq!(&rows[0][10], "2");
        assert_eq!(&rows[2][3], "42");
    }

    #[test]
    fn missing_column_is_an_error() {
        let mut buf = Vec::new();
        let err = write_households(&mut buf, &households(), &ColumnStore::new()).unwrap_err();
        assert!(matches!(err, OutputError::Attr(AttrError::Missing(_))), "{err}");
    }

    #[test]
    fn land_use_columns_in_given_order() {
        let keys: Vec<AttrKey> = ["zones.TOTACRE", "zones.TOTHH"].iter().map(|k| k.parse().unwrap()).collect();
        let mut buf = Vec::new();
        write_land_use(&mut buf, &zones(), &keys, &store()).unwrap();

        let (headers, rows) = read_csv(&buf);
        assert_eq!(headers, ["TAZ", "h3_id", "area", "TOTACRE", "TOTHH"]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], ["1", "z1", "1", "1.5", "1"]);
        assert_eq!(rows[1], ["2", "z2", "1", "2.25", "1"]);
    }

    #[test]
    fn land_use_unknown_key() {
        let keys: Vec<AttrKey> = vec!["zones.NOPE".parse().unwrap()];
        let err = write_land_use(Vec::new(), &zones(), &keys, &store()).unwrap_err();
        assert!(matches!(err, OutputError::Attr(AttrError::Missing(_))));
    }
}

// ── GeoJSON ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod geojson_tests {
    use geojson::{FeatureCollection, GeoJson, Value};
    use ua_attrs::{AttrError, AttrKey};

    use super::fixture::{store, zones};
    use crate::{write_zones_geojson, OutputError};

    fn keys(names: &[&str]) -> Vec<AttrKey> {
        names.iter().map(|k| k.parse().unwrap()).collect()
    }

    fn collection(buf: &[u8]) -> FeatureCollection {
        let parsed: GeoJson = std::str::from_utf8(buf).unwrap().parse().unwrap();
        let GeoJson::FeatureCollection(fc) = parsed else {
            panic!("expected a FeatureCollection");
        };
        fc
    }

    #[test]
    fn one_polygon_feature_per_zone() {
        let mut buf = Vec::new();
        write_zones_geojson(&mut buf, &zones(), &keys(&["zones.TOTACRE"]), &store()).unwrap();

        let fc = collection(&buf);
        assert_eq!(fc.features.len(), 2);

        let f = &fc.features[1];
        assert!(matches!(f.geometry.as_ref().unwrap().value, Value::Polygon(_)));
        assert_eq!(f.property("TAZ").and_then(|v| v.as_u64()), Some(2));
        assert_eq!(f.property("h3_id").and_then(|v| v.as_str()), Some("z2"));
        assert_eq!(f.property("TOTACRE").and_then(|v| v.as_f64()), Some(2.25));
        assert_eq!(f.property("area").and_then(|v| v.as_f64()), Some(1.0));
    }

    #[test]
    fn every_land_use_column_is_a_property() {
        let mut buf = Vec::new();
        let keys = keys(&["zones.TOTHH", "zones.TOTACRE", "zones.PRKCST"]);
        write_zones_geojson(&mut buf, &zones(), &keys, &store()).unwrap();

        let fc = collection(&buf);
        for f in &fc.features {
            for name in ["TAZ", "h3_id", "area", "TOTHH", "TOTACRE", "PRKCST"] {
                assert!(f.contains_property(name), "{name} missing");
            }
            let tothh = f.property("TOTHH").unwrap();
            assert!(tothh.is_i64(), "counts stay integers: {tothh}");
        }
        assert_eq!(fc.features[1].property("PRKCST").and_then(|v| v.as_f64()), Some(3.5));
        assert_eq!(fc.features[0].property("PRKCST").and_then(|v| v.as_f64()), Some(0.0));
    }

    #[test]
    fn unknown_column_is_an_error() {
        let err = write_zones_geojson(Vec::new(), &zones(), &keys(&["zones.NOPE"]), &store()).unwrap_err();
        assert!(matches!(err, OutputError::Attr(AttrError::Missing(_))), "{err}");
    }
}

// ── Skim containers ───────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use ua_skims::Matrix;

    use super::fixture::{read_csv, skims};
    use crate::{open_matrix_writer, CsvMatrixWriter, MatrixFormat, MatrixWriter, OutputError};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn wide_rows_origin_major() {
        let dir = tmp();
        let mut w = CsvMatrixWriter::new(dir.path()).unwrap();
        w.write(&skims()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();

        let bytes = std::fs::read(dir.path().join("skims.csv")).unwrap();
        let (headers, rows) = read_csv(&bytes);
        assert_eq!(headers, ["origin", "destination", "A", "B"]);
        assert_eq!(
            rows,
            vec![
                vec!["1", "1", "1", "0"],
                vec!["1", "2", "2", "0"],
                vec!["2", "1", "3", "0"],
                vec!["2", "2", "4", "0"],
            ]
        );
    }

    #[test]
    fn wrong_size_rejected() {
        let dir = tmp();
        let mut s = skims();
        s.matrices.insert("C".into(), Matrix::zeros(3));
        let mut w = CsvMatrixWriter::new(dir.path()).unwrap();
        let err = w.write(&s).unwrap_err();
        assert!(matches!(err, OutputError::MatrixSize { expected: 2, found: 3, .. }), "{err}");
    }

    #[test]
    fn format_names() {
        assert_eq!(MatrixFormat::Csv.file_name(), "skims.csv");
        assert_eq!(MatrixFormat::default(), MatrixFormat::Parquet);
        let dir = tmp();
        let mut w = open_matrix_writer(MatrixFormat::Csv, dir.path()).unwrap();
        w.write(&skims()).unwrap();
        w.finish().unwrap();
        assert!(dir.path().join("skims.csv").exists());
    }

    #[cfg(not(feature = "parquet"))]
    #[test]
    fn parquet_unavailable_without_feature() {
        let dir = tmp();
        assert!(matches!(
            open_matrix_writer(MatrixFormat::Parquet, dir.path()),
            Err(OutputError::FormatUnavailable(_))
        ));
    }
}

#[cfg(all(test, feature = "parquet"))]
mod parquet_tests {
    use tempfile::TempDir;

    use arrow::array::{Float64Array, UInt32Array};
    use arrow::datatypes::DataType;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    use super::fixture::skims;
    use crate::parquet::ParquetMatrixWriter;
    use crate::writer::MatrixWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn parquet_round_trip() {
        let dir = tmp();
        let mut w = ParquetMatrixWriter::new(dir.path()).unwrap();
        w.write(&skims()).unwrap();
        w.finish().unwrap();

        let file = std::fs::File::open(dir.path().join("skims.parquet")).unwrap();
        let builder = ParquetRecordBatchReaderBuilder::try_new(file).unwrap();
        let schema = builder.schema().clone();
        let field_names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(field_names, ["origin", "destination", "A", "B"]);
        assert_eq!(*schema.field_with_name("A").unwrap().data_type(), DataType::Float64);

        let batches: Vec<_> = builder.build().unwrap().map(|b| b.unwrap()).collect();
        assert_eq!(batches.iter().map(|b| b.num_rows()).sum::<usize>(), 4);

        let b = &batches[0];
        let origin = b.column(0).as_any().downcast_ref::<UInt32Array>().unwrap();
        let a = b.column(2).as_any().downcast_ref::<Float64Array>().unwrap();
        let zero = b.column(3).as_any().downcast_ref::<Float64Array>().unwrap();
        assert_eq!(origin.values().to_vec(), vec![1, 1, 2, 2]);
        assert_eq!(a.values().to_vec(), vec![1.0, 2.0, 3.0, 4.0]);
        assert!(zero.values().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn parquet_finish_required() {
        let dir = tmp();
        {
            let mut w = ParquetMatrixWriter::new(dir.path()).unwrap();
            w.write(&skims()).unwrap();
        }
        let file = std::fs::File::open(dir.path().join("skims.parquet")).unwrap();
        assert!(ParquetRecordBatchReaderBuilder::try_new(file).is_err());
    }
}
