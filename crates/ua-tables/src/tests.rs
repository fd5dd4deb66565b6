//! Unit tests for ua-tables.
//!
//! CSV tests read from `std::io::Cursor`; directory tests use
//! `StaticDirectory`, so nothing touches the network.

#[cfg(test)]
mod csv_loading {
    use std::io::Cursor;

    use ua_core::{BlockId, HouseholdId};

    use crate::{load_csv_reader, Block, Household, Person, TableError};

    #[test]
    fn households_parse_and_ignore_extra_columns() {
        let data = "household_id,block_id,persons,cars,income,workers,tenure\n\
                    7,484530011001000,2,1,45000.0,1,own\n";
        let rows: Vec<Household> = load_csv_reader(Cursor::new(data), "households").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].household_id, HouseholdId(7));
        assert_eq!(rows[0].block_id, BlockId::new("484530011001000"));
        assert_eq!(rows[0].income, 45_000.0);
    }

    #[test]
    fn person_sex_is_optional() {
        let without = "person_id,household_id,member_id,age,worker,student\n1,7,1,34,1,0\n";
        let rows: Vec<Person> = load_csv_reader(Cursor::new(without), "persons").unwrap();
        assert_eq!(rows[0].sex, None);
        assert!(rows[0].is_worker());
        assert!(!rows[0].is_student());

        let with = "person_id,household_id,member_id,age,worker,student,sex\n1,7,1,34,1,0,2\n";
        let rows: Vec<Person> = load_csv_reader(Cursor::new(with), "persons").unwrap();
        assert_eq!(rows[0].sex, Some(2));
    }

    #[test]
    fn block_id_keeps_leading_zeros() {
        let data = "block_id,x,y,residential_unit_capacity,employment_capacity,square_meters_land\n\
                    060750101001000,-122.4,37.8,10,5,4046.86\n";
        let rows: Vec<Block> = load_csv_reader(Cursor::new(data), "blocks").unwrap();
        assert_eq!(rows[0].block_id.as_str(), "060750101001000");
        assert_eq!(rows[0].block_id.state_fips().unwrap(), "06");
    }

    #[test]
    fn bad_row_names_table_and_line() {
        let data = "household_id,block_id,persons,cars,income,workers\n\
                    1,484530011001000,2,1,1000,1\n\
                    2,484530011001000,two,1,1000,1\n";
        let err = load_csv_reader::<Household, _>(Cursor::new(data), "households").unwrap_err();
        match err {
            TableError::Parse { table, reason } => {
                assert_eq!(table, "households");
                assert!(reason.starts_with("row 3"), "{reason}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

#[cfg(test)]
mod store {
    use std::fs;

    use crate::loader::{BLOCKS_FILE, HOUSEHOLDS_FILE, JOBS_FILE, PERSONS_FILE};
    use crate::{TableError, TableStore};

    fn write_tables(dir: &std::path::Path) {
        fs::write(
            dir.join(HOUSEHOLDS_FILE),
            "household_id,block_id,persons,cars,income,workers\n1,484530011001000,1,0,20000,0\n",
        )
        .unwrap();
        fs::write(
            dir.join(PERSONS_FILE),
            "person_id,household_id,member_id,age,worker,student\n1,1,1,70,0,0\n",
        )
        .unwrap();
        fs::write(
            dir.join(BLOCKS_FILE),
            "block_id,x,y,residential_unit_capacity,employment_capacity,square_meters_land\n\
             484530011001000,-97.7,30.3,1,0,1000\n\
             484910201001000,-97.6,30.6,1,0,1000\n\
             484530011001001,-97.7,30.3,1,0,1000\n",
        )
        .unwrap();
        fs::write(dir.join(JOBS_FILE), "job_id,block_id,sector_id\n1,484530011001000,42\n").unwrap();
    }

    #[test]
    fn loads_all_four_tables() {
        let dir = tempfile::tempdir().unwrap();
        write_tables(dir.path());
        let store = TableStore::load(dir.path()).unwrap();
        assert_eq!(store.households.len(), 1);
        assert_eq!(store.persons.len(), 1);
        assert_eq!(store.blocks.len(), 3);
        assert_eq!(store.jobs.len(), 1);
    }

    #[test]
    fn county_and_state_codes_are_distinct_in_order() {
        let dir = tempfile::tempdir().unwrap();
        write_tables(dir.path());
        let store = TableStore::load(dir.path()).unwrap();
        assert_eq!(store.county_codes().unwrap(), vec!["48453", "48491"]);
        assert_eq!(store.state_fips_codes().unwrap(), vec!["48"]);
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        write_tables(dir.path());
        fs::remove_file(dir.path().join(JOBS_FILE)).unwrap();
        let err = TableStore::load(dir.path()).unwrap_err();
        assert!(matches!(err, TableError::MissingFile(p) if p.ends_with(JOBS_FILE)));
    }
}

#[cfg(test)]
mod directory {
    use crate::directory::{colleges_url, enrollment_url, schools_url, DEFAULT_BASE_URL};
    use crate::{
        load_colleges, load_schools, Attendance, CollegeRow, EnrollmentRow, Level, SchoolRow,
        StaticDirectory,
    };

    fn school(id: &str, lat: Option<f64>, lon: Option<f64>, enrollment: Option<f64>) -> SchoolRow {
        SchoolRow {
            ncessch: id.into(),
            county_code: None,
            latitude: lat,
            longitude: lon,
            enrollment,
        }
    }

    fn college(unitid: u64, lat: Option<f64>, lon: Option<f64>) -> CollegeRow {
        CollegeRow {
            unitid,
            inst_name: format!("College {unitid}"),
            latitude: lat,
            longitude: lon,
        }
    }

    fn enrolled(unitid: u64, n: f64) -> EnrollmentRow {
        EnrollmentRow { unitid, enrollment_fall: Some(n) }
    }

    #[test]
    fn urls_match_api_layout() {
        assert_eq!(
            schools_url(DEFAULT_BASE_URL, 2015, "48453"),
            "https://educationdata.urban.org/api/v1/schools/ccd/directory/2015/?county_code=48453"
        );
        assert_eq!(
            colleges_url("http://localhost/", 2015, "48453"),
            "http://localhost/college-university/ipeds/directory/2015/?county_fips=48453"
        );
        assert_eq!(
            enrollment_url("http://localhost", 2015, Level::Graduate, Attendance::PartTime, "48"),
            "http://localhost/college-university/ipeds/fall-enrollment/2015/graduate/\
             ?ftpt=2&sex=99&race=99&class_level=99&degree_seeking=99&fips=48"
        );
    }

    #[test]
    fn school_rows_accept_numeric_ids() {
        let row: SchoolRow = serde_json::from_str(
            r#"{"ncessch": 480000000001, "county_code": 48453, "latitude": 30.3, "longitude": -97.7, "enrollment": 500}"#,
        )
        .unwrap();
        assert_eq!(row.ncessch, "480000000001");
        assert_eq!(row.county_code.as_deref(), Some("48453"));
    }

    #[test]
    fn incomplete_schools_are_dropped() {
        let src = StaticDirectory::new()
            .with_school("48453", school("a", Some(30.3), Some(-97.7), Some(500.0)))
            .with_school("48453", school("b", None, Some(-97.7), Some(500.0)))
            .with_school("48453", school("c", Some(30.3), Some(-97.7), None))
            .with_school("48453", school("d", Some(30.3), Some(-97.7), Some(-2.0)))
            .with_school("48491", school("e", Some(30.6), Some(-97.6), Some(120.0)));

        let counties = vec!["48453".to_string(), "48491".to_string()];
        let schools = load_schools(&src, 2015, &counties).unwrap();
        let ids: Vec<&str> = schools.iter().map(|s| s.ncessch.as_str()).collect();
        assert_eq!(ids, vec!["a", "e"]);
        assert_eq!(schools[0].x, -97.7);
        assert_eq!(schools[0].y, 30.3);
        assert_eq!(schools[1].county_code, "48491");
    }

    #[test]
    fn college_enrollment_sums_levels() {
        let src = StaticDirectory::new()
            .with_college("48453", college(1, Some(30.28), Some(-97.73)))
            .with_college("48453", college(2, Some(30.30), Some(-97.70)))
            .with_college("48491", college(1, Some(30.28), Some(-97.73)))
            .with_college("48491", college(3, None, None))
            .with_enrollment("48", Level::Undergraduate, Attendance::FullTime, enrolled(1, 30_000.0))
            .with_enrollment("48", Level::Graduate, Attendance::FullTime, enrolled(1, 9_000.0))
            .with_enrollment("48", Level::Undergraduate, Attendance::PartTime, enrolled(1, 2_000.0))
            .with_enrollment("48", Level::Undergraduate, Attendance::FullTime, enrolled(2, 800.0));

        let counties = vec!["48453".to_string(), "48491".to_string()];
        let states = vec!["48".to_string()];
        let colleges = load_colleges(&src, 2015, &counties, &states).unwrap();

        assert_eq!(colleges.len(), 2, "duplicate listed once, no-coordinate college dropped");
        assert_eq!(colleges[0].unitid, 1);
        assert_eq!(colleges[0].full_time_enrollment, 39_000.0);
        assert_eq!(colleges[0].part_time_enrollment, 2_000.0);
        assert_eq!(colleges[1].full_time_enrollment, 800.0);
        assert_eq!(colleges[1].part_time_enrollment, 0.0);
    }

    #[test]
    fn unknown_county_yields_nothing() {
        let src = StaticDirectory::new();
        let schools = load_schools(&src, 2015, &["99999".to_string()]).unwrap();
        assert!(schools.is_empty());
    }
}
