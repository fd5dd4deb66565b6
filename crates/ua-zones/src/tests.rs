//! Unit tests for ua-zones.
//!
//! Most tests use hand-drawn square zones so the expected matches can be
//! worked out on paper; the H3 tests use two well-known cells.

#[cfg(test)]
mod helpers {
    use geo::{polygon, Polygon};

    use crate::{ZoneTable, ZoneTableBuilder};

    pub fn square(x0: f64, y0: f64, side: f64) -> Polygon<f64> {
        polygon![
            (x: x0,        y: y0),
            (x: x0 + side, y: y0),
            (x: x0 + side, y: y0 + side),
            (x: x0,        y: y0 + side),
        ]
    }

    /// Zones:
    ///   1: [0,1]×[0,1]
    ///   2: [1,2]×[0,1]          (shares the x = 1 edge with zone 1)
    ///   3: [0.25,0.5]×[0.25,0.5] (sits inside zone 1)
    pub fn squares() -> ZoneTable {
        let mut b = ZoneTableBuilder::new();
        b.add_zone("a", square(0.0, 0.0, 1.0));
        b.add_zone("b", square(1.0, 0.0, 1.0));
        b.add_zone("c", square(0.25, 0.25, 0.25));
        b.build()
    }

    pub const SF_RES9: &str = "8928308280fffff";
    pub const SF_RES5: &str = "85283473fffffff";
}

// ── Zone table ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod table {
    use ua_core::ZoneId;

    use super::helpers::{squares, SF_RES5, SF_RES9};
    use crate::{ZoneError, ZoneTable, ZoneTableBuilder};

    #[test]
    fn empty_build() {
        let t = ZoneTableBuilder::new().build();
        assert!(t.is_empty());
        assert_eq!(t.len(), 0);
    }

    #[test]
    fn ids_are_dense_from_one() {
        let t = squares();
        let ids: Vec<u32> = t.iter().map(|z| z.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(t.zone(ZoneId(2)).unwrap().h3_id, "b");
        assert!(t.zone(ZoneId(0)).is_none());
        assert!(t.zone(ZoneId(4)).is_none());
    }

    #[test]
    fn from_cells_dedupes_in_first_seen_order() {
        let t = ZoneTable::from_cells([SF_RES9, SF_RES5, SF_RES9]).unwrap();
        assert_eq!(t.len(), 2);
        assert_eq!(t.zone(ZoneId(1)).unwrap().h3_id, SF_RES9);
        assert_eq!(t.zone(ZoneId(2)).unwrap().h3_id, SF_RES5);
    }

    #[test]
    fn h3_polygon_is_a_closed_ring() {
        let t = ZoneTable::from_cells([SF_RES9]).unwrap();
        let ring = &t.zones()[0].polygon.exterior().0;
        assert!(ring.len() >= 7, "hexagon plus closing vertex, got {}", ring.len());
        assert_eq!(ring.first(), ring.last());
    }

    #[test]
    fn h3_res9_acreage_is_plausible() {
        // ~26 acres on the ground, stretched by Web Mercator at 37.8° N.
        let t = ZoneTable::from_cells([SF_RES9]).unwrap();
        let acres = t.zones()[0].acres();
        assert!((20.0..80.0).contains(&acres), "got {acres}");
    }

    #[test]
    fn invalid_cell_rejected() {
        let err = ZoneTable::from_cells(["not-a-cell"]).err().unwrap();
        assert!(matches!(err, ZoneError::InvalidCell { .. }), "{err}");
    }

    #[test]
    fn padded_cell_is_not_silently_merged() {
        let padded = format!(" {SF_RES9}");
        let err = ZoneTable::from_cells([SF_RES9, padded.as_str()]).err().unwrap();
        assert!(matches!(err, ZoneError::InvalidCell { ref cell, .. } if *cell == padded), "{err}");
    }

    #[test]
    fn square_acres_match_projection() {
        // 1°×1° at the equator ≈ 111.3 km × 111.3 km in Web Mercator.
        let t = squares();
        let acres = t.zones()[0].acres();
        let expected = 111_319.49_f64 * 111_325.14 / 4_046.86;
        assert!((acres / expected - 1.0).abs() < 1e-3, "got {acres}");
    }
}

// ── Assignment ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod assign {
    use geo::{Centroid, EuclideanDistance};
    use ua_core::{LonLat, ZoneId};

    use super::helpers::{squares, SF_RES9};
    use crate::{AssignConfig, Match, ZoneAssigner, ZoneError, ZoneTable, ZoneTableBuilder};

    fn assigner() -> ZoneAssigner {
        ZoneAssigner::new(AssignConfig::default()).unwrap()
    }

    #[test]
    fn interior_point_matches_directly() {
        let t = squares();
        let m = assigner().locate(&t, LonLat::new(1.5, 0.5)).unwrap();
        assert_eq!(m, Match::Direct { zone: ZoneId(2), candidates: 1 });
    }

    #[test]
    fn overlap_prefers_smaller_zone() {
        let t = squares();
        let m = assigner().locate(&t, LonLat::new(0.3, 0.3)).unwrap();
        assert_eq!(m, Match::Direct { zone: ZoneId(3), candidates: 2 });
    }

    #[test]
    fn shared_edge_prefers_lower_id() {
        let t = squares();
        let m = assigner().locate(&t, LonLat::new(1.0, 0.5)).unwrap();
        assert_eq!(m, Match::Direct { zone: ZoneId(1), candidates: 2 });
    }

    #[test]
    fn buffered_match_counts_steps() {
        let t = squares();
        let a = assigner();
        assert_eq!(
            a.locate(&t, LonLat::new(2.000_05, 0.5)),
            Some(Match::Buffered { zone: ZoneId(2), steps: 1 }),
        );
        assert_eq!(
            a.locate(&t, LonLat::new(2.000_25, 0.5)),
            Some(Match::Buffered { zone: ZoneId(2), steps: 3 }),
        );
    }

    #[test]
    fn buffered_tie_prefers_lower_id() {
        // Just above the shared corner: equally close to zones 1 and 2.
        let t = squares();
        let m = assigner().locate(&t, LonLat::new(1.0, 1.000_05)).unwrap();
        assert_eq!(m, Match::Buffered { zone: ZoneId(1), steps: 1 });
    }

    #[test]
    fn buffered_match_is_repeatable() {
        let t = squares();
        let a = assigner();
        let p = LonLat::new(-0.003, 1.002);
        let first = a.locate(&t, p);
        for _ in 0..5 {
            assert_eq!(a.locate(&t, p), first);
        }
        assert_eq!(first.unwrap().zone(), ZoneId(1));
    }

    #[test]
    fn search_stops_at_the_bound() {
        let t = squares();
        let tight = ZoneAssigner::new(AssignConfig { buffer_step: 0.1, max_buffer_steps: 2 }).unwrap();
        assert!(tight.locate(&t, LonLat::new(2.25, 0.5)).is_none());

        let err = tight
            .assign(&t, [("hh-9", LonLat::new(2.25, 0.5))])
            .err()
            .unwrap();
        match err {
            ZoneError::Unassignable { entity, radius, .. } => {
                assert_eq!(entity, "hh-9");
                assert!((radius - 0.2).abs() < 1e-12);
            }
            other => panic!("unexpected error: {other}"),
        }

        let loose = ZoneAssigner::new(AssignConfig { buffer_step: 0.1, max_buffer_steps: 3 }).unwrap();
        assert_eq!(
            loose.locate(&t, LonLat::new(2.25, 0.5)),
            Some(Match::Buffered { zone: ZoneId(2), steps: 3 }),
        );
    }

    /// Step-by-step search: grow the radius one step at a time.
    fn scan(t: &ZoneTable, cfg: AssignConfig, pos: LonLat) -> Option<Match> {
        let point = geo::Point::new(pos.x, pos.y);
        for step in 1..=cfg.max_buffer_steps {
            let radius = cfg.buffer_step * f64::from(step);
            let hit = t
                .zones()
                .iter()
                .filter(|z| point.euclidean_distance(&z.polygon) <= radius)
                .min_by(|a, b| a.area.total_cmp(&b.area).then(a.id.cmp(&b.id)));
            if let Some(z) = hit {
                return Some(Match::Buffered { zone: z.id, steps: step });
            }
        }
        None
    }

    #[test]
    fn buffered_steps_match_stepwise_search() {
        let t = squares();
        for cfg in [
            AssignConfig::default(),
            AssignConfig { buffer_step: 0.1, max_buffer_steps: 3 },
            AssignConfig { buffer_step: 0.003, max_buffer_steps: 400 },
        ] {
            let a = ZoneAssigner::new(cfg).unwrap();
            for &(x, y) in &[
                (2.000_05, 0.5),
                (2.000_3, 0.5),
                (2.25, 0.5),
                (-0.003, 1.002),
                (1.0, 1.000_05),
                (-0.7, -0.7),
                (2.3, 1.3),
                (0.5, 1.2),
            ] {
                let pos = LonLat::new(x, y);
                assert_eq!(a.locate(&t, pos), scan(&t, cfg, pos), "{pos} with {cfg:?}");
            }
        }
    }

    #[test]
    fn large_step_bounds_resolve_directly() {
        let t = squares();
        let cfg = AssignConfig { buffer_step: 1e-6, max_buffer_steps: 4_000_000 };
        let a = ZoneAssigner::new(cfg).unwrap();
        let Some(Match::Buffered { zone, steps }) = a.locate(&t, LonLat::new(2.5, 0.5)) else {
            panic!("expected a buffered match");
        };
        assert_eq!(zone, ZoneId(2));
        // First step whose radius reaches the 0.5 gap.
        let radius = |k: u32| cfg.buffer_step * f64::from(k);
        assert!(radius(steps) >= 0.5 && radius(steps - 1) < 0.5, "{steps}");
    }

    #[test]
    fn assign_covers_every_entity_once() {
        let t = squares();
        let pts = [
            (10_u64, LonLat::new(0.9, 0.9)),
            (11, LonLat::new(0.3, 0.3)),
            (12, LonLat::new(1.5, 0.1)),
            (13, LonLat::new(2.000_05, 0.5)),
        ];
        let out = assigner().assign(&t, pts).unwrap();
        assert_eq!(out.len(), 4);
        let keys: Vec<u64> = out.zones.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![10, 11, 12, 13]);
        let zones: Vec<u32> = out.zone_ids().map(|z| z.0).collect();
        assert_eq!(zones, vec![1, 3, 2, 2]);

        assert_eq!(out.stats.entities, 4);
        assert_eq!(out.stats.direct, 3);
        assert_eq!(out.stats.overlaps, 1);
        assert_eq!(out.stats.buffered, 1);
        assert_eq!(out.stats.max_steps_used, 1);
    }

    #[test]
    fn non_finite_coordinate_rejected() {
        let t = squares();
        let err = assigner()
            .assign(&t, [("p1", LonLat::new(f64::NAN, 0.5))])
            .err()
            .unwrap();
        assert!(matches!(err, ZoneError::NonFiniteCoordinate { .. }), "{err}");
        assert!(assigner().locate(&t, LonLat::new(0.5, f64::INFINITY)).is_none());
    }

    #[test]
    fn empty_table_with_entities_is_an_error() {
        let t = ZoneTableBuilder::new().build();
        let err = assigner().assign(&t, [(1_u64, LonLat::new(0.0, 0.0))]).err().unwrap();
        assert!(matches!(err, ZoneError::NoZones));

        let none: [(u64, LonLat); 0] = [];
        assert!(assigner().assign(&t, none).unwrap().is_empty());
    }

    #[test]
    fn h3_cell_centre_lands_in_its_cell() {
        let t = ZoneTable::from_cells([SF_RES9]).unwrap();
        let c = t.zones()[0].polygon.centroid().unwrap();
        let m = assigner().locate(&t, LonLat::new(c.x(), c.y())).unwrap();
        assert_eq!(m, Match::Direct { zone: ZoneId(1), candidates: 1 });
    }

    #[test]
    fn invalid_settings_rejected() {
        assert!(ZoneAssigner::new(AssignConfig { buffer_step: 0.0, max_buffer_steps: 5 }).is_err());
        assert!(ZoneAssigner::new(AssignConfig { buffer_step: f64::NAN, max_buffer_steps: 5 }).is_err());
        assert!(ZoneAssigner::new(AssignConfig { buffer_step: 0.1, max_buffer_steps: 0 }).is_err());
    }
}
