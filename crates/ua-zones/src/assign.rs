//! Point-to-zone assignment.
//!
//! # Algorithm
//!
//! 1. **Direct**: every zone whose polygon intersects the point (boundary
//!    included) is a match.  With several matches the smallest-area zone
//!    wins, then the lower `ZoneId`.
//! 2. **Buffered**: a point outside every zone is grown into a disc of
//!    radius `k · buffer_step` for `k = 1, 2, …`; the first `k` at which any
//!    zone comes within the radius decides, with the same tie-break.  The
//!    search stops after `max_buffer_steps` and reports the entity as
//!    unassignable.
//!
//! The result for a given point and zone table is fully deterministic.

use std::fmt::Display;

use geo::{EuclideanDistance, Intersects, Point};

use ua_core::{LonLat, ZoneId};

use crate::zone::{Zone, ZoneTable};
use crate::{ZoneError, ZoneResult};

// ── Settings ──────────────────────────────────────────────────────────────────

/// Buffer-growth settings for the fallback search.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AssignConfig {
    /// Radius increment per step, in degrees.
    pub buffer_step: f64,
    /// Steps tried before giving up.  The search radius is bounded by
    /// `buffer_step * max_buffer_steps`.
    pub max_buffer_steps: u32,
}

impl AssignConfig {
    pub fn max_radius(&self) -> f64 {
        self.buffer_step * f64::from(self.max_buffer_steps)
    }
}

impl Default for AssignConfig {
    fn default() -> Self {
        Self {
            buffer_step:      0.0001,
            max_buffer_steps: 10_000,
        }
    }
}

// ── Results ───────────────────────────────────────────────────────────────────

/// How a single point was matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Match {
    /// The point lies inside (or on the boundary of) `candidates` zones.
    Direct { zone: ZoneId, candidates: usize },
    /// The point lies outside every zone; found after `steps` buffer steps.
    Buffered { zone: ZoneId, steps: u32 },
}

impl Match {
    pub fn zone(self) -> ZoneId {
        match self {
            Match::Direct { zone, .. } | Match::Buffered { zone, .. } => zone,
        }
    }
}

/// Counters describing one [`ZoneAssigner::assign`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssignStats {
    pub entities: usize,
    /// Matched by containment.
    pub direct: usize,
    /// Direct matches that fell in more than one zone.
    pub overlaps: usize,
    /// Recovered by the buffered search.
    pub buffered: usize,
    /// Largest number of buffer steps any entity needed.
    pub max_steps_used: u32,
}

impl AssignStats {
    fn record(&mut self, m: Match) {
        self.entities += 1;
        match m {
            Match::Direct { candidates, .. } => {
                self.direct += 1;
                if candidates > 1 {
                    self.overlaps += 1;
                }
            }
            Match::Buffered { steps, .. } => {
                self.buffered += 1;
                self.max_steps_used = self.max_steps_used.max(steps);
            }
        }
    }
}

/// Zone ids for a batch of entities, in input order.
#[derive(Debug, Clone)]
pub struct Assignment<K> {
    pub zones: Vec<(K, ZoneId)>,
    pub stats: AssignStats,
}

impl<K> Assignment<K> {
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Zone ids only, in input order.
    pub fn zone_ids(&self) -> impl Iterator<Item = ZoneId> + '_ {
        self.zones.iter().map(|(_, z)| *z)
    }
}

// ── ZoneAssigner ──────────────────────────────────────────────────────────────

/// Assigns points to zones.  Stateless apart from its settings.
#[derive(Debug, Clone, Default)]
pub struct ZoneAssigner {
    config: AssignConfig,
}

impl ZoneAssigner {
    pub fn new(config: AssignConfig) -> ZoneResult<Self> {
        if !(config.buffer_step.is_finite() && config.buffer_step > 0.0) {
            return Err(ZoneError::Config(format!(
                "buffer_step must be a positive number, got {}",
                config.buffer_step
            )));
        }
        if config.max_buffer_steps == 0 {
            return Err(ZoneError::Config("max_buffer_steps must be at least 1".into()));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &AssignConfig {
        &self.config
    }

    /// Assign every entity to exactly one zone.
    ///
    /// `entities` yields `(key, position)`; `key` only appears in error
    /// messages and the returned pairs.  Fails on the first entity with a
    /// non-finite coordinate or with no zone inside the search bound.
    pub fn assign<K, I>(&self, zones: &ZoneTable, entities: I) -> ZoneResult<Assignment<K>>
    where
        K: Display,
        I: IntoIterator<Item = (K, LonLat)>,
    {
        let entities = entities.into_iter();
        let mut out = Vec::with_capacity(entities.size_hint().0);
        let mut stats = AssignStats::default();

        for (key, pos) in entities {
            if zones.is_empty() {
                return Err(ZoneError::NoZones);
            }
            if !pos.is_finite() {
                return Err(ZoneError::NonFiniteCoordinate {
                    entity: key.to_string(),
                    pos,
                });
            }
            let m = self.locate(zones, pos).ok_or_else(|| ZoneError::Unassignable {
                entity: key.to_string(),
                pos,
                radius: self.config.max_radius(),
            })?;
            stats.record(m);
            out.push((key, m.zone()));
        }

        Ok(Assignment { zones: out, stats })
    }

    /// Find the zone for a single finite point.
    ///
    /// Returns `None` if `pos` is not finite or no zone lies within the
    /// search bound.
    pub fn locate(&self, zones: &ZoneTable, pos: LonLat) -> Option<Match> {
        if !pos.is_finite() {
            return None;
        }
        let point = Point::new(pos.x, pos.y);

        // ── Direct containment ────────────────────────────────────────────
        let direct: Vec<&Zone> = zones
            .box_candidates(pos)
            .filter(|z| z.polygon.intersects(&point))
            .collect();
        if let Some(zone) = smallest(direct.iter().copied()) {
            return Some(Match::Direct { zone, candidates: direct.len() });
        }

        // ── Buffered fallback ─────────────────────────────────────────────
        // A zone joins the search at the first step whose radius reaches its
        // polygon, so the winning step is the minimum over nearby zones.
        let reach: Vec<(&Zone, u32)> = zones
            .boxes_within(pos, self.config.max_radius())
            .into_iter()
            .filter_map(|z| self.steps_to_reach(point.euclidean_distance(&z.polygon)).map(|k| (z, k)))
            .collect();
        let step = reach.iter().map(|(_, k)| *k).min()?;
        let zone = smallest(reach.iter().filter(|(_, k)| *k == step).map(|(z, _)| *z))?;
        log::trace!("{pos} matched {zone} after {step} buffer steps");
        Some(Match::Buffered { zone, steps: step })
    }

    /// First step `k` in `1..=max_buffer_steps` with `buffer_step * k >= dist`,
    /// or `None` when the bound is too small.
    fn steps_to_reach(&self, dist: f64) -> Option<u32> {
        let step = self.config.buffer_step;
        let max = u64::from(self.config.max_buffer_steps);
        let radius = |k: u64| step * k as f64;

        let estimate = (dist / step).ceil();
        if !estimate.is_finite() || estimate > max as f64 + 1.0 {
            return None;
        }
        let mut k = (estimate as u64).max(1);
        // `dist / step` rounds; settle on the exact comparison.
        while radius(k) < dist {
            k += 1;
        }
        while k > 1 && radius(k - 1) >= dist {
            k -= 1;
        }
        if k > max { None } else { u32::try_from(k).ok() }
    }
}

/// Smallest-area zone, ties broken by the lower id.
fn smallest<'a>(zones: impl Iterator<Item = &'a Zone>) -> Option<ZoneId> {
    zones
        .min_by(|a, b| a.area.total_cmp(&b.area).then(a.id.cmp(&b.id)))
        .map(|z| z.id)
}
