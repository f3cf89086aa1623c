//! Exclusion zone collision detection and correction.
//!
//! A point inside a zone is projected from the zone center, through the
//! point, out to the zone boundary. Overlapping zones are handled by
//! repeating the check on the corrected point until it is clear of every
//! zone or the pass limit is hit.

use crate::error::PlanError;
use crate::geo::{distance_km, point_towards};
use crate::models::{ExclusionZone, GeoPoint};

/// Points closer than this to a boundary (km) count as being on it.
pub const CONTAINMENT_EPSILON_KM: f64 = 1e-6;

/// Result of running a point through the corrector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Correction {
    pub point: GeoPoint,
    /// Number of zone pushes applied
    pub passes: usize,
}

impl Correction {
    pub fn is_deflected(&self) -> bool {
        self.passes > 0
    }
}

/// Pushes points out of a fixed set of exclusion zones.
#[derive(Debug, Clone)]
pub struct ExclusionCorrector {
    zones: Vec<ExclusionZone>,
    max_iterations: usize,
}

impl ExclusionCorrector {
    /// Build a corrector, growing every zone by `buffer_km`.
    pub fn new(zones: &[ExclusionZone], buffer_km: f64) -> Self {
        let zones: Vec<ExclusionZone> = zones.iter().map(|z| z.expanded(buffer_km)).collect();
        let max_iterations = zones.len().max(1) * crate::config::CORRECTION_PASSES_PER_ZONE;
        Self {
            zones,
            max_iterations,
        }
    }

    /// Override the number of correction passes allowed per point.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations.max(1);
        self
    }

    /// Move `point` out of every zone it falls in.
    ///
    /// Each pass corrects against the violated zone whose center is closest,
    /// then re-checks all zones.
    pub fn correct(&self, point: GeoPoint) -> Result<Correction, PlanError> {
        let mut current = point;
        let mut passes = 0usize;

        while let Some(zone) = self.nearest_violation(current) {
            if passes == self.max_iterations {
                return Err(PlanError::CorrectionDidNotConverge {
                    lat_deg: point.lat_deg(),
                    lon_deg: point.lon_deg(),
                    iterations: passes,
                });
            }
            let corrected = point_towards(zone.center, current, zone.radius_km);
            tracing::debug!(
                "Pushed {} out of zone at {} (r = {:.3} km) to {}",
                current,
                zone.center,
                zone.radius_km,
                corrected
            );
            current = corrected;
            passes += 1;
        }

        Ok(Correction {
            point: current,
            passes,
        })
    }

    fn nearest_violation(&self, point: GeoPoint) -> Option<&ExclusionZone> {
        let mut nearest: Option<(&ExclusionZone, f64)> = None;
        for zone in &self.zones {
            let dist = distance_km(point, zone.center);
            if dist + CONTAINMENT_EPSILON_KM >= zone.radius_km {
                continue;
            }
            if nearest.map_or(true, |(_, best)| dist < best) {
                nearest = Some((zone, dist));
            }
        }
        nearest.map(|(zone, _)| zone)
    }
}

/// Correct a single point against `zones` with no extra buffer.
pub fn correct(point: GeoPoint, zones: &[ExclusionZone]) -> Result<GeoPoint, PlanError> {
    if zones.is_empty() {
        return Ok(point);
    }
    ExclusionCorrector::new(zones, 0.0)
        .correct(point)
        .map(|correction| correction.point)
}

/// Check that every zone has a usable radius.
pub fn validate_zones(zones: &[ExclusionZone]) -> Result<(), PlanError> {
    for (index, zone) in zones.iter().enumerate() {
        if !zone.radius_km.is_finite() || zone.radius_km <= 0.0 {
            return Err(PlanError::InvalidZone {
                index,
                radius_km: zone.radius_km,
            });
        }
        if !zone.center.is_valid() {
            return Err(PlanError::InvalidZoneCenter {
                index,
                lat_deg: zone.center.lat_deg(),
                lon_deg: zone.center.lon_deg(),
            });
        }
    }
    Ok(())
}
