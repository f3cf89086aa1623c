//! Collinearity-based path simplification.

use crate::config::DEFAULT_COLLINEARITY_TOLERANCE_RAD;
use crate::geo::{bearing, bearing_difference, distance_km, normalize_bearing};
use crate::models::{FlightPath, GeoPoint, PathPoint};
use std::f64::consts::PI;

/// Legs shorter than this (km) have no usable heading.
const DEGENERATE_LEG_KM: f64 = 1e-9;

/// Removes interior points that add no change of direction.
#[derive(Debug, Clone)]
pub struct PathSimplifier {
    tolerance_rad: f64,
    pin_waypoints: bool,
}

impl Default for PathSimplifier {
    fn default() -> Self {
        Self::new(DEFAULT_COLLINEARITY_TOLERANCE_RAD)
    }
}

impl PathSimplifier {
    pub fn new(tolerance_rad: f64) -> Self {
        Self {
            tolerance_rad,
            pin_waypoints: true,
        }
    }

    /// When set, original waypoints are anchors just like the first and last point.
    pub fn pin_waypoints(mut self, pin: bool) -> Self {
        self.pin_waypoints = pin;
        self
    }

    /// Simplify a flight path. The first and last point always stay.
    pub fn simplify(&self, path: &FlightPath) -> FlightPath {
        let points = self.run(
            &path.points,
            |p| p.point,
            |p: &PathPoint| self.pin_waypoints && p.is_waypoint(),
        );
        FlightPath::from(points)
    }

    /// Simplify bare coordinates, where only the endpoints are anchors.
    pub fn simplify_points(&self, points: &[GeoPoint]) -> Vec<GeoPoint> {
        self.run(points, |p| *p, |_| false)
    }

    /// Whether `current` can be dropped between `prev` and `next`.
    ///
    /// Compares the heading on arrival at `current` (final bearing of the
    /// inbound leg) with the heading on departure, so points on one great
    /// circle are redundant at any latitude.
    pub fn is_redundant(&self, prev: GeoPoint, current: GeoPoint, next: GeoPoint) -> bool {
        if distance_km(prev, current) < DEGENERATE_LEG_KM
            || distance_km(current, next) < DEGENERATE_LEG_KM
        {
            return true;
        }
        let inbound = normalize_bearing(bearing(current, prev) + PI);
        let outbound = bearing(current, next);
        bearing_difference(inbound, outbound) <= self.tolerance_rad
    }

    // Forward passes until nothing changes. Within a pass the predecessor is
    // always the last kept point, so a removal never leaves a stale neighbor.
    fn run<T, P, A>(&self, points: &[T], position: P, is_anchor: A) -> Vec<T>
    where
        T: Copy,
        P: Fn(&T) -> GeoPoint,
        A: Fn(&T) -> bool,
    {
        let mut current: Vec<T> = points.to_vec();
        loop {
            if current.len() <= 2 {
                return current;
            }

            let last = current.len() - 1;
            let mut kept: Vec<T> = Vec::with_capacity(current.len());
            kept.push(current[0]);

            for i in 1..last {
                let point = current[i];
                let prev = kept[kept.len() - 1];
                let next = current[i + 1];
                if !is_anchor(&point)
                    && self.is_redundant(position(&prev), position(&point), position(&next))
                {
                    continue;
                }
                kept.push(point);
            }
            kept.push(current[last]);

            if kept.len() == current.len() {
                return kept;
            }
            tracing::debug!("Simplifier pass removed {} points", current.len() - kept.len());
            current = kept;
        }
    }
}
