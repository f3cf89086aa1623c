//! Core data models for flight path planning.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position on the Earth's surface.
///
/// Coordinates are stored in radians. Degrees are converted exactly once,
/// when the point is built with [`GeoPoint::from_degrees`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    lat_rad: f64,
    lon_rad: f64,
}

impl GeoPoint {
    /// Create a point from decimal degrees.
    pub fn from_degrees(lat_deg: f64, lon_deg: f64) -> Self {
        Self {
            lat_rad: lat_deg.to_radians(),
            lon_rad: lon_deg.to_radians(),
        }
    }

    /// Create a point from radians.
    pub fn from_radians(lat_rad: f64, lon_rad: f64) -> Self {
        Self { lat_rad, lon_rad }
    }

    pub fn lat_rad(&self) -> f64 {
        self.lat_rad
    }

    pub fn lon_rad(&self) -> f64 {
        self.lon_rad
    }

    pub fn lat_deg(&self) -> f64 {
        self.lat_rad.to_degrees()
    }

    pub fn lon_deg(&self) -> f64 {
        self.lon_rad.to_degrees()
    }

    /// True when both coordinates are finite and inside the usual
    /// latitude/longitude ranges.
    pub fn is_valid(&self) -> bool {
        const SLACK_DEG: f64 = 1e-9;
        self.lat_rad.is_finite()
            && self.lon_rad.is_finite()
            && self.lat_deg().abs() <= 90.0 + SLACK_DEG
            && self.lon_deg().abs() <= 180.0 + SLACK_DEG
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat_deg(), self.lon_deg())
    }
}

/// A circular no-go area around a stationary obstacle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExclusionZone {
    pub center: GeoPoint,
    /// Radius in kilometers
    pub radius_km: f64,
}

impl ExclusionZone {
    pub fn new(center: GeoPoint, radius_km: f64) -> Self {
        Self { center, radius_km }
    }

    /// Same zone grown by `buffer_km`.
    pub fn expanded(&self, buffer_km: f64) -> Self {
        Self {
            center: self.center,
            radius_km: self.radius_km + buffer_km,
        }
    }
}

/// Where a point of the flight path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointKind {
    /// Original caller-supplied waypoint, passed through unmodified
    Waypoint,
    /// Intermediate point placed on the great circle between two waypoints
    Generated,
    /// Intermediate point pushed out of an exclusion zone
    Deflected,
    /// Intermediate point left inside a zone after correction failed
    Uncorrected,
}

/// A single entry of a [`FlightPath`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathPoint {
    pub point: GeoPoint,
    pub kind: PointKind,
}

impl PathPoint {
    pub fn waypoint(point: GeoPoint) -> Self {
        Self {
            point,
            kind: PointKind::Waypoint,
        }
    }

    pub fn generated(point: GeoPoint) -> Self {
        Self {
            point,
            kind: PointKind::Generated,
        }
    }

    pub fn is_waypoint(&self) -> bool {
        self.kind == PointKind::Waypoint
    }
}

/// Ordered sequence of points in travel order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlightPath {
    pub points: Vec<PathPoint>,
}

impl FlightPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, point: PathPoint) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Bare coordinates, in travel order.
    pub fn coordinates(&self) -> Vec<GeoPoint> {
        self.points.iter().map(|p| p.point).collect()
    }

    /// Sum of great-circle leg lengths in kilometers.
    pub fn length_km(&self) -> f64 {
        self.points
            .windows(2)
            .map(|leg| crate::geo::distance_km(leg[0].point, leg[1].point))
            .sum()
    }

    pub fn count(&self, kind: PointKind) -> usize {
        self.points.iter().filter(|p| p.kind == kind).count()
    }
}

impl From<Vec<PathPoint>> for FlightPath {
    fn from(points: Vec<PathPoint>) -> Self {
        Self { points }
    }
}

/// Everything the planner needs from an input provider.
#[derive(Debug, Clone, Default)]
pub struct MissionInput {
    pub waypoints: Vec<GeoPoint>,
    pub zones: Vec<ExclusionZone>,
}
