//! Flight path planning core.
//!
//! Turns a sparse list of mission waypoints into a densified path that keeps
//! generated points out of circular exclusion zones, then drops points that
//! add no change of direction.

pub mod config;
pub mod densify;
pub mod error;
pub mod exclusion;
pub mod geo;
pub mod mission;
pub mod models;
pub mod simplify;

pub use config::{CorrectionFailurePolicy, PlannerConfig};
pub use densify::PathDensifier;
pub use error::PlanError;
pub use exclusion::{Correction, ExclusionCorrector};
pub use geo::{
    bearing, destination, distance_km, normalize_bearing, point_towards, EARTH_RADIUS_KM,
};
pub use mission::{MissionAssembler, MissionPlan, MissionSink, PlanStats};
pub use models::{ExclusionZone, FlightPath, GeoPoint, MissionInput, PathPoint, PointKind};
pub use simplify::PathSimplifier;
