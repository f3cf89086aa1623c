//! Error types for flight path planning.

/// Errors reported by the planner. All of them abort the run before any
/// output is handed to a sink.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    #[error("at least 2 waypoints are required, got {found}")]
    InsufficientWaypoints { found: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("waypoint {index} has invalid coordinates ({lat_deg}, {lon_deg})")]
    InvalidCoordinate {
        index: usize,
        lat_deg: f64,
        lon_deg: f64,
    },

    #[error("exclusion zone {index} has invalid radius {radius_km} km")]
    InvalidZone { index: usize, radius_km: f64 },

    #[error("exclusion zone {index} has invalid center ({lat_deg}, {lon_deg})")]
    InvalidZoneCenter {
        index: usize,
        lat_deg: f64,
        lon_deg: f64,
    },

    #[error(
        "exclusion correction for point ({lat_deg:.6}, {lon_deg:.6}) did not converge after {iterations} iterations"
    )]
    CorrectionDidNotConverge {
        lat_deg: f64,
        lon_deg: f64,
        iterations: usize,
    },
}
