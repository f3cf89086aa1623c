//! Mission data input: waypoints and stationary obstacles from JSON.

use anyhow::{Context, Result};
use flightpath_core::{ExclusionZone, GeoPoint, MissionInput};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Mission description as delivered by the mission server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionData {
    pub waypoints: Vec<MissionWaypoint>,
    #[serde(rename = "stationaryObstacles", default)]
    pub stationary_obstacles: Vec<StationaryObstacle>,
}

/// Waypoint in decimal degrees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionWaypoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Cylindrical obstacle; `radius` is in kilometers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationaryObstacle {
    pub latitude: f64,
    pub longitude: f64,
    pub radius: f64,
}

impl From<MissionData> for MissionInput {
    fn from(data: MissionData) -> Self {
        Self {
            waypoints: data
                .waypoints
                .iter()
                .map(|w| GeoPoint::from_degrees(w.latitude, w.longitude))
                .collect(),
            zones: data
                .stationary_obstacles
                .iter()
                .map(|o| {
                    ExclusionZone::new(GeoPoint::from_degrees(o.latitude, o.longitude), o.radius)
                })
                .collect(),
        }
    }
}

/// Parse mission JSON text.
pub fn parse_mission(json: &str) -> Result<MissionInput> {
    let data: MissionData = serde_json::from_str(json).context("invalid mission data JSON")?;
    Ok(data.into())
}

/// Read and parse a mission file.
pub fn load_mission(path: &Path) -> Result<MissionInput> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read mission file {}", path.display()))?;
    let mission =
        parse_mission(&json).with_context(|| format!("failed to parse {}", path.display()))?;
    tracing::debug!(
        "Loaded {} waypoints and {} obstacles from {}",
        mission.waypoints.len(),
        mission.zones.len(),
        path.display()
    );
    Ok(mission)
}
