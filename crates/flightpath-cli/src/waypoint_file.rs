//! Mission Planner waypoint file output (`QGC WPL 110`).
//!
//! One header line followed by one tab-separated record per point:
//! index, two zero fields, waypoint type, four zeroed parameters,
//! latitude, longitude, altitude and an autocontinue flag of 1.

use flightpath_core::{GeoPoint, MissionPlan, MissionSink, PlanError};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

pub const DEFAULT_HEADER: &str = "QGC WPL 110";
/// MAV_CMD_NAV_WAYPOINT
pub const DEFAULT_WAYPOINT_TYPE: u16 = 16;
pub const DEFAULT_ALTITUDE_M: f64 = 150.0;
pub const DEFAULT_OUTPUT_FILE: &str = "mpmission.waypoint";

/// Metadata written alongside the path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub header: String,
    pub waypoint_type: u16,
    pub default_altitude_m: f64,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            header: DEFAULT_HEADER.to_string(),
            waypoint_type: DEFAULT_WAYPOINT_TYPE,
            default_altitude_m: DEFAULT_ALTITUDE_M,
        }
    }
}

/// Write `points` as a waypoint file.
pub fn write_waypoints<W: Write>(
    writer: &mut W,
    points: &[GeoPoint],
    options: &ExportOptions,
) -> io::Result<()> {
    writeln!(writer, "{}", options.header)?;
    for (idx, point) in points.iter().enumerate() {
        writeln!(
            writer,
            "{}\t0\t0\t{}\t0.000000\t0.000000\t0.000000\t0.000000\t{:.6}\t{:.6}\t{:.6}\t1",
            idx,
            options.waypoint_type,
            point.lat_deg(),
            point.lon_deg(),
            options.default_altitude_m
        )?;
    }
    Ok(())
}

/// Errors from writing a plan through [`WaypointFileSink`].
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Plan(#[from] PlanError),
    #[error("failed to write waypoint file: {0}")]
    Io(#[from] io::Error),
}

/// [`MissionSink`] that writes plans to any writer.
pub struct WaypointFileSink<W: Write> {
    writer: W,
    options: ExportOptions,
}

impl<W: Write> WaypointFileSink<W> {
    pub fn new(writer: W, options: ExportOptions) -> Self {
        Self { writer, options }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> MissionSink for WaypointFileSink<W> {
    type Error = ExportError;

    fn write_plan(&mut self, plan: &MissionPlan) -> Result<(), ExportError> {
        write_waypoints(&mut self.writer, &plan.path.coordinates(), &self.options)?;
        self.writer.flush()?;
        Ok(())
    }
}
