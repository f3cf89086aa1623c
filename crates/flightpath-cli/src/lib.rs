//! Flight path CLI - mission data in, Mission Planner waypoint file out.
//!
//! This crate provides:
//! - mission_file: mission JSON reader
//! - waypoint_file: `QGC WPL 110` writer
//! - plan-flight: the command line binary

pub mod mission_file;
pub mod waypoint_file;

pub use mission_file::{load_mission, parse_mission, MissionData};
pub use waypoint_file::{write_waypoints, ExportOptions, WaypointFileSink};

use anyhow::{Context, Result};
use flightpath_core::{CorrectionFailurePolicy, MissionAssembler, PlanStats, PlannerConfig};
use std::path::Path;

/// Load a [`PlannerConfig`] from a JSON file. Missing fields keep their defaults.
pub fn load_planner_config(path: &Path) -> Result<PlannerConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config: PlannerConfig = serde_json::from_str(&json)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    Ok(config)
}

/// Command line values that take precedence over a config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub step_distance_km: Option<f64>,
    pub exclusion_tolerance_km: Option<f64>,
    pub collinearity_tolerance_rad: Option<f64>,
    pub keep_uncorrected: bool,
    pub no_simplify: bool,
}

impl ConfigOverrides {
    /// Apply the values that were set; everything else keeps `config`'s value.
    pub fn apply(&self, mut config: PlannerConfig) -> PlannerConfig {
        if let Some(step) = self.step_distance_km {
            config.step_distance_km = step;
        }
        if let Some(tolerance) = self.exclusion_tolerance_km {
            config.exclusion_tolerance_km = tolerance;
        }
        if let Some(tolerance) = self.collinearity_tolerance_rad {
            config.collinearity_tolerance_rad = tolerance;
        }
        if self.keep_uncorrected {
            config.on_correction_failure = CorrectionFailurePolicy::KeepUncorrected;
        }
        if self.no_simplify {
            config.simplify = false;
        }
        config
    }
}

/// Defaults, then the optional config file, then command line overrides.
pub fn resolve_planner_config(
    config_path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<PlannerConfig> {
    let base = match config_path {
        Some(path) => load_planner_config(path)?,
        None => PlannerConfig::default(),
    };
    Ok(overrides.apply(base))
}

/// Plan the mission in `input` and write the waypoint file to `output`.
///
/// The file is only created once planning has succeeded.
pub fn plan_mission_file(
    input: &Path,
    output: &Path,
    config: &PlannerConfig,
    export: &ExportOptions,
) -> Result<PlanStats> {
    let mission = load_mission(input)?;

    let mut sink = WaypointFileSink::new(Vec::new(), export.clone());
    let stats = MissionAssembler::new(config.clone())
        .assemble(&mission, &mut sink)
        .context("flight path planning failed")?;

    std::fs::write(output, sink.into_inner())
        .with_context(|| format!("failed to write waypoint file {}", output.display()))?;
    tracing::info!("Wrote {} points to {}", stats.output_points, output.display());

    Ok(stats)
}
