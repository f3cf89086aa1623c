//! Planner configuration and its validation rules.

use crate::error::PlanError;
use serde::{Deserialize, Serialize};

/// Default spacing between generated points in kilometers.
pub const DEFAULT_STEP_DISTANCE_KM: f64 = 10.0;
/// Default safety buffer added to every exclusion radius in kilometers.
pub const DEFAULT_EXCLUSION_TOLERANCE_KM: f64 = 10.0;
/// Default angular tolerance for treating two headings as equal.
pub const DEFAULT_COLLINEARITY_TOLERANCE_RAD: f64 = 1e-6;
/// Correction passes allowed per exclusion zone before giving up on a point.
pub const CORRECTION_PASSES_PER_ZONE: usize = 2;

/// What to do with a generated point that could not be pushed out of every zone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionFailurePolicy {
    /// Fail the whole run with `CorrectionDidNotConverge`
    #[default]
    Abort,
    /// Emit the original, uncorrected candidate point and log a warning
    KeepUncorrected,
}

/// Configuration for a planning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Spacing between generated points in kilometers
    pub step_distance_km: f64,
    /// Safety margin added to each zone's own radius in kilometers
    pub exclusion_tolerance_km: f64,
    /// Headings closer than this (radians) count as collinear
    pub collinearity_tolerance_rad: f64,
    /// Upper bound on correction passes per point (None = 2 x zone count)
    pub max_correction_iterations: Option<usize>,
    pub on_correction_failure: CorrectionFailurePolicy,
    /// Keep original waypoints even when they are collinear with their neighbors
    pub pin_waypoints: bool,
    /// Run collinearity simplification after densification
    pub simplify: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            step_distance_km: DEFAULT_STEP_DISTANCE_KM,
            exclusion_tolerance_km: DEFAULT_EXCLUSION_TOLERANCE_KM,
            collinearity_tolerance_rad: DEFAULT_COLLINEARITY_TOLERANCE_RAD,
            max_correction_iterations: None,
            on_correction_failure: CorrectionFailurePolicy::Abort,
            pin_waypoints: true,
            simplify: true,
        }
    }
}

impl PlannerConfig {
    /// Reject values that would make the geometry meaningless.
    pub fn validate(&self) -> Result<(), PlanError> {
        if !self.step_distance_km.is_finite() || self.step_distance_km <= 0.0 {
            return Err(PlanError::InvalidConfiguration(format!(
                "step distance must be a positive number of km, got {}",
                self.step_distance_km
            )));
        }
        if !self.exclusion_tolerance_km.is_finite() || self.exclusion_tolerance_km < 0.0 {
            return Err(PlanError::InvalidConfiguration(format!(
                "exclusion tolerance must be zero or more km, got {}",
                self.exclusion_tolerance_km
            )));
        }
        if !self.collinearity_tolerance_rad.is_finite() || self.collinearity_tolerance_rad < 0.0 {
            return Err(PlanError::InvalidConfiguration(format!(
                "collinearity tolerance must be zero or more radians, got {}",
                self.collinearity_tolerance_rad
            )));
        }
        if self.max_correction_iterations == Some(0) {
            return Err(PlanError::InvalidConfiguration(
                "max correction iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Correction pass limit for a run with `zone_count` zones.
    pub fn correction_iterations(&self, zone_count: usize) -> usize {
        self.max_correction_iterations
            .unwrap_or(zone_count.max(1) * CORRECTION_PASSES_PER_ZONE)
    }
}
