//! Path densification between consecutive waypoints.

use crate::config::CorrectionFailurePolicy;
use crate::error::PlanError;
use crate::exclusion::ExclusionCorrector;
use crate::geo::{bearing, destination, distance_km};
use crate::models::{FlightPath, GeoPoint, PathPoint, PointKind};

/// Upper bound on intermediate points generated for one mission.
pub const MAX_GENERATED_POINTS: usize = 1_000_000;

/// Places intermediate points along each waypoint-to-waypoint great circle.
#[derive(Debug, Clone)]
pub struct PathDensifier {
    step_distance_km: f64,
    on_failure: CorrectionFailurePolicy,
}

impl PathDensifier {
    pub fn new(step_distance_km: f64) -> Self {
        Self {
            step_distance_km,
            on_failure: CorrectionFailurePolicy::Abort,
        }
    }

    pub fn with_failure_policy(mut self, policy: CorrectionFailurePolicy) -> Self {
        self.on_failure = policy;
        self
    }

    /// Build the densified path.
    ///
    /// Every waypoint is passed through unmodified. Between `w[i]` and
    /// `w[i+1]`, `floor(distance / step)` points are placed at multiples of
    /// the step distance from `w[i]` and run through `corrector`.
    pub fn densify(
        &self,
        waypoints: &[GeoPoint],
        corrector: &ExclusionCorrector,
    ) -> Result<FlightPath, PlanError> {
        if waypoints.len() < 2 {
            return Err(PlanError::InsufficientWaypoints {
                found: waypoints.len(),
            });
        }
        if !self.step_distance_km.is_finite() || self.step_distance_km <= 0.0 {
            return Err(PlanError::InvalidConfiguration(format!(
                "step distance must be a positive number of km, got {}",
                self.step_distance_km
            )));
        }

        let planned: f64 = waypoints
            .windows(2)
            .map(|pair| (distance_km(pair[0], pair[1]) / self.step_distance_km).floor())
            .sum();
        if planned > MAX_GENERATED_POINTS as f64 {
            return Err(PlanError::InvalidConfiguration(format!(
                "step distance {} km would generate {} points, limit is {}",
                self.step_distance_km, planned, MAX_GENERATED_POINTS
            )));
        }

        let mut path = FlightPath::new();

        for (segment, pair) in waypoints.windows(2).enumerate() {
            let (start, end) = (pair[0], pair[1]);
            path.push(PathPoint::waypoint(start));

            let total_km = distance_km(start, end);
            if total_km == 0.0 {
                tracing::debug!("Segment {}: zero length, no intermediate points", segment);
                continue;
            }

            let num_points = (total_km / self.step_distance_km).floor() as usize;
            let heading = bearing(start, end);
            tracing::debug!(
                "Segment {}: {:.3} km, {} intermediate points",
                segment,
                total_km,
                num_points
            );

            for k in 1..=num_points {
                let candidate = destination(start, heading, k as f64 * self.step_distance_km);
                path.push(self.place(candidate, corrector)?);
            }
        }

        if let Some(last) = waypoints.last() {
            path.push(PathPoint::waypoint(*last));
        }

        Ok(path)
    }

    fn place(
        &self,
        candidate: GeoPoint,
        corrector: &ExclusionCorrector,
    ) -> Result<PathPoint, PlanError> {
        match corrector.correct(candidate) {
            Ok(correction) => Ok(PathPoint {
                point: correction.point,
                kind: if correction.is_deflected() {
                    PointKind::Deflected
                } else {
                    PointKind::Generated
                },
            }),
            Err(err @ PlanError::CorrectionDidNotConverge { .. }) => match self.on_failure {
                CorrectionFailurePolicy::Abort => Err(err),
                CorrectionFailurePolicy::KeepUncorrected => {
                    tracing::warn!("{}; keeping point uncorrected", err);
                    Ok(PathPoint {
                        point: candidate,
                        kind: PointKind::Uncorrected,
                    })
                }
            },
            Err(err) => Err(err),
        }
    }
}
