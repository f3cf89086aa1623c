//! Mission assembly: densify, simplify, then hand off to a sink.

use crate::config::PlannerConfig;
use crate::densify::PathDensifier;
use crate::error::PlanError;
use crate::exclusion::{validate_zones, ExclusionCorrector};
use crate::models::{FlightPath, MissionInput, PointKind};
use crate::simplify::PathSimplifier;
use serde::{Deserialize, Serialize};

/// Summary numbers for a planned mission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanStats {
    pub waypoints: usize,
    pub generated_points: usize,
    pub deflected_points: usize,
    pub uncorrected_points: usize,
    pub removed_points: usize,
    pub output_points: usize,
    pub route_length_km: f64,
}

/// Final, simplified flight path plus statistics.
#[derive(Debug, Clone)]
pub struct MissionPlan {
    pub path: FlightPath,
    pub stats: PlanStats,
}

/// Consumer of a finished plan, e.g. a waypoint file writer.
pub trait MissionSink {
    type Error: From<PlanError>;

    fn write_plan(&mut self, plan: &MissionPlan) -> Result<(), Self::Error>;
}

/// Runs the planning pipeline with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct MissionAssembler {
    config: PlannerConfig,
}

impl MissionAssembler {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    /// Validate the input, densify it and simplify the result.
    pub fn plan(&self, input: &MissionInput) -> Result<MissionPlan, PlanError> {
        self.config.validate()?;
        if input.waypoints.len() < 2 {
            return Err(PlanError::InsufficientWaypoints {
                found: input.waypoints.len(),
            });
        }
        for (index, waypoint) in input.waypoints.iter().enumerate() {
            if !waypoint.is_valid() {
                return Err(PlanError::InvalidCoordinate {
                    index,
                    lat_deg: waypoint.lat_deg(),
                    lon_deg: waypoint.lon_deg(),
                });
            }
        }
        validate_zones(&input.zones)?;

        let corrector = ExclusionCorrector::new(&input.zones, self.config.exclusion_tolerance_km)
            .with_max_iterations(self.config.correction_iterations(input.zones.len()));

        let densified = PathDensifier::new(self.config.step_distance_km)
            .with_failure_policy(self.config.on_correction_failure)
            .densify(&input.waypoints, &corrector)?;

        let path = if self.config.simplify {
            PathSimplifier::new(self.config.collinearity_tolerance_rad)
                .pin_waypoints(self.config.pin_waypoints)
                .simplify(&densified)
        } else {
            densified.clone()
        };

        let generated = densified.len() - densified.count(PointKind::Waypoint);
        let stats = PlanStats {
            waypoints: input.waypoints.len(),
            generated_points: generated,
            deflected_points: densified.count(PointKind::Deflected),
            uncorrected_points: densified.count(PointKind::Uncorrected),
            removed_points: densified.len() - path.len(),
            output_points: path.len(),
            route_length_km: path.length_km(),
        };

        tracing::info!(
            "Planned {} waypoints into {} points ({} generated, {} deflected, {} removed, {:.1} km)",
            stats.waypoints,
            stats.output_points,
            stats.generated_points,
            stats.deflected_points,
            stats.removed_points,
            stats.route_length_km
        );
        if stats.uncorrected_points > 0 {
            tracing::warn!(
                "{} points could not be moved out of exclusion zones",
                stats.uncorrected_points
            );
        }

        Ok(MissionPlan { path, stats })
    }

    /// Plan and pass the result to `sink`. Nothing reaches the sink on error.
    pub fn assemble<S: MissionSink>(
        &self,
        input: &MissionInput,
        sink: &mut S,
    ) -> Result<PlanStats, S::Error> {
        let plan = self.plan(input)?;
        sink.write_plan(&plan)?;
        Ok(plan.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exclusion::CONTAINMENT_EPSILON_KM;
    use crate::geo::{destination, distance_km};
    use crate::models::{ExclusionZone, GeoPoint};
    use std::f64::consts::FRAC_PI_2;

    #[derive(Default)]
    struct RecordingSink {
        plans: Vec<FlightPath>,
    }

    impl MissionSink for RecordingSink {
        type Error = PlanError;

        fn write_plan(&mut self, plan: &MissionPlan) -> Result<(), PlanError> {
            self.plans.push(plan.path.clone());
            Ok(())
        }
    }

    fn mission(waypoints: Vec<GeoPoint>, zones: Vec<ExclusionZone>) -> MissionInput {
        MissionInput { waypoints, zones }
    }

    #[test]
    fn test_single_waypoint_is_rejected_without_output() {
        let input = mission(vec![GeoPoint::from_degrees(0.0, 0.0)], Vec::new());
        let mut sink = RecordingSink::default();

        let err = MissionAssembler::default()
            .assemble(&input, &mut sink)
            .unwrap_err();
        assert_eq!(err, PlanError::InsufficientWaypoints { found: 1 });
        assert!(sink.plans.is_empty());
    }

    #[test]
    fn test_invalid_configuration_is_rejected() {
        let input = mission(
            vec![
                GeoPoint::from_degrees(0.0, 0.0),
                GeoPoint::from_degrees(0.0, 1.0),
            ],
            Vec::new(),
        );
        let config = PlannerConfig {
            step_distance_km: 0.0,
            ..PlannerConfig::default()
        };
        assert!(matches!(
            MissionAssembler::new(config).plan(&input),
            Err(PlanError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_invalid_zone_and_coordinate_are_rejected() {
        let good = vec![
            GeoPoint::from_degrees(0.0, 0.0),
            GeoPoint::from_degrees(0.0, 1.0),
        ];
        let bad_zone = mission(
            good.clone(),
            vec![ExclusionZone::new(GeoPoint::from_degrees(0.0, 0.5), 0.0)],
        );
        assert!(matches!(
            MissionAssembler::default().plan(&bad_zone),
            Err(PlanError::InvalidZone { index: 0, .. })
        ));

        let bad_point = mission(
            vec![good[0], GeoPoint::from_degrees(95.0, 0.0)],
            Vec::new(),
        );
        assert!(matches!(
            MissionAssembler::default().plan(&bad_point),
            Err(PlanError::InvalidCoordinate { index: 1, .. })
        ));
    }

    #[test]
    fn test_straight_equator_route_collapses_to_waypoints() {
        let start = GeoPoint::from_degrees(0.0, 0.0);
        let end = destination(start, FRAC_PI_2, 45.0);
        let mut sink = RecordingSink::default();

        let stats = MissionAssembler::default()
            .assemble(&mission(vec![start, end], Vec::new()), &mut sink)
            .unwrap();

        assert_eq!(stats.generated_points, 4);
        assert_eq!(stats.removed_points, 4);
        assert_eq!(sink.plans[0].coordinates(), vec![start, end]);
        assert!((stats.route_length_km - 45.0).abs() < 1e-6);
    }

    #[test]
    fn test_straight_mid_latitude_route_collapses_to_waypoints() {
        let start = GeoPoint::from_degrees(47.0, 8.0);
        let end = destination(start, 0.8, 100.0);
        let config = PlannerConfig {
            exclusion_tolerance_km: 0.0,
            ..PlannerConfig::default()
        };

        let plan = MissionAssembler::new(config)
            .plan(&mission(vec![start, end], Vec::new()))
            .unwrap();

        assert_eq!(plan.stats.generated_points, plan.stats.removed_points);
        assert!(plan.stats.generated_points >= 9);
        assert_eq!(plan.path.coordinates(), vec![start, end]);
    }

    #[test]
    fn test_simplification_can_be_disabled() {
        let start = GeoPoint::from_degrees(0.0, 0.0);
        let end = destination(start, FRAC_PI_2, 45.0);
        let config = PlannerConfig {
            simplify: false,
            ..PlannerConfig::default()
        };
        let plan = MissionAssembler::new(config)
            .plan(&mission(vec![start, end], Vec::new()))
            .unwrap();
        assert_eq!(plan.path.len(), 6);
        assert_eq!(plan.stats.removed_points, 0);
    }

    #[test]
    fn test_obstacle_route_stays_clear_with_tolerance_buffer() {
        let start = GeoPoint::from_degrees(46.0, 7.0);
        let end = destination(start, 1.2, 80.0);
        let center = destination(start, 1.2, 40.0);
        let zone = ExclusionZone::new(center, 3.0);
        let config = PlannerConfig {
            step_distance_km: 2.0,
            exclusion_tolerance_km: 2.0,
            ..PlannerConfig::default()
        };

        let plan = MissionAssembler::new(config)
            .plan(&mission(vec![start, end], vec![zone]))
            .unwrap();

        assert!(plan.stats.deflected_points > 0);
        assert_eq!(plan.path.points.first().map(|p| p.point), Some(start));
        assert_eq!(plan.path.points.last().map(|p| p.point), Some(end));
        for p in plan.path.points.iter().filter(|p| !p.is_waypoint()) {
            let dist = distance_km(p.point, center);
            assert!(dist >= 5.0 - CONTAINMENT_EPSILON_KM, "{} km from center", dist);
        }
    }

    #[test]
    fn test_waypoint_inside_zone_is_passed_through() {
        let start = GeoPoint::from_degrees(10.0, 10.0);
        let end = destination(start, 0.0, 30.0);
        let zone = ExclusionZone::new(start, 4.0);
        let config = PlannerConfig {
            exclusion_tolerance_km: 0.0,
            ..PlannerConfig::default()
        };

        let plan = MissionAssembler::new(config)
            .plan(&mission(vec![start, end], vec![zone]))
            .unwrap();
        assert_eq!(plan.path.points[0].point, start);
        assert_eq!(plan.path.points[0].kind, PointKind::Waypoint);
    }
}
