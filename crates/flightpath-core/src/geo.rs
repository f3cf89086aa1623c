//! Great-circle math for distance, bearing and point projection.
//!
//! All functions take [`GeoPoint`]s, which hold radians internally, so no
//! unit conversion happens in here.

use crate::models::GeoPoint;
use std::f64::consts::{PI, TAU};

/// Mean Earth radius in kilometers used by every distance calculation.
pub const EARTH_RADIUS_KM: f64 = 6372.795477598;

/// Great-circle distance between two points in kilometers.
///
/// Uses the haversine form of the spherical law of cosines, which stays
/// accurate for very short and near-antipodal separations. Coincident
/// points yield exactly `0.0`.
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    if a == b {
        return 0.0;
    }
    let dphi = b.lat_rad() - a.lat_rad();
    let dlambda = b.lon_rad() - a.lon_rad();
    let h = (dphi / 2.0).sin().powi(2)
        + a.lat_rad().cos() * b.lat_rad().cos() * (dlambda / 2.0).sin().powi(2);
    let h = h.clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Initial bearing from `a` to `b` in radians, in `[0, 2π)`.
///
/// 0 = north, π/2 = east. Coincident points have no defined heading and
/// return 0.
pub fn bearing(a: GeoPoint, b: GeoPoint) -> f64 {
    if a == b {
        return 0.0;
    }
    let phi1 = a.lat_rad();
    let phi2 = b.lat_rad();
    let delta_lambda = b.lon_rad() - a.lon_rad();

    let x = delta_lambda.sin() * phi2.cos();
    let y = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lambda.cos();

    normalize_bearing(x.atan2(y))
}

/// Project a point `distance_km` away from `origin` along `bearing_rad`.
///
/// # Arguments
/// * `origin` - Starting position
/// * `bearing_rad` - Initial heading in radians (0 = north, π/2 = east)
/// * `distance_km` - Great-circle distance to travel
///
/// # Returns
/// The destination point, longitude wrapped into `[-π, π)`.
pub fn destination(origin: GeoPoint, bearing_rad: f64, distance_km: f64) -> GeoPoint {
    if distance_km.abs() <= f64::EPSILON {
        return origin;
    }

    let lat1 = origin.lat_rad();
    let lon1 = origin.lon_rad();
    let angular_distance = distance_km / EARTH_RADIUS_KM;

    let sin_lat1 = lat1.sin();
    let cos_lat1 = lat1.cos();
    let sin_ad = angular_distance.sin();
    let cos_ad = angular_distance.cos();

    let sin_lat2 = sin_lat1 * cos_ad + cos_lat1 * sin_ad * bearing_rad.cos();
    let lat2 = sin_lat2.clamp(-1.0, 1.0).asin();

    let y = bearing_rad.sin() * sin_ad * cos_lat1;
    let x = cos_ad - sin_lat1 * sin_lat2;
    let lon2 = wrap_longitude(lon1 + y.atan2(x));

    GeoPoint::from_radians(lat2, lon2)
}

/// Point `distance_km` away from `origin` on the great circle towards `target`.
///
/// Used for regular step placement and for pushing a point out of an
/// exclusion zone (with the zone center as `origin`).
pub fn point_towards(origin: GeoPoint, target: GeoPoint, distance_km: f64) -> GeoPoint {
    destination(origin, bearing(origin, target), distance_km)
}

/// Bring any angle into `[0, 2π)`.
pub fn normalize_bearing(angle_rad: f64) -> f64 {
    let wrapped = angle_rad.rem_euclid(TAU);
    // rem_euclid can round tiny negative inputs up to exactly TAU
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Smallest absolute difference between two headings, in `[0, π]`.
pub fn bearing_difference(a_rad: f64, b_rad: f64) -> f64 {
    let diff = (a_rad - b_rad).abs().rem_euclid(TAU);
    diff.min(TAU - diff)
}

fn wrap_longitude(lon_rad: f64) -> f64 {
    (lon_rad + PI).rem_euclid(TAU) - PI
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_distance_known_degree_of_latitude() {
        // ~111km between these points (1 degree latitude)
        let dist = distance_km(
            GeoPoint::from_degrees(0.0, 0.0),
            GeoPoint::from_degrees(1.0, 0.0),
        );
        assert!((dist - 111.226).abs() < 0.01, "got {dist}");
    }

    #[test]
    fn test_distance_same_point_is_zero() {
        let p = GeoPoint::from_degrees(33.6846, -117.8265);
        assert_eq!(distance_km(p, p), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = GeoPoint::from_degrees(33.6846, -117.8265);
        let b = GeoPoint::from_degrees(-12.5, 44.25);
        assert!((distance_km(a, b) - distance_km(b, a)).abs() < 1e-9);
    }

    #[test]
    fn test_distance_near_antipodal_is_finite() {
        let a = GeoPoint::from_degrees(0.0, 0.0);
        let b = GeoPoint::from_degrees(0.0, 180.0);
        let dist = distance_km(a, b);
        assert!(dist.is_finite());
        assert!((dist - PI * EARTH_RADIUS_KM).abs() < 1e-6, "got {dist}");

        let c = GeoPoint::from_degrees(-0.000_001, 179.999_999);
        assert!(distance_km(a, c).is_finite());
    }

    #[test]
    fn test_bearing_cardinal_directions() {
        let origin = GeoPoint::from_degrees(0.0, 0.0);
        let north = bearing(origin, GeoPoint::from_degrees(1.0, 0.0));
        let east = bearing(origin, GeoPoint::from_degrees(0.0, 1.0));
        let south = bearing(origin, GeoPoint::from_degrees(-1.0, 0.0));
        let west = bearing(origin, GeoPoint::from_degrees(0.0, -1.0));

        assert!(north.abs() < 1e-12);
        assert!((east - FRAC_PI_2).abs() < 1e-12);
        assert!((south - PI).abs() < 1e-12);
        assert!((west - 3.0 * FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_bearing_coincident_points_is_zero() {
        let p = GeoPoint::from_degrees(48.1, 11.6);
        assert_eq!(bearing(p, p), 0.0);
    }

    #[test]
    fn test_destination_round_trip() {
        let origin = GeoPoint::from_degrees(47.3977, 8.5456);
        for (theta, d) in [(0.3, 12.0), (2.0, 250.0), (4.5, 0.75), (6.1, 1500.0)] {
            let dest = destination(origin, theta, d);
            let back = distance_km(origin, dest);
            assert!((back - d).abs() < 1e-6, "bearing {theta}: expected {d}, got {back}");
            assert!(bearing_difference(bearing(origin, dest), theta) < 1e-9);
        }
    }

    #[test]
    fn test_destination_zero_distance_returns_origin() {
        let origin = GeoPoint::from_degrees(10.0, 20.0);
        assert_eq!(destination(origin, 1.0, 0.0), origin);
    }

    #[test]
    fn test_destination_wraps_dateline() {
        let origin = GeoPoint::from_degrees(0.0, 179.95);
        let dest = destination(origin, FRAC_PI_2, 20.0);
        assert!(dest.lon_deg() < -179.0, "got {}", dest.lon_deg());
    }

    #[test]
    fn test_point_towards_stays_on_track() {
        let a = GeoPoint::from_degrees(0.0, 0.0);
        let b = GeoPoint::from_degrees(0.0, 1.0);
        let p = point_towards(a, b, 10.0);
        assert!(p.lat_deg().abs() < 1e-12);
        assert!((distance_km(a, p) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_bearing_difference_wraps() {
        assert!((bearing_difference(0.01, TAU - 0.01) - 0.02).abs() < 1e-12);
        assert!((bearing_difference(0.0, PI) - PI).abs() < 1e-12);
        assert_eq!(normalize_bearing(-0.0), 0.0);
        assert!(normalize_bearing(-1e-20) < TAU);
    }
}
