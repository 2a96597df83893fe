//! Great-circle distance

use crate::models::GeoPoint;

/// Mean Earth radius of the spherical model, km
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometres to nautical miles
pub const NAUTICAL_MILES_PER_KM: f64 = 0.539957;

/// Great-circle distance between two points in nautical miles
///
/// Uses the Haversine formula on a sphere of radius [`EARTH_RADIUS_KM`].
/// The result is symmetric, zero for identical points and never negative.
pub fn distance_nm(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding near the poles and the antimeridian can push h just outside [0, 1]
    let h = h.clamp(0.0, 1.0);
    let central_angle = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * central_angle * NAUTICAL_MILES_PER_KM
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn one_degree_of_longitude_at_equator() {
        let d = distance_nm(&GeoPoint::new(0.0, 0.0), &GeoPoint::new(0.0, 1.0));
        assert!((d - 60.0405).abs() < 1e-3, "got {d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let pairs = [
            (GeoPoint::new(59.1, 9.65), GeoPoint::new(59.1333, 9.65)),
            (GeoPoint::new(-33.86, 151.21), GeoPoint::new(51.47, -0.45)),
            (GeoPoint::new(10.0, 179.9), GeoPoint::new(-10.0, -179.9)),
        ];
        for (a, b) in pairs {
            assert!((distance_nm(&a, &b) - distance_nm(&b, &a)).abs() < EPS);
        }
    }

    #[test]
    fn identical_points_are_zero() {
        let p = GeoPoint::new(61.866617, 28.886522);
        assert_eq!(distance_nm(&p, &p), 0.0);
    }

    #[test]
    fn antipodal_points_are_half_circumference() {
        let d = distance_nm(&GeoPoint::new(90.0, 0.0), &GeoPoint::new(-90.0, 0.0));
        let half = std::f64::consts::PI * EARTH_RADIUS_KM * NAUTICAL_MILES_PER_KM;
        assert!(d.is_finite());
        assert!((d - half).abs() < 1e-6);
    }

    #[test]
    fn antimeridian_crossing_is_short() {
        let d = distance_nm(&GeoPoint::new(0.0, 179.5), &GeoPoint::new(0.0, -179.5));
        assert!((d - 60.0405).abs() < 1e-3, "got {d}");
    }

    #[test]
    fn out_of_range_input_still_defined() {
        let d = distance_nm(&GeoPoint::new(120.0, 400.0), &GeoPoint::new(-95.0, -720.0));
        assert!(d.is_finite());
        assert!(d >= 0.0);
    }
}
