//! Geographic points and great-circle distance.

use serde::Serialize;

use crate::error::{Error, Result};

/// Mean Earth radius in meters used by [`haversine_distance`].
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// A validated WGS84 position in decimal degrees.
///
/// Construct with [`GeoPoint::new`]; out-of-range values are rejected rather
/// than clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    lat: f64,
    lon: f64,
}

impl GeoPoint {
    /// Create a point, rejecting non-finite or out-of-range coordinates.
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        if !lat.is_finite() {
            return Err(Error::NonFiniteCoordinate { axis: "latitude" });
        }
        if !lon.is_finite() {
            return Err(Error::NonFiniteCoordinate { axis: "longitude" });
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(Error::LatitudeOutOfRange { value: lat });
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(Error::LongitudeOutOfRange { value: lon });
        }
        Ok(Self { lat, lon })
    }

    /// Build a point from constants already known to be in range.
    pub(crate) const fn new_unchecked(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lat, self.lon)
    }
}

/// Great-circle surface distance in meters between two points.
///
/// Uses the haversine formula on a sphere of radius [`EARTH_RADIUS_METERS`].
/// The result is symmetric and exactly zero for identical points.
pub fn haversine_distance(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let d_phi = (b.lat - a.lat).to_radians();
    let d_lambda = (b.lon - a.lon).to_radians();

    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    // Rounding can push h a hair past 1 for antipodal points.
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_METERS * c
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).expect("valid point")
    }

    #[test]
    fn accepts_range_boundaries() {
        assert!(GeoPoint::new(90.0, 180.0).is_ok());
        assert!(GeoPoint::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn rejects_out_of_range_latitude() {
        let err = GeoPoint::new(200.0, 0.0).unwrap_err();
        assert_eq!(err, Error::LatitudeOutOfRange { value: 200.0 });
    }

    #[test]
    fn rejects_out_of_range_longitude() {
        let err = GeoPoint::new(0.0, -180.0001).unwrap_err();
        assert!(matches!(err, Error::LongitudeOutOfRange { .. }));
    }

    #[test]
    fn rejects_non_finite_values() {
        assert_eq!(
            GeoPoint::new(f64::NAN, 0.0).unwrap_err(),
            Error::NonFiniteCoordinate { axis: "latitude" }
        );
        assert_eq!(
            GeoPoint::new(0.0, f64::INFINITY).unwrap_err(),
            Error::NonFiniteCoordinate { axis: "longitude" }
        );
    }

    #[test]
    fn identical_points_are_zero_apart() {
        let nyc = point(40.7128, -74.0060);
        assert_eq!(haversine_distance(&nyc, &nyc), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = point(40.7128, -74.0060);
        let b = point(51.5074, -0.1278);
        let ab = haversine_distance(&a, &b);
        let ba = haversine_distance(&b, &a);
        assert!((ab - ba).abs() < 1e-9, "{ab} != {ba}");
    }

    #[test]
    fn one_degree_of_latitude() {
        let d = haversine_distance(&point(0.0, 0.0), &point(1.0, 0.0));
        assert!((d - 111_195.0).abs() < 50.0, "got {d}");
    }

    #[test]
    fn antipodal_points_are_half_circumference() {
        let d = haversine_distance(&point(0.0, 0.0), &point(0.0, 180.0));
        let expected = std::f64::consts::PI * EARTH_RADIUS_METERS;
        assert!((d - expected).abs() < 1e-6);
    }

    #[test]
    fn display_shows_both_coordinates() {
        assert_eq!(point(40.5, -74.25).to_string(), "(40.5, -74.25)");
    }
}
