//! Containment decision against a circular geofence.

use crate::config::GeofenceConfig;
use crate::error::{Error, Result};
use crate::geo::{haversine_distance, GeoPoint};

/// Outcome of evaluating one point against the geofence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationResult {
    /// Distance from the center, rounded to two decimal places.
    pub distance_meters: f64,
    /// True when the unrounded distance is within the radius (inclusive).
    pub inside: bool,
}

/// Classifies points against a borrowed [`GeofenceConfig`].
#[derive(Debug, Clone, Copy)]
pub struct GeofenceEvaluator<'a> {
    config: &'a GeofenceConfig,
}

impl<'a> GeofenceEvaluator<'a> {
    pub fn new(config: &'a GeofenceConfig) -> Self {
        Self { config }
    }

    /// Evaluate a point.
    ///
    /// The containment test uses the raw distance; only the reported
    /// distance is rounded, so a point just past the boundary can never be
    /// rounded back inside.
    pub fn evaluate(&self, point: &GeoPoint) -> Result<EvaluationResult> {
        let distance = haversine_distance(point, self.config.center());
        if !distance.is_finite() {
            return Err(Error::NonFiniteDistance { value: distance });
        }

        let inside = distance <= self.config.radius_meters();

        Ok(EvaluationResult {
            distance_meters: round_to_centimeters(distance),
            inside,
        })
    }
}

/// Round meters to two decimal places.
pub fn round_to_centimeters(meters: f64) -> f64 {
    (meters * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::EARTH_RADIUS_METERS;

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    /// Point due north of `center` whose haversine distance is `meters`.
    fn north_of(center: &GeoPoint, meters: f64) -> GeoPoint {
        let dlat = (meters / EARTH_RADIUS_METERS).to_degrees();
        point(center.lat() + dlat, center.lon())
    }

    #[test]
    fn center_is_inside_at_zero_distance() {
        let config = GeofenceConfig::default();
        let result = GeofenceEvaluator::new(&config)
            .evaluate(config.center())
            .unwrap();
        assert_eq!(result.distance_meters, 0.0);
        assert!(result.inside);
    }

    #[test]
    fn boundary_counts_as_inside() {
        let center = point(0.0, 0.0);
        let edge = north_of(&center, 1000.0);
        // Use the computed distance as the radius so the comparison is exact.
        let radius = haversine_distance(&edge, &center);
        let config = GeofenceConfig::new(center, radius).unwrap();

        let result = GeofenceEvaluator::new(&config).evaluate(&edge).unwrap();
        assert!(result.inside);
    }

    #[test]
    fn just_past_boundary_is_outside() {
        let center = point(0.0, 0.0);
        let edge = north_of(&center, 1000.0);
        let radius = haversine_distance(&edge, &center) - 1e-6;
        let config = GeofenceConfig::new(center, radius).unwrap();

        let result = GeofenceEvaluator::new(&config).evaluate(&edge).unwrap();
        assert!(!result.inside);
    }

    #[test]
    fn rounding_does_not_pull_point_inside() {
        // 50.004 m rounds to 50.00 but is still outside a 50 m fence.
        let center = point(10.0, 10.0);
        let config = GeofenceConfig::new(center, 50.0).unwrap();
        let candidate = north_of(&center, 50.004);

        let result = GeofenceEvaluator::new(&config).evaluate(&candidate).unwrap();
        assert_eq!(result.distance_meters, 50.0);
        assert!(!result.inside);
    }

    #[test]
    fn manhattan_point_is_outside_default_fence() {
        let config = GeofenceConfig::default();
        let result = GeofenceEvaluator::new(&config)
            .evaluate(&point(40.7600, -73.9840))
            .unwrap();
        assert!(!result.inside);
        assert!(
            (result.distance_meters - 5566.11).abs() < 0.01,
            "got {}",
            result.distance_meters
        );
    }

    #[test]
    fn rounds_to_two_places() {
        assert_eq!(round_to_centimeters(12.3456), 12.35);
        assert_eq!(round_to_centimeters(0.004), 0.0);
        assert_eq!(round_to_centimeters(5312.0), 5312.0);
    }
}
