//! Circular geofence configuration.

use crate::error::{Error, Result};
use crate::geo::GeoPoint;

/// Default center latitude (lower Manhattan).
pub const DEFAULT_CENTER_LAT: f64 = 40.7128;

/// Default center longitude (lower Manhattan).
pub const DEFAULT_CENTER_LON: f64 = -74.0060;

/// Default zone radius in meters.
pub const DEFAULT_RADIUS_METERS: f64 = 50.0;

/// Center and radius of the safe zone.
///
/// Built once at startup and shared by reference with every evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeofenceConfig {
    center: GeoPoint,
    radius_meters: f64,
}

impl GeofenceConfig {
    /// Create a configuration; the radius must be positive and finite.
    pub fn new(center: GeoPoint, radius_meters: f64) -> Result<Self> {
        if !radius_meters.is_finite() || radius_meters <= 0.0 {
            return Err(Error::InvalidRadius {
                value: radius_meters,
            });
        }
        Ok(Self {
            center,
            radius_meters,
        })
    }

    /// Convenience constructor from raw degrees.
    pub fn from_degrees(lat: f64, lon: f64, radius_meters: f64) -> Result<Self> {
        Self::new(GeoPoint::new(lat, lon)?, radius_meters)
    }

    pub fn center(&self) -> &GeoPoint {
        &self.center
    }

    pub fn radius_meters(&self) -> f64 {
        self.radius_meters
    }
}

impl Default for GeofenceConfig {
    fn default() -> Self {
        Self {
            center: GeoPoint::new_unchecked(DEFAULT_CENTER_LAT, DEFAULT_CENTER_LON),
            radius_meters: DEFAULT_RADIUS_METERS,
        }
    }
}
