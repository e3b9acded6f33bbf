use thiserror::Error;

/// Convenient result alias for the geofence library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Latitude outside the [-90, 90] degree range.
    #[error("latitude {value} is outside [-90, 90]")]
    LatitudeOutOfRange { value: f64 },

    /// Longitude outside the [-180, 180] degree range.
    #[error("longitude {value} is outside [-180, 180]")]
    LongitudeOutOfRange { value: f64 },

    /// NaN or infinite coordinate.
    #[error("{axis} must be a finite number")]
    NonFiniteCoordinate { axis: &'static str },

    /// Geofence radius that is not a positive finite number of meters.
    #[error("geofence radius must be a positive number of meters, got {value}")]
    InvalidRadius { value: f64 },

    /// Distance computation produced NaN or infinity.
    #[error("distance from geofence center is not finite ({value})")]
    NonFiniteDistance { value: f64 },
}
