//! Environment-driven service configuration, read once at cold start.

use thiserror::Error;

use geofence_lib::config::{DEFAULT_CENTER_LAT, DEFAULT_CENTER_LON, DEFAULT_RADIUS_METERS};
use geofence_lib::GeofenceConfig;

/// DynamoDB table receiving event records.
pub const ENV_DYNAMODB_TABLE: &str = "DYNAMODB_TABLE";
/// SNS topic receiving alerts.
pub const ENV_SNS_TOPIC_ARN: &str = "SNS_TOPIC_ARN";
pub const ENV_CENTER_LAT: &str = "GEOFENCE_CENTER_LAT";
pub const ENV_CENTER_LON: &str = "GEOFENCE_CENTER_LON";
pub const ENV_RADIUS_METERS: &str = "GEOFENCE_RADIUS_METERS";

/// Table name used when `DYNAMODB_TABLE` is unset.
pub const DEFAULT_TABLE_NAME: &str = "GeofenceEvents";

/// Configuration failure that prevents the function from starting.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} must be a number, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },

    #[error("invalid geofence configuration: {0}")]
    Geofence(#[from] geofence_lib::Error),
}

/// Everything the function needs from its environment.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub table_name: String,
    /// Alerts are skipped (and logged) when no topic is configured.
    pub topic_arn: Option<String>,
    pub geofence: GeofenceConfig,
}

impl ServiceConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let number = |key: &'static str, default: f64| -> Result<f64, ConfigError> {
            match get(key) {
                None => Ok(default),
                Some(value) => value
                    .parse::<f64>()
                    .map_err(|_| ConfigError::InvalidNumber { key, value }),
            }
        };

        let geofence = GeofenceConfig::from_degrees(
            number(ENV_CENTER_LAT, DEFAULT_CENTER_LAT)?,
            number(ENV_CENTER_LON, DEFAULT_CENTER_LON)?,
            number(ENV_RADIUS_METERS, DEFAULT_RADIUS_METERS)?,
        )?;

        Ok(Self {
            table_name: get(ENV_DYNAMODB_TABLE).unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string()),
            topic_arn: get(ENV_SNS_TOPIC_ARN),
            geofence,
        })
    }
}
