//! Location report payload and its validation.

use serde::de::{Deserializer, Error as _};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use geofence_lib::{resolve_device_id, GeoPoint};

/// Reasons a location report is rejected before evaluation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Payload is not a JSON object.
    #[error("Invalid request: expected a JSON object")]
    NotAnObject,

    /// A present field could not be read.
    #[error("Invalid request: {0}")]
    Malformed(String),

    /// Latitude or longitude absent (or JSON `null`).
    #[error("Missing lat/lon")]
    MissingCoordinates,

    /// Both coordinates present but not a valid position.
    #[error("Invalid lat/lon: {0}")]
    InvalidCoordinates(#[from] geofence_lib::Error),
}

/// A device location report as delivered to the function.
///
/// Coordinates may arrive as JSON numbers or numeric strings. The device
/// identity is read from `device_id`, falling back to `deviceId`; any
/// non-string identity is kept as its JSON text.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LocationReport {
    /// Latitude in decimal degrees.
    #[serde(default, deserialize_with = "coordinate")]
    pub lat: Option<f64>,

    /// Longitude in decimal degrees.
    #[serde(default, deserialize_with = "coordinate")]
    pub lon: Option<f64>,

    /// Preferred device identity field.
    #[serde(default, deserialize_with = "device_identity")]
    pub device_id: Option<String>,

    /// Alternate spelling of the device identity.
    #[serde(default, rename = "deviceId", deserialize_with = "device_identity")]
    pub device_id_alt: Option<String>,
}

impl LocationReport {
    /// Read a report from a raw event payload.
    ///
    /// Coordinate presence is decided on the raw object before any field is
    /// parsed, so a report lacking `lat` or `lon` is always
    /// [`ValidationError::MissingCoordinates`] whatever else it carries.
    pub fn from_payload(payload: Value) -> Result<Self, ValidationError> {
        let Value::Object(fields) = &payload else {
            return Err(ValidationError::NotAnObject);
        };
        let present = |key: &str| fields.get(key).is_some_and(|value| !value.is_null());
        if !(present("lat") && present("lon")) {
            return Err(ValidationError::MissingCoordinates);
        }

        serde_json::from_value(payload).map_err(|e| ValidationError::Malformed(e.to_string()))
    }

    /// Check coordinates and return the validated point.
    ///
    /// Presence is checked first so a report missing either coordinate is
    /// always a [`ValidationError::MissingCoordinates`].
    pub fn validate(&self) -> Result<GeoPoint, ValidationError> {
        let (Some(lat), Some(lon)) = (self.lat, self.lon) else {
            return Err(ValidationError::MissingCoordinates);
        };
        Ok(GeoPoint::new(lat, lon)?)
    }

    /// Resolved device identity, `"unknown"` when neither field is set.
    pub fn device_id(&self) -> String {
        resolve_device_id(self.device_id.as_deref(), self.device_id_alt.as_deref())
    }
}

fn coordinate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => number
            .as_f64()
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("coordinate {number} is not a float"))),
        Some(Value::String(text)) => text
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("coordinate {text:?} is not a number"))),
        Some(other) => Err(D::Error::custom(format!(
            "coordinate must be a number, got {other}"
        ))),
    }
}

fn device_identity<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(other) => Ok(Some(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> LocationReport {
        serde_json::from_value(value).expect("report should parse")
    }

    #[test]
    fn parses_numeric_coordinates() {
        let report = parse(json!({"lat": 40.7128, "lon": -74.0060, "device_id": "a1"}));
        assert_eq!(report.lat, Some(40.7128));
        assert_eq!(report.lon, Some(-74.0060));
        assert_eq!(report.device_id(), "a1");
    }

    #[test]
    fn parses_string_coordinates() {
        let report = parse(json!({"lat": " 12.5 ", "lon": "-3"}));
        assert_eq!(report.lat, Some(12.5));
        assert_eq!(report.lon, Some(-3.0));
    }

    #[test]
    fn null_coordinates_are_missing() {
        let report = parse(json!({"lat": null, "lon": 1.0}));
        assert_eq!(report.validate(), Err(ValidationError::MissingCoordinates));
    }

    #[test]
    fn missing_latitude_is_rejected() {
        let report = parse(json!({"lon": -74.0060, "device_id": "x"}));
        let err = report.validate().unwrap_err();
        assert_eq!(err.to_string(), "Missing lat/lon");
    }

    #[test]
    fn missing_longitude_is_rejected() {
        let report = parse(json!({"lat": 40.0}));
        assert_eq!(report.validate(), Err(ValidationError::MissingCoordinates));
    }

    #[test]
    fn out_of_range_latitude_is_invalid() {
        let report = parse(json!({"lat": 200, "lon": 0}));
        let err = report.validate().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidCoordinates(_)));
        assert_eq!(err.to_string(), "Invalid lat/lon: latitude 200 is outside [-90, 90]");
    }

    #[test]
    fn rejects_non_numeric_coordinate() {
        let result: Result<LocationReport, _> =
            serde_json::from_value(json!({"lat": "north", "lon": 1}));
        assert!(result.is_err());

        let result: Result<LocationReport, _> =
            serde_json::from_value(json!({"lat": [1, 2], "lon": 1}));
        assert!(result.is_err());
    }

    #[test]
    fn device_id_field_priority() {
        let both = parse(json!({"device_id": "primary", "deviceId": "alternate"}));
        assert_eq!(both.device_id(), "primary");

        let alternate = parse(json!({"deviceId": "alternate"}));
        assert_eq!(alternate.device_id(), "alternate");

        let null_primary = parse(json!({"device_id": null, "deviceId": "alternate"}));
        assert_eq!(null_primary.device_id(), "alternate");

        let neither = parse(json!({"lat": 1, "lon": 2}));
        assert_eq!(neither.device_id(), "unknown");
    }

    #[test]
    fn numeric_device_id_is_stringified() {
        let report = parse(json!({"device_id": 1042}));
        assert_eq!(report.device_id(), "1042");
    }

    #[test]
    fn structured_device_id_is_kept_as_json_text() {
        let report = parse(json!({"deviceId": true}));
        assert_eq!(report.device_id(), "true");

        let report = parse(json!({"device_id": {"sn": 7}}));
        assert_eq!(report.device_id(), r#"{"sn":7}"#);
    }

    #[test]
    fn payload_without_latitude_is_missing_whatever_else_it_holds() {
        for payload in [
            json!({"lon": -74.006, "deviceId": true}),
            json!({"lon": "abc"}),
            json!({"lat": null, "lon": [1, 2], "device_id": {"sn": 7}}),
        ] {
            assert_eq!(
                LocationReport::from_payload(payload),
                Err(ValidationError::MissingCoordinates)
            );
        }
    }

    #[test]
    fn payload_must_be_an_object() {
        for payload in [json!([40.7128, -74.006]), json!("40.7128,-74.006"), json!(null)] {
            let err = LocationReport::from_payload(payload).unwrap_err();
            assert_eq!(err, ValidationError::NotAnObject);
            assert_eq!(err.to_string(), "Invalid request: expected a JSON object");
        }
    }

    #[test]
    fn payload_with_unreadable_coordinate_is_malformed() {
        let err = LocationReport::from_payload(json!({"lat": "north", "lon": 1})).unwrap_err();
        assert!(matches!(err, ValidationError::Malformed(_)));
        assert!(err.to_string().starts_with("Invalid request:"));
    }

    #[test]
    fn payload_with_odd_identity_is_accepted() {
        let payload = json!({"lat": 40.7128, "lon": -74.006, "device_id": {"sn": 7}});
        let report = LocationReport::from_payload(payload).unwrap();
        assert_eq!(report.device_id(), r#"{"sn":7}"#);
        assert!(report.validate().is_ok());
    }
}
