//! Canonical event records emitted for every evaluated location report.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::evaluate::EvaluationResult;
use crate::geo::GeoPoint;

/// Device identity used when a report carries none.
pub const UNKNOWN_DEVICE_ID: &str = "unknown";

/// Immutable record of one geofence evaluation.
///
/// Serializes to the wire shape consumed by callers:
/// `eventId`, `timestamp`, `deviceId`, `lat`, `lon`, `insideGeofence`,
/// `distanceFromCenterMeters`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    event_id: Uuid,
    timestamp: DateTime<Utc>,
    device_id: String,
    #[serde(flatten)]
    point: GeoPoint,
    #[serde(rename = "insideGeofence")]
    inside: bool,
    #[serde(rename = "distanceFromCenterMeters")]
    distance_meters: f64,
}

impl EventRecord {
    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn point(&self) -> &GeoPoint {
        &self.point
    }

    pub fn inside(&self) -> bool {
        self.inside
    }

    /// Distance from the geofence center, rounded to two decimal places.
    pub fn distance_meters(&self) -> f64 {
        self.distance_meters
    }
}

/// Pick the device identity from the primary and alternate request fields.
///
/// The primary field wins; `"unknown"` is used when both are absent.
pub fn resolve_device_id(primary: Option<&str>, alternate: Option<&str>) -> String {
    primary
        .or(alternate)
        .unwrap_or(UNKNOWN_DEVICE_ID)
        .to_string()
}

type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Builds [`EventRecord`]s with fresh ids and non-decreasing timestamps.
///
/// The builder remembers the latest timestamp it issued; if the wall clock
/// steps backwards, records keep that watermark instead.
pub struct EventRecordBuilder {
    clock: Clock,
    last_issued_micros: AtomicI64,
}

impl EventRecordBuilder {
    /// Builder backed by the system UTC clock.
    pub fn new() -> Self {
        Self::with_clock(Utc::now)
    }

    /// Builder backed by a custom clock (tests, replays).
    pub fn with_clock<F>(clock: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        Self {
            clock: Box::new(clock),
            last_issued_micros: AtomicI64::new(i64::MIN),
        }
    }

    /// Assemble the record for one evaluation.
    pub fn build(
        &self,
        point: GeoPoint,
        device_id: impl Into<String>,
        result: &EvaluationResult,
    ) -> EventRecord {
        EventRecord {
            event_id: Uuid::new_v4(),
            timestamp: self.next_timestamp(),
            device_id: device_id.into(),
            point,
            inside: result.inside,
            distance_meters: result.distance_meters,
        }
    }

    /// Issued timestamps carry microsecond precision, the resolution of the
    /// watermark.
    fn next_timestamp(&self) -> DateTime<Utc> {
        let now = (self.clock)();
        let now_micros = now.timestamp_micros();
        let previous = self
            .last_issued_micros
            .fetch_max(now_micros, Ordering::AcqRel);

        DateTime::from_timestamp_micros(previous.max(now_micros)).unwrap_or(now)
    }
}

impl Default for EventRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventRecordBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventRecordBuilder")
            .field(
                "last_issued_micros",
                &self.last_issued_micros.load(Ordering::Relaxed),
            )
            .finish()
    }
}
