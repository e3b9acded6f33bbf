//! Geofence library entry points.
//!
//! This crate holds the semantic core of the geofence check: great-circle
//! distance, the inside/outside decision against a circular zone, and the
//! canonical event record produced for every evaluated location report.
//! Storage and notification backends are reached only through the
//! [`EventSink`] and [`AlertPublisher`] traits so consumers (CLI, Lambda) can
//! plug in whatever transport they need.

#![deny(warnings)]

pub mod alert;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod evaluate;
pub mod geo;
pub mod record;

pub use alert::Alert;
pub use config::GeofenceConfig;
pub use dispatch::{
    dispatch_record, AlertPublisher, DispatchReport, EventSink, PublishError, SinkError,
};
pub use error::{Error, Result};
pub use evaluate::{round_to_centimeters, EvaluationResult, GeofenceEvaluator};
pub use geo::{haversine_distance, GeoPoint, EARTH_RADIUS_METERS};
pub use record::{resolve_device_id, EventRecord, EventRecordBuilder, UNKNOWN_DEVICE_ID};
