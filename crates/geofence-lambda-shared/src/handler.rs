//! Request orchestration: validate, evaluate, record, dispatch, respond.

use std::panic::{self, AssertUnwindSafe};

use serde_json::Value;
use tracing::{error, info, warn};

use geofence_lib::{
    dispatch_record, AlertPublisher, EventRecord, EventRecordBuilder, EventSink, GeoPoint,
    GeofenceConfig, GeofenceEvaluator,
};

use crate::requests::LocationReport;
use crate::response::LambdaResponse;

/// Handles location reports against one geofence.
///
/// Owns the immutable geofence configuration and the two collaborators; a
/// single instance is built at cold start and shared by reference across
/// invocations.
pub struct RequestHandler<S, P> {
    geofence: GeofenceConfig,
    builder: EventRecordBuilder,
    sink: S,
    publisher: P,
}

impl<S, P> RequestHandler<S, P>
where
    S: EventSink,
    P: AlertPublisher,
{
    pub fn new(geofence: GeofenceConfig, sink: S, publisher: P) -> Self {
        Self::with_builder(geofence, EventRecordBuilder::new(), sink, publisher)
    }

    /// Use a specific record builder (for example one with a fixed clock).
    pub fn with_builder(
        geofence: GeofenceConfig,
        builder: EventRecordBuilder,
        sink: S,
        publisher: P,
    ) -> Self {
        Self {
            geofence,
            builder,
            sink,
            publisher,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Handle a raw event payload.
    pub async fn handle(&self, payload: Value, request_id: &str) -> LambdaResponse {
        let report = match LocationReport::from_payload(payload) {
            Ok(report) => report,
            Err(e) => {
                warn!(request_id = %request_id, error = %e, "failed to parse location report");
                return LambdaResponse::bad_request(e.to_string());
            }
        };

        self.handle_report(&report, request_id).await
    }

    /// Handle an already-parsed report.
    pub async fn handle_report(&self, report: &LocationReport, request_id: &str) -> LambdaResponse {
        let device_id = report.device_id();

        let point = match report.validate() {
            Ok(point) => point,
            Err(e) => {
                warn!(
                    request_id = %request_id,
                    device_id = %device_id,
                    error = %e,
                    "rejected location report"
                );
                return LambdaResponse::bad_request(e.to_string());
            }
        };

        let record = match self.evaluate_and_build(point, device_id) {
            Ok(record) => record,
            Err(message) => {
                error!(request_id = %request_id, error = %message, "geofence evaluation failed");
                return LambdaResponse::internal_error(message);
            }
        };

        info!(
            request_id = %request_id,
            event_id = %record.event_id(),
            device_id = %record.device_id(),
            lat = record.point().lat(),
            lon = record.point().lon(),
            inside = record.inside(),
            distance_m = record.distance_meters(),
            "geofence check"
        );

        dispatch_record(&record, &self.sink, &self.publisher).await;

        LambdaResponse::ok(&record)
    }

    /// Pure part of the request; any failure, panics included, becomes a
    /// message for the 500 response.
    fn evaluate_and_build(
        &self,
        point: GeoPoint,
        device_id: String,
    ) -> Result<EventRecord, String> {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            GeofenceEvaluator::new(&self.geofence)
                .evaluate(&point)
                .map(|result| self.builder.build(point, device_id, &result))
        }));

        match outcome {
            Ok(Ok(record)) => Ok(record),
            Ok(Err(e)) => Err(e.to_string()),
            Err(payload) => Err(panic_message(payload.as_ref())),
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "internal error during geofence evaluation".to_string()
    }
}
