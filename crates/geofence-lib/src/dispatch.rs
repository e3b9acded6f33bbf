//! Event sink and alert publisher seams, plus the failure-isolated dispatch.
//!
//! Both collaborators are best effort: a failure in one is logged and never
//! stops the other from being attempted, and neither fails the request.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use crate::alert::Alert;
use crate::record::EventRecord;

/// Failure reported by an [`EventSink`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SinkError {
    /// The backing store refused or could not accept the write.
    #[error("event sink write failed: {0}")]
    Backend(String),
}

/// Failure reported by an [`AlertPublisher`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublishError {
    /// No destination was configured for alerts.
    #[error("alert destination is not configured")]
    NotConfigured,

    /// The notification service refused or could not accept the message.
    #[error("alert publish failed: {0}")]
    Backend(String),
}

/// Durable storage for finalized event records.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn store(&self, record: &EventRecord) -> Result<(), SinkError>;
}

/// Notification fan-out for rendered alerts.
#[async_trait]
pub trait AlertPublisher: Send + Sync {
    async fn publish(&self, alert: &Alert) -> Result<(), PublishError>;
}

/// Per-collaborator outcome of [`dispatch_record`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    pub stored: Result<(), SinkError>,
    pub published: Result<(), PublishError>,
}

impl DispatchReport {
    pub fn is_complete(&self) -> bool {
        self.stored.is_ok() && self.published.is_ok()
    }
}

/// Hand a record to the sink and its alert to the publisher.
///
/// Both calls run concurrently; failures are logged at `warn` and returned
/// in the report, never propagated.
pub async fn dispatch_record<S, P>(record: &EventRecord, sink: &S, publisher: &P) -> DispatchReport
where
    S: EventSink + ?Sized,
    P: AlertPublisher + ?Sized,
{
    let alert = Alert::from_record(record);
    let (stored, published) = tokio::join!(sink.store(record), publisher.publish(&alert));

    match &stored {
        Ok(()) => debug!(event_id = %record.event_id(), "event record stored"),
        Err(err) => warn!(event_id = %record.event_id(), error = %err, "event sink write failed"),
    }

    match &published {
        Ok(()) => debug!(event_id = %record.event_id(), "geofence alert published"),
        Err(err) => warn!(event_id = %record.event_id(), error = %err, "alert publish failed"),
    }

    DispatchReport { stored, published }
}
