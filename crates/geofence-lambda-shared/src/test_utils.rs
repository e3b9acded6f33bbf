//! Test doubles for handler testing.
//!
//! The recording collaborators keep everything they are handed so tests can
//! assert on what would have reached DynamoDB and SNS. Failing variants count
//! attempts and report a backend error.
//!
//! # Usage
//!
//! ```ignore
//! use geofence_lambda_shared::test_utils::{mock_request_id, recording_handler};
//!
//! #[tokio::test]
//! async fn test_handler() {
//!     let handler = recording_handler();
//!     let response = handler.handle(payload, &mock_request_id("abc")).await;
//!     assert_eq!(handler.sink().records().len(), 1);
//! }
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use geofence_lib::{
    Alert, AlertPublisher, EventRecord, EventSink, GeofenceConfig, PublishError, SinkError,
};

use crate::handler::RequestHandler;

/// Sink that keeps every stored record, or fails every write.
#[derive(Debug, Default)]
pub struct RecordingSink {
    records: Mutex<Vec<EventRecord>>,
    attempts: AtomicUsize,
    fail: bool,
}

impl RecordingSink {
    pub fn records(&self) -> Vec<EventRecord> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Number of `store` calls, successful or not.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EventSink for RecordingSink {
    async fn store(&self, record: &EventRecord) -> Result<(), SinkError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(SinkError::Backend("table unavailable".to_string()));
        }
        if let Ok(mut records) = self.records.lock() {
            records.push(record.clone());
        }
        Ok(())
    }
}

/// Publisher that keeps every alert, or fails every publish.
#[derive(Debug, Default)]
pub struct RecordingPublisher {
    alerts: Mutex<Vec<Alert>>,
    attempts: AtomicUsize,
    fail: bool,
}

impl RecordingPublisher {
    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts.lock().map(|a| a.clone()).unwrap_or_default()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AlertPublisher for RecordingPublisher {
    async fn publish(&self, alert: &Alert) -> Result<(), PublishError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(PublishError::Backend("topic unavailable".to_string()));
        }
        if let Ok(mut alerts) = self.alerts.lock() {
            alerts.push(alert.clone());
        }
        Ok(())
    }
}

/// Sink whose every write fails.
pub fn failing_sink() -> RecordingSink {
    RecordingSink {
        fail: true,
        ..RecordingSink::default()
    }
}

/// Publisher whose every publish fails.
pub fn failing_publisher() -> RecordingPublisher {
    RecordingPublisher {
        fail: true,
        ..RecordingPublisher::default()
    }
}

/// Handler over the default geofence with recording collaborators.
pub fn recording_handler() -> RequestHandler<RecordingSink, RecordingPublisher> {
    RequestHandler::new(
        GeofenceConfig::default(),
        RecordingSink::default(),
        RecordingPublisher::default(),
    )
}

/// Create a mock request ID for testing.
///
/// `lambda_runtime::Context` cannot be constructed outside the runtime, so
/// handler tests pass a request ID directly.
pub fn mock_request_id(suffix: &str) -> String {
    format!("test-request-{}", suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_request_id_formats_correctly() {
        assert_eq!(mock_request_id("123"), "test-request-123");
    }

    #[test]
    fn failing_doubles_start_empty() {
        assert_eq!(failing_sink().attempts(), 0);
        assert!(failing_publisher().alerts().is_empty());
    }
}
