//! DynamoDB event sink and SNS alert publisher.
//!
//! Backend-specific encodings live here: DynamoDB stores numbers as decimal
//! strings and the containment flag as `1`/`0`.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use chrono::SecondsFormat;

use geofence_lib::{Alert, AlertPublisher, EventRecord, EventSink, PublishError, SinkError};

/// Longest subject SNS accepts.
pub const SNS_SUBJECT_MAX_CHARS: usize = 100;

/// Writes each record as one DynamoDB item.
#[derive(Debug, Clone)]
pub struct DynamoDbEventSink {
    client: aws_sdk_dynamodb::Client,
    table_name: String,
}

impl DynamoDbEventSink {
    pub fn new(client: aws_sdk_dynamodb::Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

#[async_trait]
impl EventSink for DynamoDbEventSink {
    async fn store(&self, record: &EventRecord) -> Result<(), SinkError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(record_item(record)))
            .send()
            .await
            .map_err(|e| {
                SinkError::Backend(aws_sdk_dynamodb::error::DisplayErrorContext(&e).to_string())
            })?;
        Ok(())
    }
}

/// DynamoDB attribute map for a record.
pub fn record_item(record: &EventRecord) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();
    item.insert(
        "eventId".into(),
        AttributeValue::S(record.event_id().to_string()),
    );
    item.insert(
        "timestamp".into(),
        AttributeValue::S(
            record
                .timestamp()
                .to_rfc3339_opts(SecondsFormat::AutoSi, true),
        ),
    );
    item.insert(
        "deviceId".into(),
        AttributeValue::S(record.device_id().to_string()),
    );
    item.insert(
        "lat".into(),
        AttributeValue::N(record.point().lat().to_string()),
    );
    item.insert(
        "lon".into(),
        AttributeValue::N(record.point().lon().to_string()),
    );
    item.insert(
        "insideGeofence".into(),
        AttributeValue::N(if record.inside() { "1" } else { "0" }.to_string()),
    );
    item.insert(
        "distanceFromCenterMeters".into(),
        AttributeValue::N(record.distance_meters().to_string()),
    );
    item
}

/// Publishes alerts to an SNS topic.
///
/// Without a topic every publish reports [`PublishError::NotConfigured`].
#[derive(Debug, Clone)]
pub struct SnsAlertPublisher {
    client: aws_sdk_sns::Client,
    topic_arn: Option<String>,
}

impl SnsAlertPublisher {
    pub fn new(client: aws_sdk_sns::Client, topic_arn: Option<String>) -> Self {
        Self { client, topic_arn }
    }
}

#[async_trait]
impl AlertPublisher for SnsAlertPublisher {
    async fn publish(&self, alert: &Alert) -> Result<(), PublishError> {
        let Some(topic_arn) = self.topic_arn.as_deref() else {
            return Err(PublishError::NotConfigured);
        };

        self.client
            .publish()
            .topic_arn(topic_arn)
            .subject(sns_subject(&alert.subject))
            .message(&alert.message)
            .send()
            .await
            .map_err(|e| {
                PublishError::Backend(aws_sdk_sns::error::DisplayErrorContext(&e).to_string())
            })?;
        Ok(())
    }
}

/// Fit a subject to SNS rules: no control characters, at most 100 chars.
pub fn sns_subject(subject: &str) -> String {
    subject
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .take(SNS_SUBJECT_MAX_CHARS)
        .collect()
}
