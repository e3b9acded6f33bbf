//! Shared infrastructure for the geofence check AWS Lambda function.
//!
//! - [`RequestHandler`]: validate, evaluate, record and dispatch one report
//! - [`init_runtime`]: cold-start wiring to DynamoDB and SNS
//! - [`init_tracing`]: JSON-formatted tracing for CloudWatch Logs
//! - [`LambdaResponse`]: proxy-style response envelope
//! - [`ServiceConfig`]: environment-driven configuration
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides recording collaborators and mock
//! request IDs. Enable the `test-utils` feature to access it from dependent
//! crates.

#![deny(warnings)]

mod aws;
mod config;
mod handler;
mod requests;
mod response;
mod runtime;
mod tracing_init;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use aws::{
    record_item, sns_subject, DynamoDbEventSink, SnsAlertPublisher, SNS_SUBJECT_MAX_CHARS,
};
pub use config::{
    ConfigError, ServiceConfig, DEFAULT_TABLE_NAME, ENV_CENTER_LAT, ENV_CENTER_LON,
    ENV_DYNAMODB_TABLE, ENV_RADIUS_METERS, ENV_SNS_TOPIC_ARN,
};
pub use handler::RequestHandler;
pub use requests::{LocationReport, ValidationError};
pub use response::{LambdaResponse, CONTENT_TYPE_JSON};
pub use runtime::{init_runtime, GeofenceHandler};
pub use tracing_init::init_tracing;
