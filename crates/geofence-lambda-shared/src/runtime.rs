//! Cold-start construction of the AWS-backed handler.
//!
//! The AWS SDK configuration is resolved once and both clients are built from
//! it. Timing is logged so cold-start cost shows up in CloudWatch:
//!
//! - `sdk_config_ms`: time to resolve region and credentials providers
//! - `total_init_ms`: total initialization time

use std::time::Instant;

use aws_config::BehaviorVersion;
use tracing::{info, warn};

use crate::aws::{DynamoDbEventSink, SnsAlertPublisher};
use crate::config::ServiceConfig;
use crate::handler::RequestHandler;

/// Handler wired to DynamoDB and SNS.
pub type GeofenceHandler = RequestHandler<DynamoDbEventSink, SnsAlertPublisher>;

/// Build the production handler from `config`.
pub async fn init_runtime(config: ServiceConfig) -> GeofenceHandler {
    let total_start = Instant::now();

    info!(
        topic_configured = config.topic_arn.is_some(),
        center = %config.geofence.center(),
        radius_m = config.geofence.radius_meters(),
        "initializing geofence runtime"
    );

    if config.topic_arn.is_none() {
        warn!("SNS_TOPIC_ARN is not set; alerts will not be published");
    }

    let sdk_start = Instant::now();
    let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let sdk_config_ms = sdk_start.elapsed().as_millis();

    let sink = DynamoDbEventSink::new(
        aws_sdk_dynamodb::Client::new(&sdk_config),
        config.table_name,
    );
    let publisher = SnsAlertPublisher::new(aws_sdk_sns::Client::new(&sdk_config), config.topic_arn);

    info!(
        table = %sink.table_name(),
        total_init_ms = total_start.elapsed().as_millis(),
        sdk_config_ms = sdk_config_ms,
        "geofence runtime initialization complete"
    );

    RequestHandler::new(config.geofence, sink, publisher)
}
