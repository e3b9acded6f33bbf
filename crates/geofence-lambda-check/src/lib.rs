//! Geofence check Lambda: wiring between the runtime and [`RequestHandler`].
//!
//! Each invocation always yields a proxy-style response; input problems and
//! internal failures are reported in the envelope rather than as invocation
//! errors.

use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info};

use geofence_lambda_shared::{
    init_runtime, init_tracing, LambdaResponse, RequestHandler, ServiceConfig,
};
use geofence_lib::{AlertPublisher, EventSink};

/// Entry point used by the Lambda runtime.
pub async fn run() -> Result<(), Error> {
    init_tracing();

    let config = ServiceConfig::from_env().map_err(|e| {
        error!(error = %e, "invalid function configuration");
        e
    })?;

    let handler = init_runtime(config).await;
    let handler = &handler;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        handle_event(handler, event).await
    }))
    .await
}

/// Lambda handler invoked per request.
pub async fn handle_event<S, P>(
    handler: &RequestHandler<S, P>,
    event: LambdaEvent<Value>,
) -> Result<LambdaResponse, Error>
where
    S: EventSink,
    P: AlertPublisher,
{
    let request_id = event.context.request_id.clone();
    let response = handler.handle(event.payload, &request_id).await;

    info!(
        request_id = %request_id,
        status = response.status_code,
        "geofence check handled"
    );

    Ok(response)
}
