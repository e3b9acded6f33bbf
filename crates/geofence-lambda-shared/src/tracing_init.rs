//! JSON tracing for CloudWatch Logs.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the JSON subscriber.
///
/// Call once at the start of `main`, before `lambda_runtime::run()`. The level
/// follows `RUST_LOG` and defaults to `info`. A second call is a no-op.
///
/// # Example
///
/// ```no_run
/// use geofence_lambda_shared::init_tracing;
///
/// init_tracing();
/// tracing::info!("cold start");
/// ```
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .json()
        .with_target(true)
        .with_level(true)
        .with_current_span(false)
        .flatten_event(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
