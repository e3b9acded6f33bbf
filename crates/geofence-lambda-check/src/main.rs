//! AWS Lambda function checking device locations against a circular geofence.

use lambda_runtime::Error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    geofence_lambda_check::run().await
}
