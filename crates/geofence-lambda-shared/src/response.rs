//! Response envelope returned by the Lambda function.

use std::collections::BTreeMap;

use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Content type of every body this function produces.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Lambda proxy-style response: status code, headers and a JSON string body.
///
/// Successful responses carry the serialized payload; failures carry
/// `{"error": "<message>"}`.
///
/// # Example
///
/// ```
/// use geofence_lambda_shared::LambdaResponse;
///
/// let response = LambdaResponse::bad_request("Missing lat/lon");
/// assert_eq!(response.status_code, 400);
/// assert_eq!(response.body, r#"{"error":"Missing lat/lon"}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LambdaResponse {
    /// HTTP status code.
    pub status_code: u16,

    /// Response headers.
    pub headers: BTreeMap<String, String>,

    /// JSON-encoded body.
    pub body: String,
}

impl LambdaResponse {
    fn with_body(status: StatusCode, body: String) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), CONTENT_TYPE_JSON.to_string());
        Self {
            status_code: status.as_u16(),
            headers,
            body,
        }
    }

    /// 200 response with `data` serialized as the body.
    ///
    /// A payload that fails to serialize turns into a 500.
    pub fn ok<T: Serialize>(data: &T) -> Self {
        match serde_json::to_string(data) {
            Ok(body) => Self::with_body(StatusCode::OK, body),
            Err(err) => Self::internal_error(format!("failed to serialize response: {err}")),
        }
    }

    /// Error response with `{"error": message}` as the body.
    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        let body = serde_json::json!({ "error": message.into() }).to_string();
        Self::with_body(status, body)
    }

    /// 400 Bad Request.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::error(StatusCode::BAD_REQUEST, message)
    }

    /// 500 Internal Server Error.
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::error(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Parse the body back into JSON.
    pub fn body_json(&self) -> serde_json::Result<Value> {
        serde_json::from_str(&self.body)
    }
}
