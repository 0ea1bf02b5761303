//! Response classification
//!
//! Maps failed HTTP exchanges onto [`ClassifiedError`] and decodes the
//! JSON envelope every response is wrapped in.

use crate::error::ClassifiedError;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Standard response wrapper
///
/// ```json
/// {"code": "Success", "message": "...", "data": {...}}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Result code, e.g. "Success" or "NotFound_Connector"
    #[serde(default)]
    pub code: Option<String>,
    /// Human-readable message
    #[serde(default)]
    pub message: Option<String>,
    /// Payload
    #[serde(default)]
    pub data: Option<Value>,
}

impl Envelope {
    /// Parse a response body; an empty body is an empty envelope
    pub fn parse(body: &str) -> Result<Self, ClassifiedError> {
        if body.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(body).map_err(|e| {
            ClassifiedError::transport(format!("Failed to decode response body: {e}"))
        })
    }

    /// Deserialize `data` into `T`; a missing `data` is treated as `null`
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T, ClassifiedError> {
        serde_json::from_value(self.data.unwrap_or(Value::Null)).map_err(|e| {
            ClassifiedError::transport(format!("Failed to decode response data: {e}"))
        })
    }
}

/// Read a `retry-after` header as whole seconds
///
/// Missing or non-numeric values (including HTTP dates) yield `None`.
pub fn parse_retry_after(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse().ok())
}

/// Classify a non-success response
pub fn classify_response(status: StatusCode, headers: &HeaderMap, body: &str) -> ClassifiedError {
    let message = error_message(status, body);
    let retry_after = if status == StatusCode::TOO_MANY_REQUESTS {
        parse_retry_after(headers)
    } else {
        None
    };
    ClassifiedError::from_status(status.as_u16(), message, retry_after)
}

/// Classify a failure that produced no response
pub fn classify_transport(err: &reqwest::Error) -> ClassifiedError {
    let message = if err.is_timeout() {
        format!("Request timed out: {err}")
    } else if err.is_connect() {
        format!("Connection failed: {err}")
    } else if err.is_decode() {
        format!("Failed to decode response: {err}")
    } else {
        format!("HTTP request failed: {err}")
    };
    ClassifiedError::transport(message)
}

/// Best message for a failed response: envelope message, raw body, or reason phrase
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(Envelope {
        message: Some(message),
        ..
    }) = serde_json::from_str::<Envelope>(body)
    {
        if !message.is_empty() {
            return message;
        }
    }

    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }

    status
        .canonical_reason()
        .map_or_else(|| format!("HTTP {}", status.as_u16()), str::to_string)
}
