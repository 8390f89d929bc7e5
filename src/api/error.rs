//! API error classification.
//!
//! The UI needs to tell authentication failures apart from everything else
//! (they open the key modal instead of just toasting), and backend timeouts
//! apart from generic transport failures. Everything the HTTP layer can
//! produce collapses into this one enum.

use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing key, or the server rejected the one we sent (401/403)
    #[error("authentication failed: {message}")]
    Auth { message: String },
    /// No API key configured at all
    #[error("no API key configured")]
    MissingKey,
    /// The fixed client-side timeout elapsed
    #[error("Request timeout")]
    Timeout,
    /// Non-success HTTP status with extracted error text
    #[error("API Error: {message}")]
    Status { status: u16, message: String },
    /// The server answered 200 but the envelope carried success=false
    #[error("{message}")]
    Rejected { message: String },
    /// Connection-level failure
    #[error("network error: {0}")]
    Network(String),
    /// Body did not parse into the expected shape
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl ApiError {
    /// Whether this failure should surface as an authentication problem.
    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Auth { .. } | ApiError::MissingKey)
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Timeout)
    }

    /// Build from an HTTP error status plus the raw response body.
    /// Error text mirrors the web client: `error.message`, else `error`,
    /// else a plain HTTP status line.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = extract_error_text(status, body);
        if status == 401 || status == 403 {
            ApiError::Auth { message }
        } else {
            ApiError::Status { status, message }
        }
    }

    /// Map a transport-level failure, separating timeouts from the rest.
    pub fn from_transport(message: String) -> Self {
        let lower = message.to_ascii_lowercase();
        if lower.contains("timed out") || lower.contains("timeout") {
            ApiError::Timeout
        } else {
            ApiError::Network(message)
        }
    }
}

fn extract_error_text(status: u16, body: &str) -> String {
    let fallback = || format!("HTTP {}", status);
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return fallback();
    };
    match value.get("error") {
        Some(Value::Object(obj)) => obj
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(fallback),
        Some(Value::String(text)) => text.clone(),
        _ => fallback(),
    }
}
