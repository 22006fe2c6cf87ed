//! Gateway error types.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

/// Outcome of one gateway call: the assistant reply, or why there is none.
pub type GatewayResult = Result<String, GatewayError>;

/// Errors that can occur when calling the completion gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The call could not complete (DNS, refused connection, timeout, ...).
    #[error("transport error: {description}")]
    Transport { description: String },

    /// The gateway answered with a non-2xx status.
    #[error("api error (status {status}): {}", .detail.summary())]
    Http { status: u16, detail: ErrorDetail },

    /// The gateway answered 2xx but the body lacks a usable reply.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl GatewayError {
    /// Classify a reqwest failure as a transport error.
    pub fn transport(err: &reqwest::Error, timeout: Duration) -> Self {
        let description = if err.is_timeout() {
            format!("request timed out after {timeout:?}")
        } else if err.is_connect() {
            format!("could not connect to gateway: {err}")
        } else {
            err.to_string()
        };
        GatewayError::Transport { description }
    }

    /// Text for the error panel shown to the user.
    pub fn report(&self) -> String {
        match self {
            GatewayError::Transport { description } => format!("Connection Error: {description}"),
            GatewayError::Http { status, detail } => {
                format!("API Error (status {status})\nDetails: {}", detail.pretty())
            }
            GatewayError::MalformedResponse(reason) => format!("Unexpected Error: {reason}"),
        }
    }
}

/// The body of a non-2xx gateway response.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorDetail {
    /// The body parsed as JSON.
    Structured(serde_json::Value),
    /// The body was not JSON; holds the raw text or the status reason phrase.
    Generic(String),
}

impl ErrorDetail {
    pub fn from_body(status: u16, body: &str) -> Self {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
            return ErrorDetail::Structured(value);
        }

        let text = body.trim();
        if !text.is_empty() {
            return ErrorDetail::Generic(text.to_string());
        }

        let reason = StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("unknown error");
        ErrorDetail::Generic(format!("HTTP {status} {reason}"))
    }

    /// The provider's own error message, when the body carries one.
    ///
    /// Recognizes `{"error": "..."}`, `{"error": {"message": "..."}}` and
    /// `{"message": "..."}`.
    pub fn message(&self) -> Option<&str> {
        let ErrorDetail::Structured(value) = self else {
            return None;
        };
        match value.get("error") {
            Some(serde_json::Value::String(msg)) => Some(msg.as_str()),
            Some(obj) => obj.get("message").and_then(|m| m.as_str()),
            None => value.get("message").and_then(|m| m.as_str()),
        }
    }

    /// One-line form for logs and `Display`.
    pub fn summary(&self) -> String {
        match (self.message(), self) {
            (Some(msg), _) => msg.to_string(),
            (None, ErrorDetail::Structured(value)) => value.to_string(),
            (None, ErrorDetail::Generic(text)) => text.clone(),
        }
    }

    /// Multi-line form for the error panel.
    pub fn pretty(&self) -> String {
        match self {
            ErrorDetail::Structured(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            ErrorDetail::Generic(text) => text.clone(),
        }
    }
}
