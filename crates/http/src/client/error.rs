//! Client error types

use serde_json::Value;
use thiserror::Error;

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or request error
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error status
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Bad request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Create error from HTTP status code
    pub fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        match status.as_u16() {
            400 => Self::BadRequest(message),
            401 => Self::AuthenticationFailed(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            _ => Self::ServerError {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// HTTP status of the failed response, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::BadRequest(_) => Some(400),
            Self::AuthenticationFailed(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::ServerError { status, .. } => Some(*status),
            Self::Request(error) => error.status().map(|status| status.as_u16()),
            Self::Serialization(_) | Self::Configuration(_) => None,
        }
    }

    /// Whether the server rejected the request's credentials
    pub fn is_auth_expired(&self) -> bool {
        self.status() == Some(401)
    }

    /// Raw response body of a rejected request
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::BadRequest(message)
            | Self::AuthenticationFailed(message)
            | Self::Forbidden(message)
            | Self::NotFound(message)
            | Self::ServerError { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Human-readable message the server attached to a rejection.
    ///
    /// Looks for a JSON `detail` field. A string is returned as-is; a list of
    /// validation entries is flattened to their `msg` fields joined by `"; "`.
    pub fn detail(&self) -> Option<String> {
        let body: Value = serde_json::from_str(self.body()?).ok()?;
        match body.get("detail")? {
            Value::String(detail) if !detail.trim().is_empty() => Some(detail.clone()),
            Value::Array(entries) => {
                let messages: Vec<&str> = entries
                    .iter()
                    .filter_map(|entry| entry.get("msg").and_then(Value::as_str))
                    .collect();
                (!messages.is_empty()).then(|| messages.join("; "))
            }
            _ => None,
        }
    }
}
