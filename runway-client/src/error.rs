//! Error types for the Runway client

use reqwest::StatusCode;
use runway_core::CoreError;
use serde::Deserialize;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Code used when the backend gave no usable error body
pub const UNKNOWN_ERROR: &str = "UNKNOWN_ERROR";

/// Errors that can occur when using the Runway client
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced an HTTP response
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// API answered with a non-2xx status
    #[error("API error (status {status}, {code}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Machine-readable error code
        code: String,
        /// Human-readable message
        message: String,
        /// Optional structured details from the backend
        details: Option<serde_json::Value>,
    },

    /// A success response body could not be decoded
    #[error("Failed to decode response (status {status}): {message}")]
    Decode { status: u16, message: String },

    /// The request could not be built
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The backend answered, but the result breaks the execution lifecycle
    #[error(transparent)]
    StateMachine(#[from] CoreError),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorCode {
    Text(String),
    Number(i64),
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<ErrorCode>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Option<serde_json::Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorEnvelope {
    Wrapped { error: ErrorBody },
    Message { error: String },
    Flat(ErrorBody),
}

impl ClientError {
    /// Create an API error from status code, code and message
    pub fn api_error(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Builds the error for a non-2xx response from its raw body
    ///
    /// Accepts `{code, message, details?}` either flat or wrapped in
    /// `{"error": {...}}`, and a bare `{"error": "<message>"}`. Anything else
    /// becomes `UNKNOWN_ERROR` with the status text as message.
    pub fn from_response(status: StatusCode, body: &[u8]) -> Self {
        let status_text = status.canonical_reason().unwrap_or("Unknown error");

        let parsed = match serde_json::from_slice::<ErrorEnvelope>(body) {
            Ok(ErrorEnvelope::Wrapped { error }) | Ok(ErrorEnvelope::Flat(error)) => Some(error),
            Ok(ErrorEnvelope::Message { error }) => Some(ErrorBody {
                code: None,
                message: Some(error),
                details: None,
            }),
            Err(_) => None,
        };

        let Some(ErrorBody {
            code,
            message,
            details,
        }) = parsed.filter(|b| b.code.is_some() || b.message.is_some())
        else {
            return Self::api_error(status.as_u16(), UNKNOWN_ERROR, status_text);
        };

        let code = match code {
            Some(ErrorCode::Text(code)) => code,
            Some(ErrorCode::Number(code)) => code.to_string(),
            None => UNKNOWN_ERROR.to_string(),
        };

        Self::Api {
            status: status.as_u16(),
            code,
            message: message.unwrap_or_else(|| status_text.to_string()),
            details,
        }
    }

    /// Machine-readable code, uniform across variants
    pub fn code(&self) -> &str {
        match self {
            Self::Transport(_) => "NETWORK_ERROR",
            Self::Api { code, .. } => code,
            Self::Decode { .. } => UNKNOWN_ERROR,
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::StateMachine(err) => err.code(),
        }
    }

    /// HTTP status, when a response was received
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(err) => err.status().map(|s| s.as_u16()),
            Self::Api { status, .. } | Self::Decode { status, .. } => Some(*status),
            Self::InvalidRequest(_) | Self::StateMachine(_) => None,
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Api { status, .. } => *status == 404,
            Self::StateMachine(err) => err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error is a conflict (e.g. cancelling a finished execution)
    pub fn is_conflict(&self) -> bool {
        match self {
            Self::Api { status, .. } => *status == 409,
            Self::StateMachine(err) => err.is_conflict(),
            _ => false,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { status: 401, .. })
    }

    /// Check if the resource is gone for good (e.g. an expired artifact)
    pub fn is_gone(&self) -> bool {
        matches!(self, Self::Api { status: 410, .. })
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Api { status, .. } if (400..500).contains(status))
    }

    /// Check if this error is a server error (5xx status or undecodable body)
    pub fn is_server_error(&self) -> bool {
        match self {
            Self::Api { status, .. } => *status >= 500,
            Self::Decode { .. } => true,
            _ => false,
        }
    }
}
