// File: ./src/client/error.rs
//! Error taxonomy for the API access layer.
use http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Fetch-level failure: connection refused, DNS, TLS, malformed request.
    #[error("{0}")]
    Network(String),

    /// The server answered with a non-2xx status. `message` is the body's
    /// `message` field when present, else `HTTP <status>`.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The HTTP call succeeded but no token field was found in the response.
    #[error("token not found in response")]
    TokenNotFound,

    /// The HTTP call succeeded but the body did not carry the expected shape.
    #[error("unexpected response shape: {0}")]
    Shape(String),
}

impl ApiError {
    /// Build the HTTP-failure variant from a status and an already-parsed
    /// body, preferring the server-supplied `message` field.
    pub fn from_response(status: StatusCode, body: &serde_json::Value) -> Self {
        let message = body
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
        Self::Http {
            status: status.as_u16(),
            message,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
