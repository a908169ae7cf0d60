//! Error types for grepapp-mcp.
//!
//! Uses thiserror for ergonomic error handling with proper
//! error chain propagation.

use std::time::Duration;
use thiserror::Error;

/// Top-level server error.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors surfaced by the grep.app search adapter.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("grep.app is unavailable: {0}")]
    UpstreamUnavailable(#[from] TransportError),

    #[error("grep.app returned HTTP {status}")]
    UpstreamError { status: u16 },

    #[error("grep.app returned a malformed response: {0}")]
    UpstreamMalformedResponse(String),

    #[error("Search cancelled")]
    Cancelled,
}

/// Failures reaching the remote service at all.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("request timed out after {after:?}")]
    Timeout { after: Duration },

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request failed: {0}")]
    Request(String),
}

/// Result type alias for server operations.
pub type Result<T> = std::result::Result<T, ServerError>;

/// Result type alias for search operations.
pub type SearchResult<T> = std::result::Result<T, SearchError>;

// Error code implementations for machine-readable error responses
impl ServerError {
    /// Returns a machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Search(e) => e.code(),
            Self::Json(_) => "JSON_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
        }
    }
}

impl SearchError {
    /// Returns a machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "INVALID_ARGUMENT",
            Self::UpstreamUnavailable(_) => "UPSTREAM_UNAVAILABLE",
            Self::UpstreamError { .. } => "UPSTREAM_ERROR",
            Self::UpstreamMalformedResponse(_) => "UPSTREAM_MALFORMED_RESPONSE",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// HTTP status reported by the upstream, if it answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UpstreamError { status } => Some(*status),
            _ => None,
        }
    }
}

// Conversion to rmcp protocol errors
impl From<ServerError> for rmcp::ErrorData {
    fn from(err: ServerError) -> Self {
        match err {
            ServerError::Search(SearchError::InvalidArgument(msg)) => {
                rmcp::ErrorData::invalid_params(msg, None)
            }
            other => rmcp::ErrorData::internal_error(other.to_string(), None),
        }
    }
}
