//! Client configuration for the grep.app adapter.

use crate::error::{Result, ServerError};
use std::time::Duration;

/// Public grep.app search API.
pub const DEFAULT_ENDPOINT: &str = "https://grep.app/api/search";

/// Upper bound on a single upstream request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// User agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("grepapp-mcp/", env!("CARGO_PKG_VERSION"));

/// Where and how the adapter talks to grep.app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Full search URL, without a query string
    pub endpoint: String,
    /// Per-request timeout
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Checks the endpoint is an absolute http(s) URL without a query and the
    /// timeout is non-zero.
    ///
    /// # Errors
    ///
    /// Returns `ServerError::Config` describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.timeout.is_zero() {
            return Err(ServerError::Config("timeout must be greater than zero".into()));
        }

        let url = reqwest::Url::parse(&self.endpoint).map_err(|e| {
            ServerError::Config(format!("invalid endpoint '{}': {e}", self.endpoint))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ServerError::Config(format!(
                "endpoint must use http or https, got '{}'",
                url.scheme()
            )));
        }
        if url.query().is_some() {
            return Err(ServerError::Config(
                "endpoint must not carry a query string".into(),
            ));
        }
        Ok(())
    }
}
