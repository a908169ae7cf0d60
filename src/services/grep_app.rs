//! grep.app search adapter.
//!
//! Turns a [`SearchRequest`] into one GET against the grep.app API and maps
//! the JSON body into a [`SearchResponse`]. Upstream fields are read through
//! explicit accessors so every missing or mistyped field has a documented
//! default instead of failing the whole search.

use super::transport::{HttpTransport, ReqwestTransport};
use crate::config::ClientConfig;
use crate::error::{SearchError, SearchResult, TransportError};
use crate::types::{SearchHit, SearchRequest, SearchResponse};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Client for the grep.app search endpoint.
#[derive(Clone)]
pub struct GrepAppClient {
    transport: Arc<dyn HttpTransport>,
    endpoint: String,
    timeout: Duration,
}

impl GrepAppClient {
    /// Creates a client over an existing transport.
    pub fn new(transport: Arc<dyn HttpTransport>, config: &ClientConfig) -> Self {
        Self {
            transport,
            endpoint: config.endpoint.clone(),
            timeout: config.timeout,
        }
    }

    /// Validates `config` and creates a client backed by `reqwest`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the endpoint or timeout is invalid,
    /// or if the HTTP client cannot be built.
    pub fn from_config(config: &ClientConfig) -> crate::Result<Self> {
        config.validate()?;
        let transport = ReqwestTransport::new(config.timeout, &config.user_agent)
            .map_err(|e| crate::ServerError::Config(e.to_string()))?;
        Ok(Self::new(Arc::new(transport), config))
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Full request URL for `request`.
    #[must_use]
    pub fn url_for(&self, request: &SearchRequest) -> String {
        format!("{}?{}", self.endpoint, build_query(request))
    }

    /// Runs a search with no external cancellation.
    ///
    /// # Errors
    ///
    /// See [`GrepAppClient::search_with_cancel`].
    pub async fn search(&self, request: &SearchRequest) -> SearchResult<SearchResponse> {
        self.search_with_cancel(request, &CancellationToken::new())
            .await
    }

    /// Runs a search, aborting the outstanding request if `cancel` fires.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if the query is empty (no request is sent)
    /// - `UpstreamUnavailable` on network failure or after the timeout
    /// - `UpstreamError` on a non-2xx status
    /// - `UpstreamMalformedResponse` if a 2xx body is not JSON
    /// - `Cancelled` if `cancel` fires first
    pub async fn search_with_cancel(
        &self,
        request: &SearchRequest,
        cancel: &CancellationToken,
    ) -> SearchResult<SearchResponse> {
        validate(request)?;
        if cancel.is_cancelled() {
            return Err(SearchError::Cancelled);
        }

        let url = self.url_for(request);
        tracing::debug!(%url, "grep.app search");

        let call = tokio::time::timeout(self.timeout, self.transport.get(&url));
        let outcome = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                tracing::debug!("grep.app search cancelled");
                return Err(SearchError::Cancelled);
            }
            outcome = call => outcome,
        };

        let response = match outcome {
            Ok(result) => result.inspect_err(|e| tracing::warn!("grep.app unreachable: {e}"))?,
            Err(_) => {
                tracing::warn!("grep.app search timed out after {:?}", self.timeout);
                return Err(TransportError::Timeout {
                    after: self.timeout,
                }
                .into());
            }
        };

        if !response.is_success() {
            tracing::warn!(status = response.status, "grep.app returned an error status");
            return Err(SearchError::UpstreamError {
                status: response.status,
            });
        }

        let parsed = parse_response(&response.body)?;
        tracing::debug!(
            count = parsed.count,
            returned = parsed.results.len(),
            "grep.app search complete"
        );
        Ok(parsed)
    }
}

fn validate(request: &SearchRequest) -> SearchResult<()> {
    if request.query.is_empty() {
        return Err(SearchError::InvalidArgument(
            "query must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Encodes `request` as a grep.app query string.
///
/// Parameters appear in a fixed order: `q`, `f.lang`, `f.path`, `f.repo`,
/// `case`, `words`, `regexp`. Unset filters are omitted; the flags are
/// always present as `true` or `false`.
#[must_use]
pub fn build_query(request: &SearchRequest) -> String {
    let params: [(&str, Option<&str>); 7] = [
        ("q", Some(request.query.as_str())),
        ("f.lang", request.language.as_deref()),
        ("f.path", request.path.as_deref()),
        ("f.repo", request.repo.as_deref()),
        ("case", Some(flag(request.case_sensitive))),
        ("words", Some(flag(request.whole_words))),
        ("regexp", Some(flag(request.use_regexp))),
    ];

    params
        .iter()
        .filter_map(|(key, value)| value.map(|v| format!("{key}={}", urlencoding::encode(v))))
        .collect::<Vec<_>>()
        .join("&")
}

fn flag(on: bool) -> &'static str {
    if on {
        "true"
    } else {
        "false"
    }
}

/// Maps a grep.app JSON body into a [`SearchResponse`].
///
/// # Errors
///
/// Returns `UpstreamMalformedResponse` only if `body` is not valid JSON.
/// Any shape mismatch inside valid JSON falls back to defaults.
pub fn parse_response(body: &str) -> SearchResult<SearchResponse> {
    let root: Value = serde_json::from_str(body)
        .map_err(|e| SearchError::UpstreamMalformedResponse(e.to_string()))?;

    let hits = root.get("hits");
    let count = count_field(hits.and_then(|h| h.get("total")));
    let results = hits
        .and_then(|h| h.get("hits"))
        .and_then(Value::as_array)
        .map(|items| items.iter().map(map_hit).collect())
        .unwrap_or_default();

    Ok(SearchResponse { count, results })
}

fn map_hit(hit: &Value) -> SearchHit {
    SearchHit {
        owner_id: str_field(hit, "owner_id"),
        repo: str_field(hit, "repo"),
        branch: str_field(hit, "branch"),
        path: str_field(hit, "path"),
        snippet: hit
            .get("content")
            .map(|c| str_field(c, "snippet"))
            .unwrap_or_default(),
        total_matches: count_field(hit.get("total_matches")),
    }
}

/// String field, or `""` if missing or not a string.
fn str_field(obj: &Value, key: &str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_default()
}

/// Non-negative integer from a JSON number or numeric string, else 0.
fn count_field(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}
