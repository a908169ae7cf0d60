//! The `search` MCP tool.

use crate::error::SearchResult;
use crate::services::GrepAppClient;
use crate::types::{SearchRequest, SearchResponse};
use schemars::JsonSchema;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

/// Input for the search tool, using the parameter names exposed to callers.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct SearchInput {
    /// The query to search for
    #[schemars(description = "The query to search for")]
    pub query: String,
    /// Restrict to a source language, e.g. "Rust" or "Go"
    #[schemars(description = "The language to search for")]
    #[serde(default)]
    pub lang: Option<String>,
    /// Restrict to paths containing this string
    #[schemars(description = "The path to search for")]
    #[serde(default)]
    pub path: Option<String>,
    /// Restrict to one repository, e.g. "tokio-rs/tokio"
    #[schemars(description = "The repository to search for")]
    #[serde(default)]
    pub repo: Option<String>,
    /// Match case (default: false)
    #[schemars(description = "Match case")]
    #[serde(default)]
    pub case: Option<bool>,
    /// Match whole words (default: false)
    #[schemars(description = "Match whole words")]
    #[serde(default)]
    pub words: Option<bool>,
    /// Use regular expression (default: false)
    #[schemars(description = "Use regular expression")]
    #[serde(default)]
    pub regexp: Option<bool>,
}

impl From<SearchInput> for SearchRequest {
    fn from(input: SearchInput) -> Self {
        Self {
            query: input.query,
            language: input.lang,
            path: input.path,
            repo: input.repo,
            case_sensitive: input.case.unwrap_or(false),
            whole_words: input.words.unwrap_or(false),
            use_regexp: input.regexp.unwrap_or(false),
        }
    }
}

/// Executes the search tool.
///
/// # Errors
///
/// Propagates every [`crate::SearchError`] from the adapter unchanged.
pub async fn execute_search(
    client: &GrepAppClient,
    input: SearchInput,
    cancel: &CancellationToken,
) -> SearchResult<SearchResponse> {
    let request = SearchRequest::from(input);
    client.search_with_cancel(&request, cancel).await
}
