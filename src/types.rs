//! Value types for the grep.app search exchange.
//!
//! All of these are built fresh per request and owned by the caller.

use serde::Serialize;

/// Parameters for one grep.app search.
///
/// Optional string filters are omitted from the upstream query when `None`.
/// The three flags always carry a value and are always sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub language: Option<String>,
    pub path: Option<String>,
    pub repo: Option<String>,
    pub case_sensitive: bool,
    pub whole_words: bool,
    pub use_regexp: bool,
}

impl SearchRequest {
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    #[must_use]
    pub fn repo(mut self, repo: impl Into<String>) -> Self {
        self.repo = Some(repo.into());
        self
    }

    #[must_use]
    pub fn case_sensitive(mut self, on: bool) -> Self {
        self.case_sensitive = on;
        self
    }

    #[must_use]
    pub fn whole_words(mut self, on: bool) -> Self {
        self.whole_words = on;
        self
    }

    #[must_use]
    pub fn use_regexp(mut self, on: bool) -> Self {
        self.use_regexp = on;
        self
    }
}

/// One file reported by grep.app as matching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    /// Repository owner
    pub owner_id: String,
    /// Repository name (usually `owner/name`)
    pub repo: String,
    /// Branch the file was indexed from
    pub branch: String,
    /// File path within the repository
    pub path: String,
    /// Rendered excerpt around the match, verbatim from grep.app (may contain HTML markup)
    pub snippet: String,
    /// Number of matches in this file
    pub total_matches: u64,
}

/// Result of a grep.app search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchResponse {
    /// Total hits reported upstream; may exceed `results.len()`
    pub count: u64,
    /// Hits in upstream order
    pub results: Vec<SearchHit>,
}

impl SearchResponse {
    /// Whether the upstream reported more hits than were returned.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.count > self.results.len() as u64
    }
}
