//! grepapp-mcp: MCP server for code search via grep.app.
//!
//! This library exposes the public grep.app search API as an MCP tool:
//! - Deterministic query encoding from typed search parameters
//! - One bounded, cancellable HTTP GET per search
//! - Tolerant mapping of the upstream JSON into typed results
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              MCP Server (rmcp)              │
//! │         JSON-RPC over stdin/stdout          │
//! └─────────────────┬───────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────┐
//! │            search tool (tools)              │
//! └─────────────────┬───────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────┐
//! │       GrepAppClient (query + mapping)       │
//! └─────────────────┬───────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────┐
//! │     HttpTransport (reqwest, injected)       │
//! └─────────────────┬───────────────────────────┘
//!                   │
//!         GET https://grep.app/api/search
//! ```

pub mod config;
pub mod error;
pub mod fmt;
pub mod server;
pub mod services;
pub mod tools;
pub mod types;

pub use config::ClientConfig;
pub use error::{Result, SearchError, ServerError, TransportError};
pub use services::GrepAppClient;
pub use types::{SearchHit, SearchRequest, SearchResponse};
