//! MCP tool implementations.

mod search;

pub use search::{execute_search, SearchInput};
