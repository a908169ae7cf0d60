//! Core services: the grep.app adapter and its HTTP transport.

mod grep_app;
pub mod transport;

pub use grep_app::{build_query, parse_response, GrepAppClient};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};
