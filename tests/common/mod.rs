//! Common test utilities for grepapp-mcp integration tests.
//!
//! Provides `FakeTransport`, a scripted `HttpTransport` that records every
//! URL it is asked for, and `TestEnv` wiring it into a `GrepAppClient`.

#![allow(dead_code)] // Test utilities may not all be used in every test file

use async_trait::async_trait;
use grepapp_mcp::services::{HttpResponse, HttpTransport};
use grepapp_mcp::{ClientConfig, GrepAppClient, TransportError};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Body from the documented grep.app example.
pub const SAMPLE_BODY: &str = r#"{"hits":{"total":2,"hits":[{"owner_id":"o1","repo":"r1","branch":"main","path":"a.go","content":{"snippet":"x"},"total_matches":"3"}]}}"#;

/// What the fake does for one request.
pub enum Reply {
    Respond(HttpResponse),
    Fail(TransportError),
    /// Never completes
    Hang,
}

/// Scripted transport. Replies are consumed in order; once exhausted every
/// request gets an empty `{}` 200 response.
#[derive(Default)]
pub struct FakeTransport {
    replies: Mutex<VecDeque<Reply>>,
    urls: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().collect()),
            urls: Mutex::new(Vec::new()),
        })
    }

    /// Answers every request with `{}`.
    pub fn empty() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn ok(body: &str) -> Arc<Self> {
        Self::new([Reply::Respond(HttpResponse::new(200, body))])
    }

    pub fn status(status: u16) -> Arc<Self> {
        Self::new([Reply::Respond(HttpResponse::new(status, ""))])
    }

    /// URLs requested so far.
    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.urls.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        self.urls.lock().unwrap().push(url.to_string());
        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(Reply::Respond(resp)) => Ok(resp),
            Some(Reply::Fail(err)) => Err(err),
            Some(Reply::Hang) => std::future::pending().await,
            None => Ok(HttpResponse::new(200, "{}")),
        }
    }
}

/// A client wired to a fake transport.
pub struct TestEnv {
    pub transport: Arc<FakeTransport>,
    pub client: GrepAppClient,
}

impl TestEnv {
    pub fn new(transport: Arc<FakeTransport>) -> Self {
        Self::with_config(transport, &ClientConfig::default())
    }

    pub fn with_config(transport: Arc<FakeTransport>, config: &ClientConfig) -> Self {
        let client = GrepAppClient::new(Arc::clone(&transport) as Arc<dyn HttpTransport>, config);
        Self { transport, client }
    }

    /// Query string of the only request made.
    pub fn sent_query(&self) -> String {
        let urls = self.transport.urls();
        assert_eq!(urls.len(), 1, "expected exactly one request, got {urls:?}");
        let (_, query) = urls[0]
            .split_once('?')
            .expect("request URL has no query string");
        query.to_string()
    }
}

/// Serves `response` verbatim to every connection on a local port and
/// returns a search endpoint pointing at it.
pub async fn serve_raw(response: &'static str) -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buf = vec![0u8; 4096];
                let mut read = 0;
                // Request head only; GETs carry no body
                while !buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut buf[read..]).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => read += n,
                    }
                    if read == buf.len() {
                        return;
                    }
                }
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });
    format!("http://{addr}/api/search")
}

/// Accepts connections and never answers.
pub async fn serve_silent() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });
    format!("http://{addr}/api/search")
}

/// Endpoint on a port nothing listens on.
pub async fn closed_endpoint() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api/search")
}

/// A reqwest-backed client for `endpoint`.
pub fn live_client(endpoint: String, timeout: std::time::Duration) -> GrepAppClient {
    let config = ClientConfig {
        endpoint,
        timeout,
        ..ClientConfig::default()
    };
    GrepAppClient::from_config(&config).unwrap()
}
