//! HTTP capability injected into plugins.
//!
//! Plugins never hold a `reqwest::Client` directly. They receive an
//! [`HttpFetch`] so the cascade can be driven by a fake transport in tests
//! and by [`OfflineFetcher`] when the user asks for no network at all.

use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

/// Raw response handed back to a plugin. The body is left undecoded; every
/// provider has its own shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The request never produced a response (DNS, TLS, connection reset...).
    Request(String),
    /// The response arrived but its body could not be read.
    Body(String),
    /// Network access is disabled for this session.
    Offline,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Request(msg) => write!(f, "request failed: {}", msg),
            TransportError::Body(msg) => write!(f, "failed to read response body: {}", msg),
            TransportError::Offline => write!(f, "network access is disabled"),
        }
    }
}

impl StdError for TransportError {}

#[async_trait]
pub trait HttpFetch: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError>;
}

/// Production transport backed by a shared `reqwest::Client`.
#[derive(Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Builds a client with a connect timeout. Whole-request deadlines are
    /// applied per tier by the plugins themselves.
    pub fn with_connect_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .user_agent(concat!("plugchat/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl HttpFetch for ReqwestFetcher {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|err| TransportError::Request(err.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| TransportError::Body(err.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

/// Transport used with `--offline`: every request fails immediately, so each
/// cascade falls straight through to its synthetic tier.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineFetcher;

#[async_trait]
impl HttpFetch for OfflineFetcher {
    async fn get(&self, _url: &str) -> Result<HttpResponse, TransportError> {
        Err(TransportError::Offline)
    }
}

/// Appends a single percent-encoded path segment to a base URL.
pub fn url_with_segment(base_url: &str, segment: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(segment)
    )
}
