use async_trait::async_trait;
use reqwest::{Client, Method};
use std::fmt::Debug;

use crate::client::{create_rest_client, Config};
use crate::error::{RestError, Result};

/// A fully signed request, ready to be put on the wire.
///
/// Built by [`RestContext::execute`](crate::RestContext::execute) right before
/// dispatch and consumed by the transport.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<String>,
    pub timestamp: u64,
}

impl SignedRequest {
    /// Value of a header by (case-insensitive) name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status, status text and body of an HTTP response, as handed back by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    pub body: Option<String>,
}

impl RawResponse {
    pub fn new(status: u16, status_text: impl Into<String>, body: Option<String>) -> Self {
        RawResponse {
            status,
            status_text: status_text.into(),
            body,
        }
    }

    /// Whether the status is in `[200, 300)`
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport sends signed requests and returns their raw response.
///
/// Connection pooling, TLS and timeouts live behind this trait. Failures must
/// be reported as [`RestError::Transport`].
#[async_trait]
pub trait Transport: Debug + Send + Sync + 'static {
    async fn send(&self, request: SignedRequest) -> Result<RawResponse>;
}

/// Default transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(ReqwestTransport {
            client: create_rest_client(config)?,
        })
    }

    /// Use an existing client
    pub fn with_client(client: Client) -> Self {
        ReqwestTransport { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: SignedRequest) -> Result<RawResponse> {
        let mut builder = self.client.request(request.method, &request.url);
        for (name, value) in request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder
                .header("Content-Type", "application/json")
                .body(body);
        }

        let response = builder.send().await.map_err(RestError::transport)?;
        let status = response.status();
        let body = response.text().await.map_err(RestError::transport)?;

        Ok(RawResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
            body: if body.is_empty() { None } else { Some(body) },
        })
    }
}
