use reqwest::Method;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Instant;

use crate::client::Config;
use crate::credential::Credential;
use crate::error::{RestError, Result};
use crate::response::{Payload, Shape};
use crate::transport::{RawResponse, ReqwestTransport, SignedRequest, Transport};

/// Context for OVH API requests: where to send them, how, and who signs them.
///
/// Cloning is cheap and clones share the same transport and credential.
#[derive(Debug, Clone)]
pub struct RestContext {
    /// Transport used to put requests on the wire
    pub transport: Arc<dyn Transport>,
    /// Configuration
    pub config: Config,
    /// Credential used to sign every request
    pub credential: Arc<Credential>,
}

impl RestContext {
    /// Create a new context with default configuration and the reqwest transport
    pub fn new(credential: Credential) -> Result<Self> {
        Self::with_config(credential, Config::default())
    }

    /// Create a new context with custom configuration
    pub fn with_config(credential: Credential, config: Config) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(RestContext {
            transport: Arc::new(transport),
            config,
            credential: Arc::new(credential),
        })
    }

    /// Create a context over a custom transport
    pub fn with_transport(credential: Credential, config: Config, transport: impl Transport) -> Self {
        RestContext {
            transport: Arc::new(transport),
            config,
            credential: Arc::new(credential),
        }
    }

    /// Sign and send a request, returning the raw response.
    ///
    /// # Arguments
    /// * `path` - resource path below the API version, e.g. `/cloud/project`
    /// * `method` - HTTP method
    /// * `body` - request body, already serialized
    ///
    /// Transport failures are returned as-is. Nothing is retried.
    pub async fn execute(&self, path: &str, method: Method, body: Option<&str>) -> Result<RawResponse> {
        let request = self.prepare(path, method, body)?;

        let start = Instant::now();
        let method = request.method.clone();
        let response = self.transport.send(request).await;

        match &response {
            Ok(raw) => tracing::debug!(
                %method,
                path,
                status = raw.status,
                elapsed = ?start.elapsed(),
                "request completed"
            ),
            Err(err) => tracing::debug!(
                %method,
                path,
                error = %err,
                elapsed = ?start.elapsed(),
                "request failed"
            ),
        }

        response
    }

    /// Sign and send a request, then validate the response into `shape`
    pub async fn request(
        &self,
        path: &str,
        method: Method,
        body: Option<&str>,
        shape: Shape,
    ) -> Result<Payload> {
        self.execute(path, method, body).await?.validate(shape)
    }

    /// GET a single JSON object and deserialize it
    pub async fn get_object<T>(&self, path: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.execute(path, Method::GET, None).await?.decode(Shape::Object)
    }

    /// GET a JSON array and deserialize every element
    pub async fn get_array<T>(&self, path: &str) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        self.execute(path, Method::GET, None).await?.decode(Shape::Array)
    }

    /// Build the signed request for a call without sending it
    pub fn prepare(&self, path: &str, method: Method, body: Option<&str>) -> Result<SignedRequest> {
        // Sign the normalized form, it is what the transport puts on the wire
        let url = url::Url::parse(&self.config.url_for(path))?;

        if body.is_some() && matches!(method, Method::GET | Method::HEAD) {
            return Err(RestError::RequestBuild(format!(
                "{} requests cannot carry a body",
                method
            )));
        }

        let signature = self.credential.sign(method.as_str(), url.as_str(), body)?;

        Ok(SignedRequest {
            method,
            url: url.to_string(),
            headers: signature.iter().collect(),
            body: body.map(|b| b.to_string()),
            timestamp: signature.timestamp,
        })
    }
}
