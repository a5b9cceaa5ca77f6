use reqwest::{Client, ClientBuilder};
use std::time::Duration;

use crate::error::Result;

/// OVH API host used when none is configured
pub const API_ENDPOINT: &str = "eu.api.ovh.com";
/// OVH API version segment prepended to every resource path
pub const API_VERSION: &str = "1.0";

/// Create the HTTP client for API requests
/// with optimized settings for connection pooling and timeouts
pub fn create_rest_client(config: &Config) -> Result<Client> {
    let client = ClientBuilder::new()
        .pool_max_idle_per_host(50)
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .build()?;
    Ok(client)
}

/// Configuration for the OVH API client
#[derive(Debug, Clone)]
pub struct Config {
    /// URL scheme (http or https)
    pub scheme: String,
    /// API host
    pub host: String,
    /// API version segment
    pub version: String,
    /// Whole-request timeout, enforced by the transport
    pub timeout: Duration,
    /// Connection establishment timeout
    pub connect_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            scheme: "https".to_string(),
            host: API_ENDPOINT.to_string(),
            version: API_VERSION.to_string(),
            timeout: Duration::from_secs(300), // 5 minutes
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl Config {
    /// Create a new configuration with the given scheme and host
    pub fn new(scheme: impl Into<String>, host: impl Into<String>) -> Self {
        Config {
            scheme: scheme.into(),
            host: host.into(),
            ..Config::default()
        }
    }

    /// Set the API version segment
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the connect timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Get the base URL for API requests, version included
    pub fn endpoint(&self) -> String {
        format!("{}://{}/{}", self.scheme, self.host, self.version)
    }

    /// Full URL of a resource path such as `/cloud/project`
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.endpoint(), path)
        } else {
            format!("{}/{}", self.endpoint(), path)
        }
    }
}
