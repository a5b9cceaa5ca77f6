use thiserror::Error;

/// Main error type for OVH API operations
#[derive(Debug, Error)]
pub enum RestError {
    /// Connectivity, DNS or timeout failure reported by the transport.
    /// Passed through unchanged; nothing in this crate retries it.
    #[error("transport error: {0}")]
    Transport(#[source] anyhow::Error),

    /// Non-2xx response, or a 2xx response whose body does not decode into
    /// the requested shape
    #[error("HTTP error {status} {status_text}: {}", .body.as_deref().unwrap_or(""))]
    Domain {
        status: u16,
        status_text: String,
        body: Option<String>,
    },

    /// A detail field was read on an entity that has not been completed yet
    #[error("object is partially loaded, call complete() first")]
    PartialObject,

    /// The validator was asked for a shape it does not know
    #[error("unsupported response shape: {0}")]
    UnsupportedShape(String),

    /// The SHA-1 primitive used for request signing is missing.
    /// Never produced while SHA-1 is compiled in; kept so callers can match the full taxonomy.
    #[error("SHA-1 digest is unavailable")]
    DigestUnavailable,

    /// System clock is set before the Unix epoch
    #[error("system clock is before the unix epoch")]
    Clock(#[from] std::time::SystemTimeError),

    /// A date coming from the API does not match the expected format
    #[error("invalid API date {input:?}: {source}")]
    Date {
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Request building error
    #[error("failed to build request: {0}")]
    RequestBuild(String),

    /// HTTP client construction error
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl RestError {
    /// Create a new domain error from the parts of a raw response
    pub fn domain(status: u16, status_text: impl Into<String>, body: Option<String>) -> Self {
        RestError::Domain {
            status,
            status_text: status_text.into(),
            body,
        }
    }

    /// Wrap any transport-level failure
    pub fn transport<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        RestError::Transport(anyhow::Error::new(err))
    }

    /// Check if this error is a permission denied error (403)
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, RestError::Domain { status: 403, .. })
    }

    /// Check if this error is a not found error (404)
    pub fn is_not_found(&self) -> bool {
        matches!(self, RestError::Domain { status: 404, .. })
    }

    /// Get the HTTP status code if this is a domain error
    pub fn status_code(&self) -> Option<u16> {
        match self {
            RestError::Domain { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw body of the provider's error response, if any
    pub fn body(&self) -> Option<&str> {
        match self {
            RestError::Domain { body, .. } => body.as_deref(),
            _ => None,
        }
    }

    /// The provider's error payload parsed as JSON, when it is JSON
    pub fn body_json(&self) -> Option<serde_json::Value> {
        self.body().and_then(|b| serde_json::from_str(b).ok())
    }

    /// The `message` field OVH puts in its error payloads
    pub fn message(&self) -> Option<String> {
        self.body_json()?
            .get("message")?
            .as_str()
            .map(|s| s.to_string())
    }
}

/// Result type for OVH API operations
pub type Result<T> = std::result::Result<T, RestError>;
