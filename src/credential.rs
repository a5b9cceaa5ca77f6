use sha1::{Digest, Sha1};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::Result;

/// Header carrying the signing timestamp (seconds since epoch)
pub const HEADER_TIMESTAMP: &str = "X-Ovh-Timestamp";
/// Header carrying the hex SHA-1 signature
pub const HEADER_SIGNATURE: &str = "X-Ovh-Signature";
/// Header carrying the application key
pub const HEADER_APPLICATION: &str = "X-Ovh-Application";
/// Header carrying the consumer key
pub const HEADER_CONSUMER: &str = "X-Ovh-Consumer";

/// Credential holds the application key/secret pair and the consumer key
/// used to sign every request.
#[derive(Clone)]
pub struct Credential {
    application_key: String,
    application_secret: String,
    consumer_key: String,
}

/// Headers produced by signing a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeaders {
    pub timestamp: u64,
    pub signature: String,
    pub application: String,
    pub consumer: String,
}

impl SignatureHeaders {
    /// Header name/value pairs, in the order they are attached to the request
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, String)> + '_ {
        [
            (HEADER_TIMESTAMP, self.timestamp.to_string()),
            (HEADER_SIGNATURE, self.signature.clone()),
            (HEADER_APPLICATION, self.application.clone()),
            (HEADER_CONSUMER, self.consumer.clone()),
        ]
        .into_iter()
    }
}

impl Credential {
    /// Create a new Credential
    ///
    /// # Arguments
    /// * `application_key` - The OVH API application key
    /// * `application_secret` - The OVH API application secret
    /// * `consumer_key` - The OVH API consumer key
    pub fn new(
        application_key: impl Into<String>,
        application_secret: impl Into<String>,
        consumer_key: impl Into<String>,
    ) -> Self {
        Credential {
            application_key: application_key.into(),
            application_secret: application_secret.into(),
            consumer_key: consumer_key.into(),
        }
    }

    /// Create a Credential and run [`Credential::check`] on it
    pub async fn build(
        application_key: impl Into<String>,
        application_secret: impl Into<String>,
        consumer_key: impl Into<String>,
    ) -> Result<Self> {
        let credential = Credential::new(application_key, application_secret, consumer_key);
        credential.check().await?;
        Ok(credential)
    }

    /// Check that the consumer key has been claimed by a user account.
    ///
    /// Not implemented: OVH has not defined how the claim status is exposed,
    /// so this always succeeds. Do not rely on it to reject bad keys.
    pub async fn check(&self) -> Result<()> {
        Ok(())
    }

    pub fn application_key(&self) -> &str {
        &self.application_key
    }

    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    /// Sign a request using the current wall-clock time
    ///
    /// # Arguments
    /// * `method` - HTTP method (GET, POST, etc.)
    /// * `url` - Full request URL, query string included
    /// * `body` - Request body (if any)
    pub fn sign(&self, method: &str, url: &str, body: Option<&str>) -> Result<SignatureHeaders> {
        let timestamp = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
        Ok(self.sign_at(method, url, body, timestamp))
    }

    /// Sign a request for a fixed timestamp
    pub fn sign_at(
        &self,
        method: &str,
        url: &str,
        body: Option<&str>,
        timestamp: u64,
    ) -> SignatureHeaders {
        // Field order is fixed by the server, any deviation invalidates the signature
        let pre_hash = format!(
            "{}+{}+{}+{}+{}+{}",
            self.application_secret,
            self.consumer_key,
            method,
            url,
            body.unwrap_or(""),
            timestamp
        );

        tracing::trace!(method, url, timestamp, "signing request");

        SignatureHeaders {
            timestamp,
            signature: hex::encode(Sha1::digest(pre_hash.as_bytes())),
            application: self.application_key.clone(),
            consumer: self.consumer_key.clone(),
        }
    }
}

// Implement Debug manually to avoid exposing the secrets
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("application_key", &self.application_key)
            .field("application_secret", &"<redacted>")
            .field("consumer_key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credential() -> Credential {
        Credential::new("app-key", "app-secret", "consumer-key")
    }

    #[test]
    fn test_signature_is_deterministic() {
        let cred = credential();
        let url = "https://eu.api.ovh.com/1.0/cloud/project";
        let a = cred.sign_at("GET", url, None, 1_457_018_875);
        let b = cred.sign_at("GET", url, None, 1_457_018_875);
        assert_eq!(a, b);
    }

    #[test]
    fn test_signature_format() {
        let sig = credential().sign_at("POST", "https://x/1.0/a", Some("{}"), 1).signature;
        assert_eq!(sig.len(), 40);
        assert!(sig
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_signature_matches_canonical_string() {
        let cred = credential();
        let headers = cred.sign_at("GET", "https://eu.api.ovh.com/1.0/me", None, 42);
        let expected = hex::encode(Sha1::digest(
            b"app-secret+consumer-key+GET+https://eu.api.ovh.com/1.0/me++42",
        ));
        assert_eq!(headers.signature, expected);
    }

    #[test]
    fn test_known_sha1_vector() {
        // sha1("abc") from FIPS 180-1, checks lowercase zero-padded hex
        assert_eq!(
            hex::encode(Sha1::digest(b"abc")),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
    }

    #[test]
    fn test_signature_depends_on_timestamp_and_body() {
        let cred = credential();
        let base = cred.sign_at("PUT", "u", Some("a"), 10);
        assert_ne!(base.signature, cred.sign_at("PUT", "u", Some("a"), 11).signature);
        assert_ne!(base.signature, cred.sign_at("PUT", "u", Some("b"), 10).signature);
        assert_eq!(
            cred.sign_at("PUT", "u", None, 10).signature,
            cred.sign_at("PUT", "u", Some(""), 10).signature
        );
    }

    #[test]
    fn test_signature_headers() {
        let headers = credential().sign_at("GET", "u", None, 1234);
        let pairs: Vec<_> = headers.iter().collect();
        assert_eq!(pairs[0], ("X-Ovh-Timestamp", "1234".to_string()));
        assert_eq!(pairs[1].0, "X-Ovh-Signature");
        assert_eq!(pairs[2], ("X-Ovh-Application", "app-key".to_string()));
        assert_eq!(pairs[3], ("X-Ovh-Consumer", "consumer-key".to_string()));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let debug = format!("{:?}", credential());
        assert!(debug.contains("app-key"));
        assert!(!debug.contains("app-secret"));
        assert!(!debug.contains("consumer-key"));
    }
}
