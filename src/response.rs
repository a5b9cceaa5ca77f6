use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::str::FromStr;

use crate::error::{RestError, Result};
use crate::transport::RawResponse;

/// Expected structural type of a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Body is ignored
    None,
    /// Body is returned as raw text
    Scalar,
    /// Body must be a JSON object
    Object,
    /// Body must be a JSON array
    Array,
}

impl FromStr for Shape {
    type Err = RestError;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "none" => Ok(Shape::None),
            "scalar" => Ok(Shape::Scalar),
            "object" => Ok(Shape::Object),
            "array" => Ok(Shape::Array),
            other => Err(RestError::UnsupportedShape(other.to_string())),
        }
    }
}

/// Decoded body of a successful response.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Absent,
    Scalar(String),
    Object(Map<String, Value>),
    Array(Vec<Value>),
}

impl Payload {
    pub fn is_absent(&self) -> bool {
        matches!(self, Payload::Absent)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Payload::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map<String, Value>> {
        match self {
            Payload::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Payload::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Convert the payload back into a single JSON value
    pub fn into_value(self) -> Value {
        match self {
            Payload::Absent => Value::Null,
            Payload::Scalar(s) => Value::String(s),
            Payload::Object(map) => Value::Object(map),
            Payload::Array(items) => Value::Array(items),
        }
    }

    /// Get a value from a structured payload by a slash-separated path.
    /// For example, "user/name" would access the "name" field inside the "user" object.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('/').filter(|s| !s.is_empty());

        let mut current = match (self, parts.next()) {
            (Payload::Object(map), Some(first)) => map.get(first)?,
            (Payload::Array(items), Some(first)) => items.get(first.parse::<usize>().ok()?)?,
            _ => return None,
        };

        for part in parts {
            current = match current {
                Value::Object(map) => map.get(part)?,
                Value::Array(arr) => {
                    let index: usize = part.parse().ok()?;
                    arr.get(index)?
                }
                _ => return None,
            };
        }

        Some(current)
    }

    /// Get a string value from the payload by a slash-separated path
    pub fn get_string(&self, path: &str) -> Option<String> {
        self.get(path).and_then(|v| v.as_str().map(|s| s.to_string()))
    }
}

impl RawResponse {
    /// The domain error describing this response
    pub fn to_error(&self) -> RestError {
        RestError::domain(self.status, self.status_text.clone(), self.body.clone())
    }

    /// Classify the response and decode its body into the expected shape.
    ///
    /// Any non-2xx status is a [`RestError::Domain`] whatever the body holds.
    /// A 2xx body that does not parse, or parses to another shape, is reported
    /// as the same [`RestError::Domain`] error, never as a parse error.
    pub fn validate(&self, shape: Shape) -> Result<Payload> {
        if !self.is_success() {
            return Err(self.to_error());
        }

        match shape {
            Shape::None => Ok(Payload::Absent),
            Shape::Scalar => Ok(Payload::Scalar(self.body.clone().unwrap_or_default())),
            Shape::Object => match self.parse_body()? {
                Value::Object(map) => Ok(Payload::Object(map)),
                _ => Err(self.to_error()),
            },
            Shape::Array => match self.parse_body()? {
                Value::Array(items) => Ok(Payload::Array(items)),
                _ => Err(self.to_error()),
            },
        }
    }

    /// Same as [`RawResponse::validate`], with the shape given by name
    /// (`none`, `scalar`, `object` or `array`)
    pub fn validate_named(&self, shape: &str) -> Result<Payload> {
        self.validate(shape.parse()?)
    }

    /// Validate into `shape` then deserialize the payload into `T`.
    /// Deserialization failures collapse into [`RestError::Domain`] too.
    pub fn decode<T>(&self, shape: Shape) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let value = self.validate(shape)?.into_value();
        serde_json::from_value(value).map_err(|_| self.to_error())
    }

    fn parse_body(&self) -> Result<Value> {
        let body = self.body.as_deref().ok_or_else(|| self.to_error())?;
        serde_json::from_str(body).map_err(|_| self.to_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    fn ok(body: &str) -> RawResponse {
        RawResponse::new(200, "OK", Some(body.to_string()))
    }

    #[test]
    fn test_object_matches_direct_parse() {
        let body = r#"{"id":"img1","minDisk":10,"tags":["a"]}"#;
        let payload = ok(body).validate(Shape::Object).unwrap();
        let direct: Value = serde_json::from_str(body).unwrap();
        assert_eq!(payload.into_value(), direct);
    }

    #[test]
    fn test_non_success_is_domain_error_regardless_of_body() {
        for (status, body) in [
            (404, Some(r#"{"message":"not found"}"#)),
            (500, Some("not json")),
            (301, None),
            (199, Some("[]")),
        ] {
            let raw = RawResponse::new(status, "Status", body.map(str::to_string));
            for shape in [Shape::None, Shape::Scalar, Shape::Object, Shape::Array] {
                match raw.validate(shape) {
                    Err(RestError::Domain {
                        status: s,
                        status_text,
                        body: b,
                    }) => {
                        assert_eq!(s, status);
                        assert_eq!(status_text, "Status");
                        assert_eq!(b.as_deref(), body);
                    }
                    other => panic!("expected domain error, got {:?}", other),
                }
            }
        }
    }

    #[test]
    fn test_malformed_json_is_domain_error() {
        let raw = RawResponse::new(200, "OK", Some("{not json".to_string()));
        match raw.validate(Shape::Object) {
            Err(RestError::Domain { status, body, .. }) => {
                assert_eq!(status, 200);
                assert_eq!(body.as_deref(), Some("{not json"));
            }
            other => panic!("expected domain error, got {:?}", other),
        }
    }

    #[test]
    fn test_shape_mismatch_is_domain_error() {
        assert!(matches!(
            ok("[1,2]").validate(Shape::Object),
            Err(RestError::Domain { .. })
        ));
        assert!(matches!(
            ok(r#"{"a":1}"#).validate(Shape::Array),
            Err(RestError::Domain { .. })
        ));
        assert!(matches!(
            RawResponse::new(200, "OK", None).validate(Shape::Array),
            Err(RestError::Domain { .. })
        ));
    }

    #[test]
    fn test_none_and_scalar() {
        let raw = ok("{broken");
        assert!(raw.validate(Shape::None).unwrap().is_absent());
        assert_eq!(raw.validate(Shape::Scalar).unwrap().as_str(), Some("{broken"));
        let empty = RawResponse::new(204, "No Content", None);
        assert_eq!(empty.validate(Shape::Scalar).unwrap().as_str(), Some(""));
    }

    #[test]
    fn test_unsupported_shape() {
        match ok("{}").validate_named("xml") {
            Err(RestError::UnsupportedShape(name)) => assert_eq!(name, "xml"),
            other => panic!("expected unsupported shape, got {:?}", other),
        }
        assert!(ok("[]").validate_named("array").is_ok());
    }

    #[test]
    fn test_decode_typed() {
        #[derive(Deserialize)]
        struct Region {
            name: String,
        }

        let regions: Vec<Region> = ok(r#"[{"name":"GRA1"},{"name":"SBG1"}]"#)
            .decode(Shape::Array)
            .unwrap();
        assert_eq!(regions[1].name, "SBG1");

        let missing = ok(r#"[{"id":"x"}]"#).decode::<Vec<Region>>(Shape::Array);
        assert!(matches!(missing, Err(RestError::Domain { status: 200, .. })));
    }

    #[test]
    fn test_payload_get() {
        let payload = ok(r#"{"user":{"name":"test","keys":["a","b"]}}"#)
            .validate(Shape::Object)
            .unwrap();
        assert_eq!(payload.get_string("user/name"), Some("test".to_string()));
        assert_eq!(payload.get_string("user/keys/1"), Some("b".to_string()));
        assert!(payload.get("user/missing").is_none());

        let array = ok(r#"[{"id":"img1"}]"#).validate(Shape::Array).unwrap();
        assert_eq!(array.get_string("0/id"), Some("img1".to_string()));
    }
}
