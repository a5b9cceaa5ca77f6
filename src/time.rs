use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};

use crate::error::{RestError, Result};

/// Date format used by the OVH API, e.g. `2020-01-01T00:00:00+00:00`
pub const API_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Convert an API date to a timestamp in milliseconds since the epoch.
///
/// A zero offset may be written `Z` as well as `+00:00`.
pub fn date_to_time(date: &str) -> Result<i64> {
    let parsed = match date.strip_suffix('Z') {
        Some(utc) => DateTime::parse_from_str(&format!("{}+00:00", utc), API_DATE_FORMAT),
        None => DateTime::parse_from_str(date, API_DATE_FORMAT),
    };
    parsed
        .map(|dt| dt.timestamp_millis())
        .map_err(|source| RestError::Date {
            input: date.to_string(),
            source,
        })
}

/// Convert a timestamp in milliseconds since the epoch to the API date format, in UTC
pub fn time_to_date(time: i64) -> Option<String> {
    let dt = Utc.timestamp_millis_opt(time).single()?;
    Some(dt.format(API_DATE_FORMAT).to_string())
}

/// Serde adapter reading an API date into epoch milliseconds.
///
/// Use with `#[serde(deserialize_with = "crate::time::deserialize_millis")]`.
pub fn deserialize_millis<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let date = String::deserialize(deserializer)?;
    date_to_time(&date).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_to_time() {
        assert_eq!(date_to_time("2020-01-01T00:00:00+00:00").unwrap(), 1_577_836_800_000);
        assert_eq!(date_to_time("2020-01-01T02:00:00+02:00").unwrap(), 1_577_836_800_000);
    }

    #[test]
    fn test_date_to_time_zulu() {
        assert_eq!(date_to_time("2020-01-01T00:00:00Z").unwrap(), 1_577_836_800_000);
        assert!(date_to_time("2020-01-01T00:00:00+00:00Z").is_err());
        assert!(date_to_time("Z").is_err());
    }

    #[test]
    fn test_time_to_date() {
        assert_eq!(
            time_to_date(1_577_836_800_000).as_deref(),
            Some("2020-01-01T00:00:00+00:00")
        );
    }

    #[test]
    fn test_round_trip_truncates_millis() {
        let date = time_to_date(1_597_242_491_747).unwrap();
        assert_eq!(date_to_time(&date).unwrap(), 1_597_242_491_000);
    }

    #[test]
    fn test_invalid_date() {
        match date_to_time("2020-01-01 00:00:00") {
            Err(RestError::Date { input, .. }) => assert_eq!(input, "2020-01-01 00:00:00"),
            other => panic!("expected date error, got {:?}", other),
        }
    }

    #[test]
    fn test_deserialize_millis() {
        #[derive(Deserialize)]
        struct Stamped {
            #[serde(deserialize_with = "deserialize_millis")]
            at: i64,
        }

        let s: Stamped = serde_json::from_str(r#"{"at":"2020-01-01T00:00:00+00:00"}"#).unwrap();
        assert_eq!(s.at, 1_577_836_800_000);
        assert!(serde_json::from_str::<Stamped>(r#"{"at":"yesterday"}"#).is_err());
    }
}
