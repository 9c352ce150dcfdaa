//! Backend timestamps: RFC 3339, or naive ISO 8601 which is taken as UTC.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    parse(&raw).map(Some).map_err(serde::de::Error::custom)
}

fn parse(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => Ok(dt.with_timezone(&Utc)),
        Err(_) => NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.and_utc()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naive_timestamp_is_utc() {
        let dt = parse("2024-03-01T12:00:00.123456").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-03-01T12:00:00.123456+00:00");
    }

    #[test]
    fn test_offset_timestamp_is_converted() {
        let dt = parse("2024-03-01T14:00:00+02:00").unwrap();
        assert_eq!(dt, parse("2024-03-01T12:00:00Z").unwrap());
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(parse("yesterday").is_err());
    }
}
