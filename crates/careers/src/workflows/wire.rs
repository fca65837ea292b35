//! Lenient decoding helpers for rows coming back from the hosted record store.
//!
//! Identifiers may arrive as JSON strings or numbers and timestamps in either RFC 3339 or
//! Postgres text form, so row decoding normalizes them here instead of failing the whole fetch.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Parse a stored timestamp into a UTC instant. Bare dates resolve to midnight UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }

    if let Ok(instant) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Some(instant.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

pub(crate) fn deserialize_identifier<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    scalar_to_string(value)
        .ok_or_else(|| serde::de::Error::custom("identifier must be a string or number"))
}

pub(crate) fn deserialize_reference<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(scalar_to_string)
        .filter(|reference| !reference.trim().is_empty()))
}

pub(crate) fn deserialize_nullable_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Unparseable timestamps decode to `None` rather than rejecting the row.
pub(crate) fn deserialize_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(raw)) => parse_timestamp(&raw),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_supported_timestamp_shapes() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).single();
        assert_eq!(parse_timestamp("2024-03-01T09:30:00Z"), expected);
        assert_eq!(parse_timestamp("2024-03-01T13:30:00+04:00"), expected);
        assert_eq!(parse_timestamp("2024-03-01 09:30:00+00"), expected);
        assert_eq!(parse_timestamp("2024-03-01T09:30:00"), expected);
        assert_eq!(
            parse_timestamp("2024-03-01"),
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).single()
        );
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp("   "), None);
    }

    #[test]
    fn fractional_seconds_are_kept() {
        let parsed = parse_timestamp("2024-03-01T09:30:00.250123+00:00").expect("parses");
        assert_eq!(parsed.timestamp_subsec_micros(), 250_123);
    }
}
