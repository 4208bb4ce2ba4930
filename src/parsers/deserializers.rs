use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Offset-aware layouts tried after RFC 3339
const TIMESTAMP_FALLBACK_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M:%S%.f%z"];

/// Parse an ISO-8601 timestamp with an explicit UTC offset
///
/// A trailing `Z` is rewritten to `+00:00` before parsing. Timestamps without
/// an offset are rejected: every message must carry a timezone-aware instant.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    let normalized = match raw.strip_suffix('Z') {
        Some(stripped) => format!("{}+00:00", stripped),
        None => raw.to_string(),
    };

    DateTime::parse_from_rfc3339(&normalized).ok().or_else(|| {
        TIMESTAMP_FALLBACK_FORMATS
            .iter()
            .find_map(|fmt| DateTime::parse_from_str(&normalized, fmt).ok())
    })
}

/// Timestamp from a raw JSON field; anything but a parseable string yields `None`
pub fn timestamp_from_value(value: Option<&Value>) -> Option<DateTime<FixedOffset>> {
    value.and_then(Value::as_str).and_then(parse_timestamp)
}

/// Deserialize an optional string field, treating any non-string value as absent
pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

/// Deserialize a flag with JSON truthiness (`true`, non-zero numbers, non-empty strings)
pub fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
    })
}
