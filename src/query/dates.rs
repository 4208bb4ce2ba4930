use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

use crate::error::{QueryError, Result};

const NAIVE_DATETIME_FORMATS: [&str; 4] =
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

/// Parse a user-supplied `--since`/`--until` bound
///
/// Accepts RFC 3339 (`Z` or an explicit offset), a naive date-time, or a bare
/// `YYYY-MM-DD` (midnight). Naive inputs are taken in the local timezone.
///
/// # Examples
///
/// ```
/// use ai_history_query::query::parse_date_bound;
///
/// let bound = parse_date_bound("2025-11-01T00:00:00Z").unwrap();
/// assert_eq!(bound.to_rfc3339(), "2025-11-01T00:00:00+00:00");
/// assert!(parse_date_bound("yesterday").is_err());
/// ```
pub fn parse_date_bound(input: &str) -> Result<DateTime<FixedOffset>> {
    let trimmed = input.trim();
    let invalid = || QueryError::InvalidDate { input: input.to_string() };

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed);
    }

    let naive = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
        .ok_or_else(invalid)?;

    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.fixed_offset())
        .ok_or_else(invalid)
}
