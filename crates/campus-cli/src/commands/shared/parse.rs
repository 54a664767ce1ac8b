use campus_core::enums::VoteType;
use campus_core::errors::CoreError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;

/// Parse a `snake_case` enum value using serde deserialization.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
    serde_json::from_value(serde_json::Value::String(normalized))
        .map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

/// Parse a vote direction. Anything but `up`/`down` is a validation error.
pub fn parse_vote_type(raw: &str) -> Result<VoteType, CoreError> {
    raw.trim().to_ascii_lowercase().parse()
}

/// Parse a due date: RFC 3339, or `YYYY-MM-DD` meaning the last second of that day in UTC.
pub fn parse_due_date(raw: &str) -> anyhow::Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(23, 59, 59))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            anyhow::anyhow!("invalid due date '{raw}': expected RFC 3339 or YYYY-MM-DD")
        })
}
