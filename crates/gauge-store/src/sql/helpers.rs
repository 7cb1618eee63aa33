//! Row-to-entity parsing helpers.
//!
//! Timestamps are written as RFC 3339 with fixed microsecond precision so that
//! lexicographic `ORDER BY` on the TEXT column matches chronological order.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

use crate::error::StoreError;

/// Current time truncated to the precision that survives a round trip.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 and `SQLite`'s default `datetime('now')` format.
///
/// # Errors
///
/// Returns `StoreError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, StoreError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| StoreError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse a TEXT column into a serde-deserializable enum.
///
/// # Errors
///
/// Returns `StoreError::Query` if the string does not match any enum variant.
pub fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, StoreError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| StoreError::Query(format!("Failed to parse enum from '{s}': {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
///
/// # Errors
///
/// Returns `StoreError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, StoreError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Parse a JSON TEXT column. Empty text reads as `null`.
///
/// # Errors
///
/// Returns `StoreError::Query` if the text is not valid JSON.
pub fn parse_json<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, StoreError> {
    let text = if s.is_empty() { "null" } else { s };
    serde_json::from_str(text).map_err(|e| StoreError::Query(format!("Invalid JSON in column: {e}")))
}

/// Serialize a value for a JSON TEXT column.
///
/// # Errors
///
/// Returns `StoreError::Query` if serialization fails.
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<String, StoreError> {
    serde_json::to_string(value).map_err(|e| StoreError::Query(format!("JSON encode: {e}")))
}

/// Read an INTEGER score column into `u8`.
///
/// # Errors
///
/// Returns `StoreError::Query` if the stored value does not fit.
pub fn get_score(row: &libsql::Row, idx: i32) -> Result<u8, StoreError> {
    let raw = row.get::<i64>(idx)?;
    u8::try_from(raw).map_err(|_| StoreError::Query(format!("score {raw} out of range")))
}

/// Read a nullable INTEGER score column.
///
/// # Errors
///
/// Returns `StoreError::Query` if a stored value does not fit.
pub fn get_opt_score(row: &libsql::Row, idx: i32) -> Result<Option<u8>, StoreError> {
    row.get::<Option<i64>>(idx)?
        .map(|raw| {
            u8::try_from(raw).map_err(|_| StoreError::Query(format!("score {raw} out of range")))
        })
        .transpose()
}

/// Read an INTEGER count column into `u32`.
///
/// # Errors
///
/// Returns `StoreError::Query` if the stored value is negative or too large.
pub fn get_u32(row: &libsql::Row, idx: i32) -> Result<u32, StoreError> {
    let raw = row.get::<i64>(idx)?;
    u32::try_from(raw).map_err(|_| StoreError::Query(format!("count {raw} out of range")))
}

/// Detect a UNIQUE constraint violation.
///
/// libSQL surfaces constraint failures as `SqliteFailure` locally and as Hrana
/// errors remotely; the message text is the common denominator.
pub fn is_unique_violation(e: &libsql::Error) -> bool {
    e.to_string().contains("UNIQUE constraint failed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamps_roundtrip_at_micro_precision() {
        let ts = now();
        assert_eq!(parse_datetime(&format_timestamp(ts)).unwrap(), ts);
    }

    #[test]
    fn formatted_timestamps_sort_chronologically() {
        let earlier = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
        let later = earlier + chrono::Duration::microseconds(1);
        assert!(format_timestamp(earlier) < format_timestamp(later));
    }

    #[test]
    fn parses_sqlite_default_format() {
        let dt = parse_datetime("2026-02-09 14:30:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2026, 2, 9, 14, 30, 0).unwrap());
    }

    #[test]
    fn unique_violation_detection() {
        let unique = libsql::Error::SqliteFailure(
            2067,
            "UNIQUE constraint failed: analyses.document_id".into(),
        );
        let other = libsql::Error::SqliteFailure(1, "no such table: x".into());
        assert!(is_unique_violation(&unique));
        assert!(!is_unique_violation(&other));
    }
}
