//! Database value parsing utilities
//!
//! Provides error-safe parsing and formatting of stored values.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::Error as SqlError;
use uuid::Uuid;

/// Parse a UUID from a database string column
pub fn parse_uuid(s: &str) -> Result<Uuid, SqlError> {
    Uuid::parse_str(s).map_err(|e| {
        SqlError::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Parse a DateTime from an RFC3339 string
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, SqlError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            SqlError::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })
}

/// Fixed-width RFC3339 so stored timestamps sort lexically
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Extension trait for converting rusqlite Results to Option
pub trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>, SqlError>;
}

impl<T> OptionalExt<T> for Result<T, SqlError> {
    fn optional(self) -> Result<Option<T>, SqlError> {
        match self {
            Ok(v) => Ok(Some(v)),
            Err(SqlError::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_datetime_round_trip_keeps_nanos() {
        let dt = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap()
            + chrono::Duration::nanoseconds(123_456_789);
        assert_eq!(parse_datetime(&format_datetime(&dt)).unwrap(), dt);
    }

    #[test]
    fn test_formatted_datetimes_sort() {
        let earlier = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let later = earlier + chrono::Duration::milliseconds(500);
        assert!(format_datetime(&earlier) < format_datetime(&later));
    }

    #[test]
    fn test_bad_uuid() {
        assert!(parse_uuid("not-a-uuid").is_err());
    }
}
