//! ISO-8601 timestamp parsing for `datetime` variables.
//!
//! Accepts a date alone (`2024-01-15`) or a date and time joined by `T` or a
//! space, with minutes, optional seconds and fraction, and an optional `Z`
//! or `±HH:MM` offset. This covers what HTML `datetime-local` inputs submit.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::types::DateTimeValue;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%:z",
    "%Y-%m-%d %H:%M:%S%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

/// Parse an ISO-8601 timestamp. Returns `None` if no accepted form matches.
#[must_use]
pub fn parse_iso_datetime(input: &str) -> Option<DateTimeValue> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    // Normalize a trailing Zulu designator so %:z can read it.
    let zoned = s.strip_suffix('Z').or_else(|| s.strip_suffix('z'));
    if let Some(base) = zoned {
        let with_offset = format!("{base}+00:00");
        return parse_with_offset(&with_offset);
    }

    if let Some(dt) = parse_with_offset(s) {
        return Some(dt);
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(DateTimeValue::Naive(dt));
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(DateTimeValue::Naive)
}

fn parse_with_offset(s: &str) -> Option<DateTimeValue> {
    OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
        .map(DateTimeValue::Offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Offset, Timelike};

    fn naive(v: Option<DateTimeValue>) -> NaiveDateTime {
        match v {
            Some(DateTimeValue::Naive(dt)) => dt,
            other => panic!("expected naive datetime, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_date_only_is_midnight() {
        let dt = naive(parse_iso_datetime("2024-01-15"));
        assert_eq!((dt.year(), dt.month(), dt.day()), (2024, 1, 15));
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (0, 0, 0));
    }

    #[test]
    fn test_parse_datetime_local_form() {
        let dt = naive(parse_iso_datetime("2024-01-15T10:30"));
        assert_eq!((dt.hour(), dt.minute()), (10, 30));
    }

    #[test]
    fn test_parse_space_separator_with_seconds() {
        let dt = naive(parse_iso_datetime("2024-01-15 10:30:45"));
        assert_eq!(dt.second(), 45);
    }

    #[test]
    fn test_parse_fractional_seconds() {
        let dt = naive(parse_iso_datetime("2024-01-15T10:30:45.250"));
        assert_eq!(dt.nanosecond(), 250_000_000);
    }

    #[test]
    fn test_parse_with_offset() {
        match parse_iso_datetime("2024-01-15T10:30:00+09:00") {
            Some(DateTimeValue::Offset(dt)) => {
                assert_eq!(dt.offset().fix().local_minus_utc(), 9 * 3600);
                assert_eq!(dt.hour(), 10);
            }
            other => panic!("expected offset datetime, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_zulu() {
        match parse_iso_datetime("2024-01-15T10:30:00Z") {
            Some(DateTimeValue::Offset(dt)) => {
                assert_eq!(dt.offset().fix().local_minus_utc(), 0);
            }
            other => panic!("expected offset datetime, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_iso_datetime("").is_none());
        assert!(parse_iso_datetime("tomorrow").is_none());
        assert!(parse_iso_datetime("2024-13-45").is_none());
        assert!(parse_iso_datetime("15/01/2024").is_none());
    }
}
