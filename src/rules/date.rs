//! Date/time parsing predicate.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::core::value::Value;

const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: [&str; 8] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
];

const TIME_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];

/// Passes when the value parses as a recognizable date, time, or
/// date-time string: RFC 3339, RFC 2822, or one of the common calendar
/// layouts. Calendar validity is enforced, so `2023-02-30` fails.
#[must_use]
pub fn date(value: &Value) -> bool {
    let text = value.as_text();
    let text = text.trim();
    if text.is_empty() {
        return false;
    }

    DateTime::parse_from_rfc3339(text).is_ok()
        || DateTime::parse_from_rfc2822(text).is_ok()
        || DATETIME_FORMATS
            .iter()
            .any(|fmt| NaiveDateTime::parse_from_str(text, fmt).is_ok())
        || DATE_FORMATS
            .iter()
            .any(|fmt| NaiveDate::parse_from_str(text, fmt).is_ok())
        || TIME_FORMATS
            .iter()
            .any(|fmt| NaiveTime::parse_from_str(text, fmt).is_ok())
}

// ============================================================================
// TESTS
// ============================================================================
