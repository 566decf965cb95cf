//! Date pattern matching and parsing for column classification.

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

/// Column-name fragments that trigger the permissive temporal coercion pass.
pub(crate) const DATE_KEYWORDS: [&str; 3] = ["year", "month", "day"];

// Date pattern regexes - compiled once at startup. Anchored at the value
// start only, so a date followed by a time-of-day component still matches.
pub(crate) static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^\d{4}-\d{2}-\d{2}").expect("Invalid regex: YYYY-MM-DD"),
        Regex::new(r"^\d{4}/\d{2}/\d{2}").expect("Invalid regex: YYYY/MM/DD"),
        Regex::new(r"^\d{2}/\d{2}/\d{4}").expect("Invalid regex: DD/MM/YYYY"),
        Regex::new(r"^\d{2}-\d{2}-\d{4}").expect("Invalid regex: DD-MM-YYYY"),
    ]
});

/// Check a single value against the ordered date-pattern set.
pub(crate) fn matches_date_pattern(value: &str) -> bool {
    DATE_PATTERNS.iter().any(|pattern| pattern.is_match(value))
}

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
];

// Day-first formats come before month-first, so an ambiguous value like
// 05/06/2024 parses day-first and 01/15/2024 falls through to month-first.
const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y", "%m/%d/%Y", "%m-%d-%Y",
];

/// Strict parse of one value to epoch milliseconds.
///
/// Tries datetime formats first, then bare dates at midnight. Returns `None`
/// for anything that parses under no known format.
pub(crate) fn parse_date_strict(value: &str) -> Option<i64> {
    let trimmed = value.trim();

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(datetime.and_utc().timestamp_millis());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis());
        }
    }

    None
}

/// Permissive parse of one value to epoch milliseconds.
///
/// Accepts everything the strict parse does, plus bare four-digit years
/// (parsed as January 1). The four-digit restriction keeps small integers
/// like day-of-month counts from turning into ancient dates.
pub(crate) fn parse_date_permissive(value: &str) -> Option<i64> {
    if let Some(ms) = parse_date_strict(value) {
        return Some(ms);
    }

    let trimmed = value.trim();
    if trimmed.len() == 4 && trimmed.chars().all(|c| c.is_ascii_digit()) {
        let year: i32 = trimmed.parse().ok()?;
        let date = NaiveDate::from_ymd_opt(year, 1, 1)?;
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis());
    }

    None
}
