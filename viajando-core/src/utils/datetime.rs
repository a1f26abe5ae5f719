//! Trip date helpers.
//!
//! Dates arrive as whatever the user typed (usually the `YYYY-MM-DD`
//! value of a date input) and are stored as epoch milliseconds:
//! - Normalization: string -> epoch ms, never fails
//! - Display: epoch ms -> `dd/mm/yyyy`

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Stored in place of a date that could not be parsed.
///
/// Callers that care about well-formed dates validate before writing.
pub const INVALID_DATE: i64 = i64::MIN;

/// Display text for [`INVALID_DATE`] and out-of-range timestamps.
pub const INVALID_DATE_LABEL: &str = "Invalid Date";

/// Naive date-time layouts, interpreted as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Normalizes a human-entered date into epoch milliseconds.
///
/// Accepted inputs, tried in order:
/// 1. RFC3339 (`2024-12-01T10:30:00+02:00`)
/// 2. Naive date-time (`2024-12-01T10:30`, `2024-12-01 10:30:00`), as UTC
/// 3. Date only (`2024-12-01`), as UTC midnight
/// 4. All-digit string, taken as epoch milliseconds
///
/// Anything else yields [`INVALID_DATE`].
pub fn normalize_date(input: &str) -> i64 {
    parse_date_millis(input.trim()).unwrap_or_else(|| {
        log::warn!("Unparseable trip date '{input}', storing as invalid");
        INVALID_DATE
    })
}

fn parse_date_millis(s: &str) -> Option<i64> {
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(ndt.and_utc().timestamp_millis());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|ndt| ndt.and_utc().timestamp_millis());
    }

    if s.bytes().all(|b| b.is_ascii_digit()) {
        return s.parse::<i64>().ok();
    }

    None
}

/// Formats epoch milliseconds as `dd/mm/yyyy` (UTC).
#[must_use]
pub fn format_date(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis).map_or_else(
        || INVALID_DATE_LABEL.to_string(),
        |dt| dt.format("%d/%m/%Y").to_string(),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn date_only_is_utc_midnight() {
        assert_eq!(normalize_date("2024-12-01"), 1_733_011_200_000);
        assert_eq!(normalize_date("  2025-03-15 "), 1_741_996_800_000);
    }

    #[test]
    fn rfc3339_honours_offset() {
        assert_eq!(
            normalize_date("2024-12-01T02:00:00+02:00"),
            normalize_date("2024-12-01")
        );
        assert_eq!(normalize_date("2024-12-01T00:00:00.250Z"), 1_733_011_200_250);
    }

    #[test]
    fn naive_datetime_is_utc() {
        assert_eq!(normalize_date("2024-12-01T01:00"), 1_733_014_800_000);
        assert_eq!(normalize_date("2024-12-01 01:00:00"), 1_733_014_800_000);
    }

    #[test]
    fn digits_pass_through_as_millis() {
        assert_eq!(normalize_date("1733011200000"), 1_733_011_200_000);
    }

    #[test]
    fn malformed_input_does_not_fail() {
        assert_eq!(normalize_date(""), INVALID_DATE);
        assert_eq!(normalize_date("mañana"), INVALID_DATE);
        assert_eq!(normalize_date("2024-13-45"), INVALID_DATE);
        assert_eq!(normalize_date("-5"), INVALID_DATE);
    }

    #[test]
    fn formats_day_month_year() {
        assert_eq!(format_date(1_733_011_200_000), "01/12/2024");
        assert_eq!(format_date(0), "01/01/1970");
    }

    #[test]
    fn invalid_date_has_label() {
        assert_eq!(format_date(INVALID_DATE), INVALID_DATE_LABEL);
    }
}
