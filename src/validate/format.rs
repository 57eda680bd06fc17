//! String format checks

use crate::schema::Format;
use chrono::DateTime;
use regex::Regex;
use std::sync::LazyLock;

/// RFC 3339 `date-time` production; the offset is mandatory and may be
/// written `±hhmm` as well as `±hh:mm`
static DATE_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<stamp>\d{4}-\d{2}-\d{2}[Tt]\d{2}:\d{2}:\d{2}(?:\.\d+)?)(?P<offset>[Zz]|[+-]\d{2}:?\d{2})$",
    )
    .expect("date-time pattern is a valid regex")
});

/// Whether `value` satisfies `format`
#[must_use]
#[inline]
pub fn conforms(format: Format, value: &str) -> bool {
    match format {
        Format::DateTime => is_date_time(value),
    }
}

/// Lexical check first, then calendar and clock ranges
#[must_use]
#[inline]
pub fn is_date_time(value: &str) -> bool {
    let Some(captures) = DATE_TIME.captures(value) else {
        return false;
    };
    let (Some(stamp), Some(offset)) = (captures.name("stamp"), captures.name("offset")) else {
        return false;
    };
    DateTime::parse_from_rfc3339(&with_colon_offset(stamp.as_str(), offset.as_str())).is_ok()
}

/// Rewrite a `±hhmm` offset as `±hh:mm`
fn with_colon_offset(stamp: &str, offset: &str) -> String {
    match offset.split_at_checked(3) {
        Some((hours, minutes)) if offset.len() == 5 => format!("{stamp}{hours}:{minutes}"),
        _ => format!("{stamp}{offset}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_compiles() {
        assert!(DATE_TIME.is_match("2025-09-11T04:55:00Z"));
    }

    #[test]
    fn test_accepts_utc_and_offsets() {
        assert!(is_date_time("2025-09-11T04:55:00Z"));
        assert!(is_date_time("2025-09-11T04:55:00+02:00"));
        assert!(is_date_time("2025-09-11T04:55:00.123-05:30"));
    }

    #[test]
    fn test_offset_without_colon() {
        assert_eq!(
            with_colon_offset("2025-09-11T04:55:00", "+0530"),
            "2025-09-11T04:55:00+05:30"
        );
        assert_eq!(with_colon_offset("2025-09-11T04:55:00", "Z"), "2025-09-11T04:55:00Z");
        assert!(is_date_time("2025-09-11T04:55:00+0530"));
        assert!(!is_date_time("2025-09-11T04:55:00+053"));
    }

    #[test]
    fn test_rejects_missing_offset() {
        assert!(!is_date_time("2025-09-11T04:55:00"));
        assert!(!is_date_time("2025-09-11"));
    }
}
