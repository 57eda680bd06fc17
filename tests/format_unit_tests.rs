//! Unit tests for string formats

use alertcheck::schema::Format;
use alertcheck::validate::format::{conforms, is_date_time};

#[test]
fn test_valid_date_times() {
    for value in [
        "2025-09-11T04:55:00Z",
        "2025-09-11T04:55:00+00:00",
        "2025-09-11T04:55:00-07:00",
        "2025-09-11T04:55:00.1Z",
        "2025-09-11T04:55:00.123456789+05:30",
        "2024-02-29T23:59:59Z",
        "2016-12-31T23:59:60Z",
        "2025-09-11T04:55:00+0530",
        "2025-09-11T04:55:00-0700",
        "1970-01-01T00:00:00Z",
    ] {
        assert!(is_date_time(value), "{value} should be a date-time");
    }
}

#[test]
fn test_invalid_date_times() {
    for value in [
        "",
        "2025-09-11",
        "04:55:00Z",
        "2025-09-11T04:55:00",
        "2025-09-11T04:55Z",
        "2025-09-11 04:55:00Z",
        "2025-09-11T04:55:00+05:3",
        "2025-09-11T04:55:00+053",
        "2016-12-31T23:59:61Z",
        "2025-09-11T04:55:00.Z",
        "2025-9-11T04:55:00Z",
        "2025-13-01T00:00:00Z",
        "2025-04-31T00:00:00Z",
        "2023-02-29T00:00:00Z",
        "2025-09-11T24:00:00Z",
        "2025-09-11T04:60:00Z",
        "2025-09-11T04:55:00Z ",
        "not a timestamp",
    ] {
        assert!(!is_date_time(value), "{value:?} should not be a date-time");
    }
}

#[test]
fn test_conforms_dispatches_on_format() {
    assert!(conforms(Format::DateTime, "2025-09-11T04:55:00Z"));
    assert!(!conforms(Format::DateTime, "yesterday"));
}
