//! Date parsing for countdowns and calendar links

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// RFC 3339, a naive date-time, or a bare `YYYY-MM-DD`. Naive values are
/// read as UTC.
pub fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// `20240131T093000Z`
pub fn calendar_stamp(dt: &DateTime<Utc>) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_formats() {
        let expected = parse_datetime("2030-01-31T09:30:00Z").expect("rfc3339");
        assert_eq!(parse_datetime("2030-01-31T09:30"), Some(expected));
        assert_eq!(parse_datetime("2030-01-31 09:30:00"), Some(expected));
        assert_eq!(
            parse_datetime("2030-01-31T11:30:00+02:00"),
            Some(expected)
        );
        assert_eq!(calendar_stamp(&expected), "20300131T093000Z");
        assert_eq!(
            calendar_stamp(&parse_datetime("2030-01-31").expect("date")),
            "20300131T000000Z"
        );
    }

    #[test]
    fn test_invalid_dates() {
        assert_eq!(parse_datetime(""), None);
        assert_eq!(parse_datetime("next friday"), None);
        assert_eq!(parse_datetime("2030-13-01"), None);
    }
}
