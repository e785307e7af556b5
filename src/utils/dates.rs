//! Timezone-safe date utilities
//!
//! Strings coming from the backend or from form inputs are often zone-free
//! wall-clock values (`2025-06-02T19:00:00`). Those must be read in the
//! viewer's timezone, never reinterpreted as UTC.

use std::sync::OnceLock;
use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike};
use regex::Regex;
use crate::utils::errors::{CommunityHubError, Result};

/// Formats tried, in order, for strings that carry an explicit offset.
/// A trailing `Z` is normalized to `+00:00` before these are applied.
const ZONED_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

fn local_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})(?:[T ](\d{1,2}):(\d{2})(?::(\d{2})(?:\.(\d{1,9}))?)?)?$")
            .expect("local date-time pattern is valid")
    })
}

/// Whether `s` carries an explicit zone marker: `Z`, `+hh:mm`, or a `-hh:mm`
/// offset after the time component. The dashes of the date part never count.
pub fn has_zone_marker(s: &str) -> bool {
    let s = s.trim();
    if s.contains('Z') || s.contains('z') || s.contains('+') {
        return true;
    }

    match s.split_once(['T', ' ']) {
        Some((_, time)) => time.contains('-'),
        None => false,
    }
}

/// Parse a date-time string in the local timezone of the process.
pub fn parse_as_local_date_time(s: &str) -> Result<DateTime<Local>> {
    parse_as_date_time_in(s, &Local)
}

/// Parse a date-time string, reading zone-free input as wall-clock time in `tz`.
///
/// Zoned input is parsed as an absolute instant and converted into `tz`.
/// Zone-free input is built component by component; a missing time means
/// midnight and missing seconds mean zero. A wall-clock time skipped by a DST
/// transition is rejected, an ambiguous one resolves to the earlier instant.
pub fn parse_as_date_time_in<Tz: TimeZone>(s: &str, tz: &Tz) -> Result<DateTime<Tz>> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(CommunityHubError::InvalidInput("Empty date-time string".to_string()));
    }

    if has_zone_marker(trimmed) {
        return parse_zoned(trimmed).map(|dt| dt.with_timezone(tz));
    }

    let naive = parse_naive(trimmed)?;
    tz.from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| CommunityHubError::InvalidInput(format!("Local time does not exist in this timezone: {}", trimmed)))
}

fn parse_zoned(s: &str) -> Result<DateTime<chrono::FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt);
    }

    let normalized = match s.strip_suffix(['Z', 'z']) {
        Some(rest) => format!("{}+00:00", rest),
        None => s.to_string(),
    };

    ZONED_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(&normalized, format).ok())
        .ok_or_else(|| CommunityHubError::InvalidInput(format!("Unrecognized zoned date-time: {}", s)))
}

fn parse_naive(s: &str) -> Result<NaiveDateTime> {
    let invalid = || CommunityHubError::InvalidInput(format!("Unrecognized date-time: {}", s));
    let captures = local_pattern().captures(s).ok_or_else(invalid)?;

    let number = |index: usize| -> Result<u32> {
        match captures.get(index) {
            Some(m) => m.as_str().parse::<u32>().map_err(|_| invalid()),
            None => Ok(0),
        }
    };

    let year = captures[1].parse::<i32>().map_err(|_| invalid())?;
    let date = NaiveDate::from_ymd_opt(year, number(2)?, number(3)?).ok_or_else(invalid)?;

    let nanos = match captures.get(7) {
        Some(fraction) => {
            let digits = fraction.as_str();
            let padded = format!("{:0<9}", digits);
            padded.parse::<u32>().map_err(|_| invalid())?
        }
        None => 0,
    };
    let time = NaiveTime::from_hms_nano_opt(number(4)?, number(5)?, number(6)?, nanos).ok_or_else(invalid)?;

    Ok(date.and_time(time))
}

/// Render the calendar date as `YYYY-MM-DD` in the value's own timezone.
pub fn format_local_date<Tz: TimeZone>(d: &DateTime<Tz>) -> String {
    format!("{:04}-{:02}-{:02}", d.year(), d.month(), d.day())
}

/// Render the wall-clock time as `HH:MM` in the value's own timezone.
pub fn format_local_time<Tz: TimeZone>(d: &DateTime<Tz>) -> String {
    format!("{:02}:{:02}", d.hour(), d.minute())
}

/// Render a zone-free `YYYY-MM-DDTHH:MM:SS`, the inverse of the parser.
pub fn format_local_date_time<Tz: TimeZone>(d: &DateTime<Tz>) -> String {
    format!("{}T{}:{:02}", format_local_date(d), format_local_time(d), d.second())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};
    use proptest::prelude::*;

    fn offset(hours: i32) -> FixedOffset {
        FixedOffset::east_opt(hours * 3600).unwrap()
    }

    #[test]
    fn test_zone_free_keeps_local_hour() {
        let parsed = parse_as_local_date_time("2025-06-02T19:00:00").unwrap();
        assert_eq!(parsed.hour(), 19);
        assert_eq!(parsed.minute(), 0);
        assert_eq!(format_local_date(&parsed), "2025-06-02");
    }

    #[test]
    fn test_zone_free_is_wall_clock_in_any_offset() {
        for hours in [-10, -5, 0, 2, 9, 14] {
            let parsed = parse_as_date_time_in("2025-06-02T19:00:00", &offset(hours)).unwrap();
            assert_eq!(parsed.hour(), 19, "offset {}", hours);
            assert_eq!(parsed.day(), 2, "offset {}", hours);
        }
    }

    #[test]
    fn test_utc_marker_uses_standard_interpretation() {
        let parsed = parse_as_local_date_time("2025-06-02T19:00:00Z").unwrap();
        let expected = Utc.with_ymd_and_hms(2025, 6, 2, 19, 0, 0).unwrap();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_explicit_offsets() {
        let tz = offset(0);
        let plus = parse_as_date_time_in("2025-06-02T19:00:00+02:00", &tz).unwrap();
        assert_eq!(plus.hour(), 17);

        let minus = parse_as_date_time_in("2025-06-02T19:00:00-05:00", &tz).unwrap();
        assert_eq!(minus.hour(), 0);
        assert_eq!(minus.day(), 3);

        let short = parse_as_date_time_in("2025-06-02T19:00Z", &tz).unwrap();
        assert_eq!(short.hour(), 19);
    }

    #[test]
    fn test_zone_marker_detection() {
        assert!(has_zone_marker("2025-06-02T19:00:00Z"));
        assert!(has_zone_marker("2025-06-02T19:00:00+01:00"));
        assert!(has_zone_marker("2025-06-02T19:00:00-03:00"));
        assert!(!has_zone_marker("2025-06-02T19:00:00"));
        assert!(!has_zone_marker("2025-06-02 19:00"));
        assert!(!has_zone_marker("2025-06-02"));
    }

    #[test]
    fn test_missing_components_default_to_zero() {
        let tz = offset(3);
        let no_seconds = parse_as_date_time_in("2025-06-02T08:30", &tz).unwrap();
        assert_eq!((no_seconds.hour(), no_seconds.minute(), no_seconds.second()), (8, 30, 0));

        let date_only = parse_as_date_time_in("2025-06-02", &tz).unwrap();
        assert_eq!(format_local_time(&date_only), "00:00");

        let space_separated = parse_as_date_time_in("2025-06-02 08:30:15", &tz).unwrap();
        assert_eq!(space_separated.second(), 15);
    }

    #[test]
    fn test_fractional_seconds_preserved() {
        let parsed = parse_as_date_time_in("2025-06-02T08:30:15.25", &offset(0)).unwrap();
        assert_eq!(parsed.nanosecond(), 250_000_000);
    }

    #[test]
    fn test_invalid_inputs() {
        let tz = offset(0);
        assert!(parse_as_date_time_in("", &tz).is_err());
        assert!(parse_as_date_time_in("not a date", &tz).is_err());
        assert!(parse_as_date_time_in("2025-13-02T10:00", &tz).is_err());
        assert!(parse_as_date_time_in("2025-06-02T25:00", &tz).is_err());
        assert!(parse_as_date_time_in("2025-06-02T10:00:00+zz", &tz).is_err());
    }

    #[test]
    fn test_formatting_is_zero_padded() {
        let value = offset(1).with_ymd_and_hms(2025, 1, 5, 7, 3, 9).unwrap();
        assert_eq!(format_local_date(&value), "2025-01-05");
        assert_eq!(format_local_time(&value), "07:03");
        assert_eq!(format_local_date_time(&value), "2025-01-05T07:03:09");
    }

    proptest! {
        #[test]
        fn prop_zone_free_round_trip(
            year in 1970i32..2100,
            month in 1u32..=12,
            day in 1u32..=28,
            hour in 0u32..24,
            minute in 0u32..60,
            hours_east in -12i32..=14,
        ) {
            let input = format!("{:04}-{:02}-{:02}T{:02}:{:02}:00", year, month, day, hour, minute);
            let parsed = parse_as_date_time_in(&input, &offset(hours_east)).unwrap();

            prop_assert_eq!(format_local_date(&parsed), input[..10].to_string());
            prop_assert_eq!(format_local_time(&parsed), input[11..16].to_string());
        }
    }
}
