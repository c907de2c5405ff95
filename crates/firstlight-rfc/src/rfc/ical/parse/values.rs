//! Value parsing for the DATE, DATE-TIME and TEXT types (RFC 5545 §3.3).

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Parses the leading `YYYYMMDD` of a DATE or DATE-TIME value.
///
/// Anything after the eighth character (a `T...` time part, a `Z` suffix) is
/// ignored. Returns `None` for short or non-numeric input and for dates that
/// do not exist.
#[must_use]
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let digits = s.get(..8)?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let year = digits[..4].parse().ok()?;
    let month = digits[4..6].parse().ok()?;
    let day = digits[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Formats a date as the 8-digit `YYYYMMDD` form used throughout iCalendar.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Parses `YYYYMMDDTHHMMSS[Z]`, ignoring any `Z` suffix.
///
/// Seconds are optional. Returns `None` unless both the date and the hour and
/// minute parts are valid.
#[must_use]
pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let date = parse_date(s)?;
    let (hour, minute) = parse_time_of_day(s)?;
    let second = two_digits(s, 13).unwrap_or(0);
    let time = NaiveTime::from_hms_opt(hour, minute, second)?;

    Some(NaiveDateTime::new(date, time))
}

/// Reads the hour and minute of a `YYYYMMDDTHHMM...` value.
pub(crate) fn parse_time_of_day(s: &str) -> Option<(u32, u32)> {
    if !s.get(8..9)?.eq_ignore_ascii_case("T") {
        return None;
    }
    let hour = two_digits(s, 9)?;
    let minute = two_digits(s, 11)?;
    (hour < 24 && minute < 60).then_some((hour, minute))
}

fn two_digits(s: &str, at: usize) -> Option<u32> {
    let part = s.get(at..at + 2)?;
    if part.bytes().all(|b| b.is_ascii_digit()) {
        part.parse().ok()
    } else {
        None
    }
}

/// Unescapes TEXT values (RFC 5545 §3.3.11).
///
/// Handles `\\`, `\;`, `\,` and `\n`/`\N`. Unknown escapes are kept verbatim.
#[must_use]
pub fn unescape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n' | 'N') => result.push('\n'),
            Some(escaped @ ('\\' | ';' | ',')) => result.push(escaped),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_basic() {
        assert_eq!(parse_date("20260226"), NaiveDate::from_ymd_opt(2026, 2, 26));
        assert_eq!(
            parse_date("20260226T130000Z"),
            NaiveDate::from_ymd_opt(2026, 2, 26)
        );
    }

    #[test]
    fn parse_date_rejects_invalid() {
        assert_eq!(parse_date("2026022"), None);
        assert_eq!(parse_date("2026-02-2"), None);
        assert_eq!(parse_date("20260230"), None);
    }

    #[test]
    fn parse_datetime_with_and_without_zulu() {
        let expected = NaiveDate::from_ymd_opt(2026, 1, 1)
            .unwrap()
            .and_hms_opt(8, 15, 30)
            .unwrap();
        assert_eq!(parse_datetime("20260101T081530"), Some(expected));
        assert_eq!(parse_datetime("20260101T081530Z"), Some(expected));
    }

    #[test]
    fn parse_datetime_without_seconds() {
        let dt = parse_datetime("20260101T0815").unwrap();
        assert_eq!(dt.format("%H:%M:%S").to_string(), "08:15:00");
    }

    #[test]
    fn parse_datetime_rejects_bad_time() {
        assert_eq!(parse_datetime("20260101"), None);
        assert_eq!(parse_datetime("20260101T2500"), None);
        assert_eq!(parse_datetime("20260101X081500"), None);
    }

    #[test]
    fn format_date_round_trips() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(format_date(date), "20260307");
    }

    #[test]
    fn unescape_text_sequences() {
        assert_eq!(unescape_text(r"Lunch\, then gym"), "Lunch, then gym");
        assert_eq!(unescape_text(r"a\;b\\c"), r"a;b\c");
        assert_eq!(unescape_text(r"line1\nline2\Nline3"), "line1\nline2\nline3");
        assert_eq!(unescape_text(r"odd\x"), r"odd\x");
    }
}
