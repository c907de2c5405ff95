//! `DTSTART` resolution into the target timezone.

use chrono::{DateTime, NaiveDateTime, Timelike, Utc};
use chrono_tz::Tz;

use super::timezone::{TimeZoneResolver, convert_between, to_local};
use crate::rfc::ical::core::ResolvedStart;
use crate::rfc::ical::parse::{
    parse_date, parse_datetime, parse_time_of_day, split_content_line,
};

/// ## Summary
/// Resolves a raw `DTSTART` content line to local date and time in `target`.
///
/// Three encodings are recognised:
/// - all-day: `VALUE=DATE`, or a value of exactly eight characters
/// - UTC: a value ending in `Z`, converted to the target wall clock
/// - zoned: a `TZID` parameter, converted from that zone to the target
///
/// A value with neither `Z` nor `TZID` is floating and is read as target
/// local time, as is a value whose `TZID` cannot be resolved.
///
/// Never fails. An unreadable value yields `date: None` with whatever hour
/// and minute could be read, so the event simply never matches.
#[must_use]
pub fn resolve_start(
    dtstart_raw: &str,
    target: Tz,
    resolver: &mut TimeZoneResolver,
) -> ResolvedStart {
    let Some(cl) = split_content_line(dtstart_raw) else {
        tracing::trace!(dtstart_raw, "DTSTART has no value");
        return unreadable("");
    };
    let value = cl.value.trim();

    let is_date_value = cl
        .param("VALUE")
        .is_some_and(|v| v.eq_ignore_ascii_case("DATE"));
    if is_date_value || value.len() == 8 {
        return ResolvedStart {
            date: parse_date(value),
            hour: 0,
            minute: 0,
            all_day: true,
            source_tz: None,
        };
    }

    let Some(local) = parse_datetime(value) else {
        tracing::trace!(value, "Unreadable DTSTART value");
        return unreadable(value);
    };

    if value.ends_with(['Z', 'z']) {
        let instant = DateTime::<Utc>::from_naive_utc_and_offset(local, Utc);
        return timed(to_local(instant, target), Some("UTC".to_string()));
    }

    let Some(tzid) = cl.param("TZID") else {
        return timed(local, None);
    };

    let converted = resolver
        .resolve(tzid)
        .and_then(|source| convert_between(local, source, target));
    match converted {
        Ok(in_target) => timed(in_target, Some(tzid.to_string())),
        Err(err) => {
            tracing::warn!(tzid, error = %err, "Reading DTSTART as target-local time");
            timed(local, Some(tzid.to_string()))
        }
    }
}

fn timed(local: NaiveDateTime, source_tz: Option<String>) -> ResolvedStart {
    ResolvedStart {
        date: Some(local.date()),
        hour: local.hour(),
        minute: local.minute(),
        all_day: false,
        source_tz,
    }
}

/// Best-effort reading of a value that is not a valid DATE-TIME.
fn unreadable(value: &str) -> ResolvedStart {
    let (hour, minute) = parse_time_of_day(value).unwrap_or((0, 0));
    ResolvedStart {
        date: None,
        hour,
        minute,
        all_day: false,
        source_tz: None,
    }
}
