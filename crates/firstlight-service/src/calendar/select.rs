//! Early-event selection over parsed events.

use chrono::NaiveDate;
use chrono_tz::Tz;
use firstlight_rfc::rfc::ical::VEvent;
use firstlight_rfc::rfc::ical::expand::{TimeZoneResolver, occurrence_on, resolve_start};

use super::outcome::EarlyEvent;

/// ## Summary
/// Finds the earliest occurrence on `target` that starts before `cutoff_hour`.
///
/// Each event's start is resolved into `tz`, matched against `target`, and
/// kept when its hour is strictly below the cutoff. Candidates are ordered by
/// minute of day; events starting at the same minute keep their feed order.
#[tracing::instrument(skip(events), fields(events = events.len()))]
#[must_use]
pub fn find_early_event(
    events: &[VEvent],
    target: NaiveDate,
    cutoff_hour: u32,
    tz: Tz,
) -> Option<EarlyEvent> {
    let mut resolver = TimeZoneResolver::new();

    let mut candidates: Vec<(&str, _)> = events
        .iter()
        .filter_map(|event| {
            let start = resolve_start(&event.dtstart_raw, tz, &mut resolver);
            let occurrence = occurrence_on(event, &start, target)?;
            tracing::trace!(
                summary = %event.summary,
                hour = occurrence.hour,
                minute = occurrence.minute,
                "Occurs on target day"
            );
            (occurrence.hour < cutoff_hour).then_some((event.summary.as_str(), occurrence))
        })
        .collect();

    tracing::debug!(candidates = candidates.len(), "Collected early candidates");

    candidates.sort_by_key(|(_, occurrence)| occurrence.minutes_of_day());

    candidates
        .first()
        .map(|(title, occurrence)| EarlyEvent::new(*title, occurrence.hour, occurrence.minute))
}

#[cfg(test)]
mod tests {
    use super::*;
    use firstlight_rfc::rfc::ical::parse_events;

    const CHICAGO: Tz = Tz::America__Chicago;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn vevent(summary: &str, dtstart: &str) -> VEvent {
        VEvent {
            summary: summary.to_string(),
            dtstart_raw: dtstart.to_string(),
            ..VEvent::default()
        }
    }

    #[test_log::test]
    fn picks_earliest_before_cutoff() {
        let events = vec![
            vevent("Gym", "DTSTART:20260226T073000"),
            vevent("Coffee", "DTSTART:20260226T063000"),
            vevent("Lunch", "DTSTART:20260226T120000"),
        ];

        let found = find_early_event(&events, day(2026, 2, 26), 9, CHICAGO).unwrap();
        assert_eq!(found.title, "Coffee");
        assert_eq!((found.hour, found.minute), (6, 30));
        assert_eq!(found.time, "6:30 AM");
    }

    #[test]
    fn cutoff_is_exclusive() {
        let events = vec![
            vevent("Nine", "DTSTART:20260226T090000"),
            vevent("Late", "DTSTART:20260226T091500"),
        ];
        assert_eq!(find_early_event(&events, day(2026, 2, 26), 9, CHICAGO), None);

        let events = vec![vevent("Almost", "DTSTART:20260226T085900")];
        assert!(find_early_event(&events, day(2026, 2, 26), 9, CHICAGO).is_some());
    }

    #[test]
    fn ties_keep_feed_order() {
        let events = vec![
            vevent("First", "DTSTART:20260226T070000"),
            vevent("Second", "DTSTART:20260226T070000"),
        ];
        let found = find_early_event(&events, day(2026, 2, 26), 9, CHICAGO).unwrap();
        assert_eq!(found.title, "First");
    }

    #[test]
    fn all_day_event_qualifies_at_midnight() {
        let events = vec![
            vevent("Breakfast", "DTSTART:20260226T060000"),
            vevent("Holiday", "DTSTART;VALUE=DATE:20260226"),
        ];
        let found = find_early_event(&events, day(2026, 2, 26), 9, CHICAGO).unwrap();
        assert_eq!(found.title, "Holiday");
        assert_eq!(found.time, "12:00 AM");
    }

    #[test]
    fn recurring_and_utc_events_are_combined() {
        let feed = "BEGIN:VCALENDAR\r\n\
            BEGIN:VEVENT\r\n\
            SUMMARY:Standup\r\n\
            DTSTART;TZID=America/Chicago:20260101T080000\r\n\
            RRULE:FREQ=WEEKLY;BYDAY=TU,TH\r\n\
            END:VEVENT\r\n\
            BEGIN:VEVENT\r\n\
            SUMMARY:Call\r\n\
            DTSTART:20260226T133000Z\r\n\
            END:VEVENT\r\n\
            END:VCALENDAR\r\n";
        let events = parse_events(feed);

        // Thursday 2026-02-26: Standup at 8:00, Call at 7:30 local.
        let found = find_early_event(&events, day(2026, 2, 26), 9, CHICAGO).unwrap();
        assert_eq!(found.title, "Call");
        assert_eq!((found.hour, found.minute), (7, 30));

        // Tuesday 2026-03-03 has only the standup.
        let found = find_early_event(&events, day(2026, 3, 3), 9, CHICAGO).unwrap();
        assert_eq!(found.title, "Standup");
    }

    #[test]
    fn nothing_on_target_day() {
        let events = vec![vevent("Elsewhere", "DTSTART:20260227T060000")];
        assert_eq!(find_early_event(&events, day(2026, 2, 26), 9, CHICAGO), None);
        assert_eq!(find_early_event(&[], day(2026, 2, 26), 9, CHICAGO), None);
    }
}
