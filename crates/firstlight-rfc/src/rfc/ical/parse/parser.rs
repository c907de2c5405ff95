//! `VEVENT` block extraction.
//!
//! The feed is read as a flat line stream with a two-state machine: outside
//! any event, or inside one with a single accumulator. Nothing here can fail;
//! lines that do not fit are skipped.

use super::lexer::{split_content_line, unfold};
use super::values::unescape_text;
use crate::rfc::ical::core::VEvent;

/// Parser state while walking the unfolded lines.
enum BlockState {
    Outside,
    Inside {
        event: VEvent,
        /// Depth of components nested in the event (e.g. `VALARM`). Their
        /// properties do not belong to the event.
        nested: usize,
    },
}

/// ## Summary
/// Parses every `VEVENT` block in a feed into a raw event record.
///
/// Events without a `DTSTART` are dropped. A nested `BEGIN:VEVENT` inside an
/// open event is ignored, and an event left open at the end of the input is
/// discarded.
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
#[must_use]
pub fn parse_events(input: &str) -> Vec<VEvent> {
    let lines = unfold(input);
    tracing::debug!(count = lines.len(), "Unfolded lines");

    let mut events = Vec::new();
    let mut state = BlockState::Outside;

    for line in &lines {
        state = match state {
            BlockState::Outside => {
                if is_marker(line, "BEGIN") {
                    BlockState::Inside {
                        event: VEvent::default(),
                        nested: 0,
                    }
                } else {
                    BlockState::Outside
                }
            }
            BlockState::Inside { event, nested } => {
                step_inside(line, event, nested, &mut events)
            }
        };
    }

    if let BlockState::Inside { .. } = state {
        tracing::warn!("Feed ended inside an unterminated VEVENT");
    }

    tracing::debug!(count = events.len(), "Parsed events");
    events
}

fn step_inside(
    line: &str,
    mut event: VEvent,
    nested: usize,
    events: &mut Vec<VEvent>,
) -> BlockState {
    if is_marker(line, "BEGIN") {
        return BlockState::Inside { event, nested };
    }
    if is_marker(line, "END") {
        if event.dtstart_raw.is_empty() {
            tracing::trace!(summary = %event.summary, "Discarding VEVENT without DTSTART");
        } else {
            events.push(event);
        }
        return BlockState::Outside;
    }

    let Some(cl) = split_content_line(line) else {
        return BlockState::Inside { event, nested };
    };

    if cl.is("BEGIN") {
        return BlockState::Inside {
            event,
            nested: nested + 1,
        };
    }
    if cl.is("END") {
        return BlockState::Inside {
            event,
            nested: nested.saturating_sub(1),
        };
    }
    if nested > 0 {
        return BlockState::Inside { event, nested };
    }

    if cl.is("SUMMARY") {
        event.summary = unescape_text(cl.value);
    } else if cl.is("DTSTART") {
        event.dtstart_raw = line.to_string();
    } else if cl.is("DTEND") {
        event.dtend_raw = line.to_string();
    } else if cl.is("RRULE") {
        event.rrule_raw = cl.value.to_string();
    } else if cl.is("EXDATE") {
        // Only the text after the final colon holds dates.
        let values = line.rsplit(':').next().unwrap_or_default();
        event.exdates.extend(
            values
                .split(',')
                .map(str::trim)
                .filter_map(|token| token.get(..8))
                .map(str::to_string),
        );
    } else {
        // Other properties are not needed.
    }

    BlockState::Inside { event, nested }
}

/// Matches `BEGIN:VEVENT` / `END:VEVENT`, ignoring case and surrounding space.
fn is_marker(line: &str, kind: &str) -> bool {
    line.trim()
        .split_once(':')
        .is_some_and(|(name, value)| {
            name.eq_ignore_ascii_case(kind) && value.eq_ignore_ascii_case("VEVENT")
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_EVENTS: &str = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Test//Test//EN\r\n\
BEGIN:VEVENT\r\n\
UID:flight@example.com\r\n\
SUMMARY:Flight\r\n\
DTSTART:20260225T063000Z\r\n\
DTEND:20260225T090000Z\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:standup@example.com\r\n\
SUMMARY:Standup\r\n\
DTSTART;TZID=America/Chicago:20260101T080000\r\n\
DTEND;TZID=America/Chicago:20260101T081500\r\n\
RRULE:FREQ=WEEKLY;BYDAY=TU\r\n\
EXDATE;TZID=America/Chicago:20260106T080000,20260113T080000\r\n\
EXDATE:20260120\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

    #[test_log::test]
    fn parse_two_events() {
        let events = parse_events(TWO_EVENTS);
        assert_eq!(events.len(), 2);

        let flight = &events[0];
        assert_eq!(flight.summary, "Flight");
        assert_eq!(flight.dtstart_raw, "DTSTART:20260225T063000Z");
        assert_eq!(flight.dtend_raw, "DTEND:20260225T090000Z");
        assert!(!flight.is_recurring());
        assert!(flight.exdates.is_empty());

        let standup = &events[1];
        assert_eq!(standup.summary, "Standup");
        assert_eq!(
            standup.dtstart_raw,
            "DTSTART;TZID=America/Chicago:20260101T080000"
        );
        assert_eq!(standup.rrule_raw, "FREQ=WEEKLY;BYDAY=TU");
        let exdates: Vec<&str> = standup.exdates.iter().map(String::as_str).collect();
        assert_eq!(exdates, vec!["20260106", "20260113", "20260120"]);
    }

    #[test]
    fn event_without_dtstart_is_discarded() {
        let input = "BEGIN:VEVENT\nSUMMARY:No start\nEND:VEVENT\nBEGIN:VEVENT\nSUMMARY:Ok\nDTSTART:20260101\nEND:VEVENT\n";
        let events = parse_events(input);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].summary, "Ok");
    }

    #[test]
    fn lines_outside_events_are_ignored() {
        let input = "SUMMARY:Stray\nDTSTART:20260101\nBEGIN:VTODO\nDTSTART:20260102\nEND:VTODO\n";
        assert!(parse_events(input).is_empty());
    }

    #[test]
    fn no_events_in_empty_or_garbage_feed() {
        assert!(parse_events("").is_empty());
        assert!(parse_events("<html><body>Not found</body></html>").is_empty());
    }

    #[test]
    fn nested_begin_vevent_is_ignored() {
        let input = "BEGIN:VEVENT\nSUMMARY:Outer\nBEGIN:VEVENT\nDTSTART:20260101\nEND:VEVENT\nSUMMARY:After\nEND:VEVENT\n";
        let events = parse_events(input);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].summary, "Outer");
    }

    #[test]
    fn alarm_properties_do_not_leak_into_event() {
        let input = "\
BEGIN:VEVENT\r\n\
SUMMARY:Dentist\r\n\
DTSTART:20260301T080000\r\n\
BEGIN:VALARM\r\n\
ACTION:EMAIL\r\n\
SUMMARY:Reminder mail\r\n\
TRIGGER:-PT30M\r\n\
END:VALARM\r\n\
END:VEVENT\r\n";
        let events = parse_events(input);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].summary, "Dentist");
    }

    #[test]
    fn unterminated_event_is_dropped() {
        let input = "BEGIN:VEVENT\nSUMMARY:Open\nDTSTART:20260101\n";
        assert!(parse_events(input).is_empty());
    }

    #[test]
    fn folded_and_escaped_summary() {
        let input = "BEGIN:VEVENT\r\nSUMMARY:Breakfast\\, then\r\n  school run\r\nDTSTART;VALUE=DATE:20260101\r\nEND:VEVENT\r\n";
        let events = parse_events(input);
        assert_eq!(events[0].summary, "Breakfast, then school run");
        assert_eq!(events[0].dtstart_raw, "DTSTART;VALUE=DATE:20260101");
    }

    #[test]
    fn lowercase_markers_and_names() {
        let input = "begin:vevent\nsummary:Quiet\ndtstart:20260101T050000\nend:vevent\n";
        let events = parse_events(input);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].summary, "Quiet");
    }
}
