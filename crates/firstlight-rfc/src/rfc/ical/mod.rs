//! iCalendar (RFC 5545) subset used to read calendar feeds.
//!
//! - `core`: Event, start and recurrence types
//! - `parse`: Line unfolding and `VEVENT` block extraction
//! - `expand`: Timezone resolution and per-day recurrence matching
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use firstlight_rfc::rfc::ical::{expand::{resolve_start, occurrence_on, TimeZoneResolver}, parse};
//!
//! let feed = "BEGIN:VEVENT\r\nSUMMARY:Gym\r\nDTSTART:20260302T063000\r\nRRULE:FREQ=DAILY\r\nEND:VEVENT\r\n";
//! let events = parse::parse_events(feed);
//!
//! let mut resolver = TimeZoneResolver::new();
//! let start = resolve_start(&events[0].dtstart_raw, chrono_tz::America::Chicago, &mut resolver);
//! let target = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
//!
//! let occurrence = occurrence_on(&events[0], &start, target).unwrap();
//! assert_eq!((occurrence.hour, occurrence.minute), (6, 30));
//! ```

pub mod core;
pub mod expand;
pub mod parse;

pub use core::{Occurrence, RecurrenceRule, ResolvedStart, VEvent};
pub use parse::{parse_events, unfold};
