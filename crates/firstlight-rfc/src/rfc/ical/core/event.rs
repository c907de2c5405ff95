//! Event records and their resolved start times.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::rfc::ical::parse::format_date;

/// Raw fields of one `VEVENT` block.
///
/// Values are kept as written in the feed; interpretation happens later so
/// a malformed field only ever affects its own event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VEvent {
    /// Unescaped `SUMMARY` text.
    pub summary: String,
    /// Entire `DTSTART` content line, parameters included.
    pub dtstart_raw: String,
    /// Entire `DTEND` content line, parameters included.
    pub dtend_raw: String,
    /// `RRULE` value, empty for non-recurring events.
    pub rrule_raw: String,
    /// `YYYYMMDD` date portions of every `EXDATE` value.
    pub exdates: BTreeSet<String>,
}

impl VEvent {
    #[must_use]
    pub fn is_recurring(&self) -> bool {
        !self.rrule_raw.trim().is_empty()
    }

    /// Returns `true` if `date` is listed in an `EXDATE`.
    #[must_use]
    pub fn is_excluded(&self, date: NaiveDate) -> bool {
        self.exdates.contains(&format_date(date))
    }
}

/// `DTSTART` expressed as wall-clock values in the target timezone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStart {
    /// Local calendar day; `None` when the value could not be read.
    pub date: Option<NaiveDate>,
    pub hour: u32,
    pub minute: u32,
    pub all_day: bool,
    /// Zone the value was written in (`UTC` for zulu values).
    pub source_tz: Option<String>,
}

impl ResolvedStart {
    /// Returns the local day as `YYYYMMDD`.
    #[must_use]
    pub fn date_string(&self) -> Option<String> {
        self.date.map(format_date)
    }
}

/// A single instance of an event on a day already known to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Occurrence {
    pub hour: u32,
    pub minute: u32,
}

impl Occurrence {
    /// Minutes since local midnight.
    #[must_use]
    pub const fn minutes_of_day(self) -> u32 {
        self.hour * 60 + self.minute
    }
}
