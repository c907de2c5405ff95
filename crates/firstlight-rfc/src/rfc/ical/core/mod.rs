//! Types for events read from a calendar feed.

mod event;
mod rrule;

pub use event::{Occurrence, ResolvedStart, VEvent};
pub use rrule::{Frequency, RecurrenceRule, Weekday};
