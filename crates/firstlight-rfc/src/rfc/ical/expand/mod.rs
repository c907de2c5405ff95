//! Start-time resolution and recurrence matching for parsed events.
//!
//! This module answers "does this event occur on that day, and when" without
//! expanding recurrence rules into full occurrence sets.

mod matcher;
mod start;
mod timezone;

pub use matcher::{occurrence_on, rule_matches};
pub use start::resolve_start;
pub use timezone::{TimeZoneResolver, convert_between, local_to_utc, to_local};
