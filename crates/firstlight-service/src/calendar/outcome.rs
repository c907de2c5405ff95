//! Result shape returned to callers of the evaluator.

use serde::Serialize;

/// The earliest qualifying occurrence on the target day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EarlyEvent {
    pub title: String,
    /// 12-hour rendering of `hour`/`minute`, e.g. `7:05 AM`.
    pub time: String,
    pub hour: u32,
    pub minute: u32,
}

impl EarlyEvent {
    #[must_use]
    pub fn new(title: impl Into<String>, hour: u32, minute: u32) -> Self {
        Self {
            title: title.into(),
            time: format_time(hour, minute),
            hour,
            minute,
        }
    }
}

/// Why no event was returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    NoIcalUrl,
    FetchFailed,
    NoEarlyEvents,
    ParseError,
}

impl Reason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoIcalUrl => "no_ical_url",
            Self::FetchFailed => "fetch_failed",
            Self::NoEarlyEvents => "no_early_events",
            Self::ParseError => "parse_error",
        }
    }
}

impl std::fmt::Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ## Summary
/// Either an event, or no event with a reason tag.
///
/// Serialises as `{"event": {...}}` or `{"event": null, "reason": "..."}`.
/// `detail` carries diagnostics (HTTP status, error message) and is omitted
/// when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EarlyEventOutcome {
    pub event: Option<EarlyEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<Reason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl EarlyEventOutcome {
    #[must_use]
    pub const fn found(event: EarlyEvent) -> Self {
        Self {
            event: Some(event),
            reason: None,
            detail: None,
        }
    }

    #[must_use]
    pub const fn empty(reason: Reason) -> Self {
        Self {
            event: None,
            reason: Some(reason),
            detail: None,
        }
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// ## Summary
/// Renders a 24-hour time as `H:MM AM/PM`.
///
/// Hour 0 is `12 AM` and hour 12 is `12 PM`; minutes are zero-padded.
#[must_use]
pub fn format_time(hour: u32, minute: u32) -> String {
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{display_hour}:{minute:02} {suffix}")
}
