//! iCalendar RRULE (Recurrence Rule) value type (RFC 5545 §3.3.10, §3.8.5.3).
//!
//! Only the rule parts needed to decide whether a rule lands on a given day
//! are modelled: `FREQ`, `INTERVAL`, `UNTIL`, `COUNT`, `BYDAY` and `WKST`.

use std::fmt;

use chrono::NaiveDate;

use crate::error::{RfcError, RfcResult};
use crate::rfc::ical::parse::parse_date;

/// Recurrence frequency (RFC 5545 §3.3.10).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    Secondly,
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Secondly => "SECONDLY",
            Self::Minutely => "MINUTELY",
            Self::Hourly => "HOURLY",
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
            Self::Yearly => "YEARLY",
        }
    }

    /// Parses a frequency from a string (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.to_ascii_uppercase().as_str() {
            "SECONDLY" => Self::Secondly,
            "MINUTELY" => Self::Minutely,
            "HOURLY" => Self::Hourly,
            "DAILY" => Self::Daily,
            "WEEKLY" => Self::Weekly,
            "MONTHLY" => Self::Monthly,
            "YEARLY" => Self::Yearly,
            _ => return None,
        })
    }

    /// Day-granular frequencies are the only ones a per-day match can answer.
    #[must_use]
    pub const fn is_day_granular(self) -> bool {
        matches!(
            self,
            Self::Daily | Self::Weekly | Self::Monthly | Self::Yearly
        )
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// Returns the two-letter abbreviation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sunday => "SU",
            Self::Monday => "MO",
            Self::Tuesday => "TU",
            Self::Wednesday => "WE",
            Self::Thursday => "TH",
            Self::Friday => "FR",
            Self::Saturday => "SA",
        }
    }

    /// Parses a weekday from a two-letter abbreviation (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.to_ascii_uppercase().as_str() {
            "SU" => Self::Sunday,
            "MO" => Self::Monday,
            "TU" => Self::Tuesday,
            "WE" => Self::Wednesday,
            "TH" => Self::Thursday,
            "FR" => Self::Friday,
            "SA" => Self::Saturday,
            _ => return None,
        })
    }

    #[must_use]
    pub const fn to_chrono(self) -> chrono::Weekday {
        match self {
            Self::Sunday => chrono::Weekday::Sun,
            Self::Monday => chrono::Weekday::Mon,
            Self::Tuesday => chrono::Weekday::Tue,
            Self::Wednesday => chrono::Weekday::Wed,
            Self::Thursday => chrono::Weekday::Thu,
            Self::Friday => chrono::Weekday::Fri,
            Self::Saturday => chrono::Weekday::Sat,
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Sun => Self::Sunday,
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A parsed recurrence rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceRule {
    pub freq: Frequency,
    /// Step between active periods; always at least 1.
    pub interval: u32,
    /// Last day (inclusive) on which the rule may produce an occurrence.
    pub until: Option<NaiveDate>,
    pub count: Option<u32>,
    /// Plain `BYDAY` weekdays, sorted Sunday first and deduplicated. `None`
    /// when the part is absent; an empty list means it was present but held
    /// only unsupported entries.
    pub by_day: Option<Vec<Weekday>>,
    /// Week start for interval-week counting, `MO` unless `WKST` says otherwise.
    pub week_start: Weekday,
}

impl RecurrenceRule {
    /// ## Summary
    /// Parses an `RRULE` value such as `FREQ=WEEKLY;INTERVAL=2;BYDAY=MO,WE`.
    ///
    /// Part names are case-insensitive and unknown parts are ignored. A
    /// missing or non-numeric `INTERVAL` (or zero) becomes 1. `BYDAY` entries
    /// with an ordinal prefix (`1MO`, `-1FR`) are not supported and dropped.
    ///
    /// ## Errors
    /// - `RfcError::InvalidRule` if `FREQ` is missing, or `UNTIL` / `COUNT`
    ///   cannot be read.
    /// - `RfcError::UnsupportedRule` for frequencies finer than a day or
    ///   unknown frequency names.
    pub fn parse(raw: &str) -> RfcResult<Self> {
        let mut freq = None;
        let mut interval = 1;
        let mut until = None;
        let mut count = None;
        let mut by_day = None;
        let mut week_start = Weekday::Monday;

        for part in raw.trim().split(';').filter(|part| !part.is_empty()) {
            let Some((key, value)) = part.split_once('=') else {
                tracing::trace!(part, "Ignoring RRULE part without value");
                continue;
            };
            let value = value.trim();

            match key.trim().to_ascii_uppercase().as_str() {
                "FREQ" => {
                    freq = Some(Frequency::parse(value).ok_or_else(|| {
                        RfcError::UnsupportedRule(format!("unknown FREQ '{value}'"))
                    })?);
                }
                "INTERVAL" => {
                    interval = value.parse::<u32>().ok().filter(|n| *n > 0).unwrap_or(1);
                }
                "UNTIL" => {
                    until = Some(parse_date(value).ok_or_else(|| {
                        RfcError::InvalidRule(format!("unreadable UNTIL '{value}'"))
                    })?);
                }
                "COUNT" => {
                    count = Some(value.parse::<u32>().map_err(|_err| {
                        RfcError::InvalidRule(format!("unreadable COUNT '{value}'"))
                    })?);
                }
                "BYDAY" => {
                    let mut days: Vec<Weekday> = value
                        .split(',')
                        .filter_map(|code| Weekday::parse(code.trim()))
                        .collect();
                    days.sort_unstable();
                    days.dedup();
                    by_day = Some(days);
                }
                "WKST" => {
                    if let Some(day) = Weekday::parse(value) {
                        week_start = day;
                    }
                }
                _ => {}
            }
        }

        let freq = freq.ok_or_else(|| RfcError::InvalidRule("missing FREQ".to_string()))?;
        if !freq.is_day_granular() {
            return Err(RfcError::UnsupportedRule(format!("FREQ={freq}")));
        }

        Ok(Self {
            freq,
            interval,
            until,
            count,
            by_day,
            week_start,
        })
    }
}
