//! Timezone resolution and wall-clock conversion for iCalendar date-times.
//!
//! Every zone change goes through one primitive, [`to_local`], which maps an
//! instant to the wall clock of a zone. Zoned local values are first pinned to
//! an instant with [`local_to_utc`].

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use icu::time::zone::WindowsParser;
use icu::time::zone::iana::IanaParserExtended;
use std::collections::HashMap;
use std::str::FromStr;

use crate::error::{RfcError, RfcResult};

/// Resolver for timezone identifiers.
///
/// Maintains a cache of resolved timezones so a feed with hundreds of events
/// in the same zone only parses the identifier once.
#[derive(Debug, Default)]
pub struct TimeZoneResolver {
    /// Cache of resolved timezones by TZID.
    cache: HashMap<String, Tz>,
}

impl TimeZoneResolver {
    /// Creates a new timezone resolver.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    /// ## Summary
    /// Resolves a timezone identifier to a `chrono_tz::Tz`.
    ///
    /// The TZID is parsed as an IANA zone name after calendar-client spellings
    /// (Windows names, Mozilla prefixes, aliases) are normalised.
    ///
    /// ## Errors
    ///
    /// Returns `RfcError::UnknownTimezone` if the TZID cannot be resolved.
    ///
    /// ## Side Effects
    ///
    /// Caches successful resolutions to avoid repeated parsing.
    pub fn resolve(&mut self, tzid: &str) -> RfcResult<Tz> {
        if let Some(tz) = self.cache.get(tzid) {
            return Ok(*tz);
        }

        let normalized = normalize_tzid(tzid);
        let tz = Tz::from_str(&normalized)
            .map_err(|_e| RfcError::UnknownTimezone(tzid.to_string()))?;

        self.cache.insert(tzid.to_string(), tz);

        Ok(tz)
    }
}

/// Normalizes calendar-client timezone identifiers to canonical IANA names.
///
/// Mozilla-style prefixes and quotes are stripped. Windows zone names (as
/// Outlook and Exchange emit them) are mapped through ICU, and IANA aliases
/// are canonicalized. Unrecognized values are returned as written.
fn normalize_tzid(tzid: &str) -> String {
    let trimmed = tzid.trim().trim_matches('"');
    let stripped = trimmed
        .strip_prefix("/mozilla.org/20050126_1/")
        .or_else(|| trimmed.strip_prefix("/mozilla.org/"))
        .or_else(|| trimmed.strip_prefix("/softwarestudio.org/"))
        .unwrap_or(trimmed);

    let iana_parser = IanaParserExtended::new();

    if let Some(zone) = WindowsParser::new().parse(stripped, None)
        && let Some(entry) = iana_parser.iter().find(|entry| entry.time_zone == zone)
    {
        return entry.canonical.to_string();
    }

    let parsed = iana_parser.parse(stripped);
    if parsed.time_zone != icu::time::TimeZone::UNKNOWN {
        return parsed.canonical.to_string();
    }

    stripped.to_string()
}

/// Converts an instant to the wall-clock time of `tz`.
#[must_use]
pub fn to_local(instant: DateTime<Utc>, tz: Tz) -> NaiveDateTime {
    instant.with_timezone(&tz).naive_local()
}

/// ## Summary
/// Pins a wall-clock time in `tz` to an instant.
///
/// Ambiguous times (DST fold) take the earlier instant. Times that do not
/// exist (DST gap) are shifted forward by one hour.
///
/// ## Errors
///
/// Returns `RfcError::InvalidDate` if the shifted time still does not exist.
pub fn local_to_utc(local: NaiveDateTime, tz: Tz) -> RfcResult<DateTime<Utc>> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Ok(dt.with_timezone(&Utc)),
        LocalResult::None => {
            let shifted = local + TimeDelta::hours(1);
            tz.from_local_datetime(&shifted)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc))
                .ok_or_else(|| RfcError::InvalidDate(format!("{local} does not exist in {tz}")))
        }
    }
}

/// ## Summary
/// Converts a wall-clock time in one zone to the wall clock of another.
///
/// ## Errors
///
/// Propagates errors from [`local_to_utc`].
pub fn convert_between(local: NaiveDateTime, from: Tz, to: Tz) -> RfcResult<NaiveDateTime> {
    if from == to {
        return Ok(local);
    }
    Ok(to_local(local_to_utc(local, from)?, to))
}
