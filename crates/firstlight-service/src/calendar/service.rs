//! End-to-end early-event evaluation.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use firstlight_core::config::CalendarConfig;
use firstlight_core::constants::EARLY_CUTOFF_HOUR;
use firstlight_rfc::rfc::ical::parse_events;

use super::fetch::FeedFetcher;
use super::outcome::{EarlyEvent, EarlyEventOutcome, Reason};
use super::select::find_early_event;
use crate::error::ServiceResult;

/// ## Summary
/// Looks up the earliest event on `target` starting before the early cutoff.
///
/// Every failure is recovered here and reported as an empty outcome with a
/// reason tag:
/// - no feed URL configured: `no_ical_url`, the fetcher is not called
/// - the fetch fails or the server answers non-2xx: `fetch_failed`
/// - the feed cannot be evaluated (including an unknown configured
///   timezone): `parse_error`
/// - nothing qualifies: `no_early_events`
#[tracing::instrument(skip(config, fetcher), fields(%target))]
pub async fn evaluate<F: FeedFetcher>(
    config: &CalendarConfig,
    fetcher: &F,
    target: NaiveDate,
) -> EarlyEventOutcome {
    let Some(url) = config.ical_url() else {
        tracing::debug!("No calendar feed configured");
        return EarlyEventOutcome::empty(Reason::NoIcalUrl);
    };

    let feed = match fetcher.fetch(url).await {
        Ok(feed) => feed,
        Err(err) => {
            tracing::warn!(status = ?err.status(), error = %err, "Calendar fetch failed");
            return EarlyEventOutcome::empty(Reason::FetchFailed).with_detail(err.to_string());
        }
    };

    match select_from_feed(config, &feed, target) {
        Ok(Some(event)) => {
            tracing::info!(title = %event.title, time = %event.time, "Early event found");
            EarlyEventOutcome::found(event)
        }
        Ok(None) => EarlyEventOutcome::empty(Reason::NoEarlyEvents),
        Err(err) => {
            tracing::warn!(error = %err, "Calendar evaluation failed");
            EarlyEventOutcome::empty(Reason::ParseError).with_detail(err.to_string())
        }
    }
}

fn select_from_feed(
    config: &CalendarConfig,
    feed: &str,
    target: NaiveDate,
) -> ServiceResult<Option<EarlyEvent>> {
    let tz = config.timezone()?;
    let events = parse_events(feed);
    tracing::debug!(events = events.len(), %tz, "Parsed feed");

    Ok(find_early_event(&events, target, EARLY_CUTOFF_HOUR, tz))
}

/// ## Summary
/// The calendar day after `now` as seen from `tz`.
#[must_use]
pub fn day_after(now: DateTime<Utc>, tz: chrono_tz::Tz) -> NaiveDate {
    let today = now.with_timezone(&tz).date_naive();
    today
        .checked_add_signed(TimeDelta::days(1))
        .unwrap_or(today)
}
