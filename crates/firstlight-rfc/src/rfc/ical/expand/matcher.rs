//! Per-day recurrence matching.
//!
//! Rather than expanding a rule into its full occurrence set, each supported
//! frequency is answered arithmetically for one target day. A rule can land
//! on a given day at most once, so the answer is zero or one occurrence.

use chrono::{Datelike, NaiveDate, TimeDelta};

use crate::rfc::ical::core::{
    Frequency, Occurrence, RecurrenceRule, ResolvedStart, VEvent, Weekday,
};

/// ## Summary
/// Decides whether `event` occurs on `target`, a day in the same timezone
/// its start was resolved into.
///
/// Non-recurring events occur only on their start day. Recurring events
/// occur on days their rule selects, never before the start. A day listed in
/// `EXDATE` never has an occurrence. Rules that cannot be read or use an
/// unsupported frequency never match.
///
/// Occurrences keep the start's time of day (midnight for all-day events).
#[must_use]
pub fn occurrence_on(
    event: &VEvent,
    start: &ResolvedStart,
    target: NaiveDate,
) -> Option<Occurrence> {
    let start_date = start.date?;

    if event.is_excluded(target) {
        tracing::trace!(summary = %event.summary, %target, "Excluded by EXDATE");
        return None;
    }

    let matched = if event.is_recurring() {
        match RecurrenceRule::parse(&event.rrule_raw) {
            Ok(rule) => rule_matches(&rule, start_date, target),
            Err(err) => {
                tracing::trace!(
                    summary = %event.summary,
                    error = %err,
                    "Skipping recurrence rule"
                );
                false
            }
        }
    } else {
        start_date == target
    };

    matched.then_some(Occurrence {
        hour: start.hour,
        minute: start.minute,
    })
}

/// ## Summary
/// Checks whether `rule`, anchored at `start`, selects `target`.
///
/// `COUNT` is checked against an ordinal estimated with the same interval
/// arithmetic as the frequency (`days / INTERVAL + 1` for `DAILY`). The
/// estimate is approximate for `WEEKLY` with `BYDAY`: it counts every listed
/// weekday of each active week, including days of the first week that fall
/// before the start, so such a series may end a few occurrences earlier than
/// strict RFC 5545 expansion would.
#[must_use]
pub fn rule_matches(rule: &RecurrenceRule, start: NaiveDate, target: NaiveDate) -> bool {
    let days_diff = (target - start).num_days();
    if days_diff < 0 {
        return false;
    }
    if rule.until.is_some_and(|until| target > until) {
        return false;
    }

    let interval = i64::from(rule.interval);
    let ordinal = match rule.freq {
        Frequency::Daily => (days_diff % interval == 0).then(|| days_diff / interval + 1),
        Frequency::Weekly => weekly_ordinal(rule, start, target, days_diff),
        Frequency::Monthly => {
            let years = i64::from(target.year() - start.year());
            let months = years * 12 + i64::from(target.month()) - i64::from(start.month());
            (target.day() == start.day() && months % interval == 0)
                .then(|| months / interval + 1)
        }
        Frequency::Yearly => {
            let years = i64::from(target.year() - start.year());
            (target.month() == start.month()
                && target.day() == start.day()
                && years % interval == 0)
                .then(|| years / interval + 1)
        }
        Frequency::Secondly | Frequency::Minutely | Frequency::Hourly => None,
    };

    match (ordinal, rule.count) {
        (None, _) => false,
        (Some(_), None) => true,
        (Some(ordinal), Some(count)) => ordinal <= i64::from(count),
    }
}

fn weekly_ordinal(
    rule: &RecurrenceRule,
    start: NaiveDate,
    target: NaiveDate,
    days_diff: i64,
) -> Option<i64> {
    let interval = i64::from(rule.interval);

    let Some(by_day) = &rule.by_day else {
        let period = interval * 7;
        return (target.weekday() == start.weekday() && days_diff % period == 0)
            .then(|| days_diff / period + 1);
    };

    let weekday = Weekday::from(target.weekday());
    if !by_day.contains(&weekday) {
        return None;
    }

    let weeks = (week_start(target, rule.week_start) - week_start(start, rule.week_start))
        .num_days()
        / 7;
    if weeks % interval != 0 {
        return None;
    }

    let position = days_into_week(weekday, rule.week_start);
    let earlier_in_week = by_day
        .iter()
        .filter(|day| days_into_week(**day, rule.week_start) < position)
        .count();
    let per_week = i64::try_from(by_day.len()).ok()?;
    let earlier_in_week = i64::try_from(earlier_in_week).ok()?;

    Some(weeks / interval * per_week + earlier_in_week + 1)
}

/// First day of the week containing `date`.
fn week_start(date: NaiveDate, first_day: Weekday) -> NaiveDate {
    let offset = days_into_week(Weekday::from(date.weekday()), first_day);
    date - TimeDelta::days(i64::from(offset))
}

/// Position of `day` in a week beginning on `first_day` (0 to 6).
fn days_into_week(day: Weekday, first_day: Weekday) -> u32 {
    let day = day.to_chrono().num_days_from_sunday();
    let first = first_day.to_chrono().num_days_from_sunday();
    (day + 7 - first) % 7
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
