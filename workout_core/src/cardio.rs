//! Cardio adherence tracking.
//!
//! Three indicators derived from a cardio session history and a reference
//! date, all pure and safe to recompute on every read:
//! - rolling zone-2 minutes (trailing 7 days, interval sessions excluded)
//! - the next due date for the weekly 4x4 interval session
//! - how many weekly interval slots were missed in the trailing 12 weeks
//!
//! The interval cadence anchors to Sundays. Adherence is computed relative
//! to the last completed occurrence, not to "today", so a long gap does not
//! fast-forward the due date past the skipped weeks.

use crate::CardioSession;
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::HashSet;

/// Days covered by the rolling zone-2 window, inclusive of both ends
const ZONE2_WINDOW_DAYS: i64 = 7;

/// Length of the missed-interval lookback, in anchored weeks
const INTERVAL_LOOKBACK_WEEKS: u32 = 12;

/// Adherence snapshot for one user at one reference date
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardioAdherence {
    pub zone2_minutes: u32,
    pub next_interval_due: NaiveDate,
    pub missed_intervals: u32,
}

/// The anchor weekday (Sunday) on or after the given date, inclusive
fn sunday_on_or_after(date: NaiveDate) -> NaiveDate {
    let days_past_sunday = date.weekday().num_days_from_sunday() as i64;
    date + Duration::days((7 - days_past_sunday) % 7)
}

/// The Sunday starting the anchored week containing the given date
fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

/// Minutes of non-interval cardio in the trailing 7 days, inclusive.
///
/// Interval sessions never count here regardless of duration.
pub fn rolling_zone2_minutes(now: NaiveDate, history: &[CardioSession]) -> u32 {
    let cutoff = now - Duration::days(ZONE2_WINDOW_DAYS);
    history
        .iter()
        .filter(|s| !s.is_interval && s.date >= cutoff && s.date <= now)
        .map(|s| s.duration_minutes)
        .sum()
}

/// Next due date for the weekly interval session.
///
/// With no interval history the schedule starts at the next Sunday from
/// `now` (today, if `now` is a Sunday). Otherwise the due date is the
/// anchor Sunday on-or-after the last completed interval session, plus one
/// week.
pub fn next_interval_due(now: NaiveDate, history: &[CardioSession]) -> NaiveDate {
    let last_interval = history
        .iter()
        .filter(|s| s.is_interval)
        .map(|s| s.date)
        .max();

    match last_interval {
        Some(last) => sunday_on_or_after(last) + Duration::days(7),
        None => sunday_on_or_after(now),
    }
}

/// Weekly interval slots with no session in the trailing 12 anchored weeks.
///
/// The 84 days ending at `now` partition into Sunday-anchored 7-day
/// buckets; the result is 12 minus the number of distinct buckets holding
/// at least one interval session, floored at 0.
pub fn missed_interval_count(now: NaiveDate, history: &[CardioSession]) -> u32 {
    let cutoff = now - Duration::days(7 * INTERVAL_LOOKBACK_WEEKS as i64);

    let weeks_hit: HashSet<NaiveDate> = history
        .iter()
        .filter(|s| s.is_interval && s.date >= cutoff && s.date <= now)
        .map(|s| week_start(s.date))
        .collect();

    INTERVAL_LOOKBACK_WEEKS.saturating_sub(weeks_hit.len() as u32)
}

/// Compute all three adherence indicators at once
pub fn cardio_adherence(now: NaiveDate, history: &[CardioSession]) -> CardioAdherence {
    let adherence = CardioAdherence {
        zone2_minutes: rolling_zone2_minutes(now, history),
        next_interval_due: next_interval_due(now, history),
        missed_intervals: missed_interval_count(now, history),
    };

    tracing::debug!(
        "Cardio adherence at {}: {} zone-2 min, next 4x4 {}, {} missed",
        now,
        adherence.zone2_minutes,
        adherence.next_interval_due,
        adherence.missed_intervals
    );

    adherence
}
