//! Streak transition rules.
//!
//! [`register_activity`] is pure: it takes the current record (if any) and the
//! calendar day of the registration and returns the next record. Persistence is
//! the caller's job. Recovery days and workouts go through the same rules.

use chrono::{DateTime, NaiveDate, Utc};

use super::calendar::{days_between, DayBoundary};
use super::StreakRecord;

/// Result of registering activity for a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityOutcome {
    pub record: StreakRecord,
    /// `true` when the record already covered `today`; counters were left alone.
    pub already_done_today: bool,
}

/// Compute the record after registering activity on `today`.
///
/// - no previous date: a new streak of 1 starts
/// - previous date is `today` (or later): nothing changes
/// - previous date is yesterday: the streak grows by one
/// - otherwise: every skipped day is a missed workout and the streak restarts at 1
///
/// `longest_streak` is raised to `current_streak` whenever it trails it. That
/// repair also runs on the same-day path: a record overridden to
/// `longest < current` comes back with `longest == current` even though
/// `already_done_today` is set. It is the one counter change that path makes.
pub fn register_activity(today: NaiveDate, record: Option<&StreakRecord>) -> ActivityOutcome {
    let mut next = record.copied().unwrap_or_default();

    let already_done_today = match next.last_workout_date {
        None => {
            next.current_streak = 1;
            false
        }
        Some(last) => {
            let gap = days_between(last, today);
            if gap <= 0 {
                true
            } else if gap == 1 {
                next.current_streak = next.current_streak.saturating_add(1);
                false
            } else {
                let skipped = u32::try_from(gap - 1).unwrap_or(u32::MAX);
                next.missed_workouts = next.missed_workouts.saturating_add(skipped);
                next.current_streak = 1;
                false
            }
        }
    };

    next.longest_streak = next.longest_streak.max(next.current_streak);
    if !already_done_today {
        next.last_workout_date = Some(today);
    }

    ActivityOutcome {
        record: next,
        already_done_today,
    }
}

/// [`register_activity`] for an instant, resolved to a day by `boundary`.
pub fn register_activity_at(
    now: DateTime<Utc>,
    boundary: &DayBoundary,
    record: Option<&StreakRecord>,
) -> ActivityOutcome {
    register_activity(boundary.day_of(now), record)
}
