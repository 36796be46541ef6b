//! Persistence for the streak record.
//!
//! Each mutation is a read-modify-write inside one `IMMEDIATE` transaction, so
//! two writers racing on the same key cannot lose an update.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};

use super::calendar::{format_date, parse_stored_date, DayBoundary};
use super::overrides::StreakOverride;
use super::policy::{self, ActivityOutcome};
use super::StreakRecord;

/// Load the record stored under `key`, if it has been created.
pub fn load_streak(conn: &Connection, key: &str) -> Result<Option<StreakRecord>> {
    let row: Option<(u32, u32, u32, Option<String>)> = conn
        .query_row(
            "SELECT current_streak, longest_streak, missed_workouts, last_workout_date \
             FROM streaks WHERE key = ?1",
            params![key],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
        )
        .optional()
        .context("failed to read streak record")?;

    Ok(row.map(|(current, longest, missed, last)| StreakRecord {
        current_streak: current,
        longest_streak: longest,
        missed_workouts: missed,
        last_workout_date: last.as_deref().and_then(|value| {
            let parsed = parse_stored_date(value);
            if parsed.is_none() {
                tracing::warn!(key, value, "unreadable last_workout_date, treating as unset");
            }
            parsed
        }),
    }))
}

/// Insert or replace the record under `key`.
fn save_streak(conn: &Connection, key: &str, record: &StreakRecord) -> Result<()> {
    let now = chrono::Utc::now().to_rfc3339();
    let last = record.last_workout_date.map(format_date);
    conn.execute(
        "INSERT INTO streaks (key, current_streak, longest_streak, missed_workouts, last_workout_date, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6) \
         ON CONFLICT(key) DO UPDATE SET \
            current_streak = excluded.current_streak, \
            longest_streak = excluded.longest_streak, \
            missed_workouts = excluded.missed_workouts, \
            last_workout_date = excluded.last_workout_date, \
            updated_at = excluded.updated_at",
        params![
            key,
            record.current_streak,
            record.longest_streak,
            record.missed_workouts,
            last,
            now,
        ],
    )
    .context("failed to write streak record")?;
    Ok(())
}

/// Register activity for `today` and persist the result.
///
/// Creates the record on first use. A repeat registration on the same day is
/// reported through [`ActivityOutcome::already_done_today`] and leaves the
/// counters unchanged.
pub fn record_activity(conn: &mut Connection, key: &str, today: NaiveDate) -> Result<ActivityOutcome> {
    record_with(conn, key, |current| policy::register_activity(today, current))
}

/// [`record_activity`] for the day `now` falls on under `boundary`.
pub fn record_activity_at(
    conn: &mut Connection,
    key: &str,
    now: DateTime<Utc>,
    boundary: &DayBoundary,
) -> Result<ActivityOutcome> {
    record_with(conn, key, |current| policy::register_activity_at(now, boundary, current))
}

fn record_with<F>(conn: &mut Connection, key: &str, transition: F) -> Result<ActivityOutcome>
where
    F: FnOnce(Option<&StreakRecord>) -> ActivityOutcome,
{
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .context("failed to begin streak transaction")?;

    let current = load_streak(&tx, key)?;
    let outcome = transition(current.as_ref());

    if current.as_ref() != Some(&outcome.record) {
        save_streak(&tx, key, &outcome.record)?;
    }

    tx.commit().context("failed to commit streak update")?;

    tracing::debug!(
        key,
        current_streak = outcome.record.current_streak,
        longest_streak = outcome.record.longest_streak,
        missed_workouts = outcome.record.missed_workouts,
        already_done_today = outcome.already_done_today,
        "activity recorded"
    );

    Ok(outcome)
}

/// Apply an administrative override, creating the record with defaults first if
/// it does not exist. Returns the names of the fields that were written.
pub fn apply_override(
    conn: &mut Connection,
    key: &str,
    overrides: &StreakOverride,
) -> Result<Vec<&'static str>> {
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .context("failed to begin override transaction")?;

    let mut record = load_streak(&tx, key)?.unwrap_or_default();
    let applied = overrides.apply(&mut record);
    save_streak(&tx, key, &record)?;

    tx.commit().context("failed to commit streak override")?;
    Ok(applied)
}
