//! Field-level administrative corrections to the streak record.
//!
//! Every field is optional and checked on its own: a wrong type or an
//! unparseable date drops that field only. No cross-field rules are enforced.

use chrono::NaiveDate;
use serde_json::Value;

use super::calendar::DayBoundary;
use super::StreakRecord;

pub const CURRENT_STREAK: &str = "currentStreak";
pub const LONGEST_STREAK: &str = "longestStreak";
pub const MISSED_WORKOUTS: &str = "missedWorkouts";
pub const LAST_WORKOUT_DATE: &str = "lastWorkoutDate";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreakOverride {
    pub current_streak: Option<u32>,
    pub longest_streak: Option<u32>,
    pub missed_workouts: Option<u32>,
    pub last_workout_date: Option<NaiveDate>,
}

impl StreakOverride {
    /// Pick the usable fields out of a request body.
    ///
    /// Counters must be non-negative whole numbers (`10` or `10.0`) that fit in
    /// `u32`. The date must
    /// be a string [`DayBoundary::parse_date`] accepts. Anything else, including
    /// a body that is not an object, contributes nothing.
    pub fn from_json(body: &Value, boundary: &DayBoundary) -> Self {
        let counter = |name: &str| body.get(name).and_then(whole_count);

        Self {
            current_streak: counter(CURRENT_STREAK),
            longest_streak: counter(LONGEST_STREAK),
            missed_workouts: counter(MISSED_WORKOUTS),
            last_workout_date: body
                .get(LAST_WORKOUT_DATE)
                .and_then(Value::as_str)
                .and_then(|s| boundary.parse_date(s)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.applied_fields().is_empty()
    }

    /// Names of the fields this override sets, in wire form.
    pub fn applied_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.current_streak.is_some() {
            fields.push(CURRENT_STREAK);
        }
        if self.longest_streak.is_some() {
            fields.push(LONGEST_STREAK);
        }
        if self.missed_workouts.is_some() {
            fields.push(MISSED_WORKOUTS);
        }
        if self.last_workout_date.is_some() {
            fields.push(LAST_WORKOUT_DATE);
        }
        fields
    }

    /// Write the present fields into `record`; returns the names written.
    pub fn apply(&self, record: &mut StreakRecord) -> Vec<&'static str> {
        if let Some(v) = self.current_streak {
            record.current_streak = v;
        }
        if let Some(v) = self.longest_streak {
            record.longest_streak = v;
        }
        if let Some(v) = self.missed_workouts {
            record.missed_workouts = v;
        }
        if let Some(v) = self.last_workout_date {
            record.last_workout_date = Some(v);
        }
        self.applied_fields()
    }
}

/// A JSON number with no fractional part in `0..=u32::MAX`.
fn whole_count(value: &Value) -> Option<u32> {
    if let Some(n) = value.as_u64() {
        return u32::try_from(n).ok();
    }
    let n = value.as_f64()?;
    if n.is_finite() && n >= 0.0 && n.fract() == 0.0 && n <= f64::from(u32::MAX) {
        Some(n as u32)
    } else {
        None
    }
}
