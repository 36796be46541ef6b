//! Workout streak bookkeeping.
//!
//! A single [`StreakRecord`] per user is loaded, run through the pure
//! [`policy`] transition, and written back by [`store`]. Administrative
//! corrections bypass the policy through [`overrides`].

pub mod calendar;
pub mod overrides;
pub mod policy;
pub mod store;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Key of the singleton streak row in a single-user deployment.
pub const DEFAULT_RECORD_KEY: &str = "local";

/// Persisted streak state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakRecord {
    /// Consecutive calendar days with registered activity, ending at `last_workout_date`.
    pub current_streak: u32,
    /// Highest `current_streak` ever reached.
    pub longest_streak: u32,
    /// Days skipped between registrations, summed over every broken streak.
    pub missed_workouts: u32,
    /// Calendar day of the most recent registration.
    pub last_workout_date: Option<NaiveDate>,
}
