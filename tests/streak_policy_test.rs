mod helpers;

use chrono::{Duration, TimeZone, Utc};
use helpers::{date, test_db};
use serde_json::json;
use stride::streak::calendar::DayBoundary;
use stride::streak::overrides::StreakOverride;
use stride::streak::policy::{register_activity, register_activity_at};
use stride::streak::store::{apply_override, load_streak, record_activity};
use stride::streak::{StreakRecord, DEFAULT_RECORD_KEY};

const KEY: &str = DEFAULT_RECORD_KEY;

fn seed(conn: &mut rusqlite::Connection, body: serde_json::Value) {
    let overrides = StreakOverride::from_json(&body, &DayBoundary::utc());
    apply_override(conn, KEY, &overrides).unwrap();
}

#[test]
fn longest_never_trails_current_over_a_training_block() {
    // Train on most days, skip a few, repeat some.
    let offsets = [0, 1, 2, 2, 3, 6, 7, 8, 9, 10, 10, 15, 16];
    let start = date(2024, 2, 1);
    let mut record: Option<StreakRecord> = None;
    let mut previous_longest = 0;

    for offset in offsets {
        let out = register_activity(start + Duration::days(offset), record.as_ref());
        assert!(out.record.longest_streak >= out.record.current_streak);
        assert!(out.record.longest_streak >= previous_longest);
        previous_longest = out.record.longest_streak;
        record = Some(out.record);
    }

    let record = record.unwrap();
    assert_eq!(record.current_streak, 2);
    assert_eq!(record.longest_streak, 5);
    // Gaps 3->6 (2 days) and 10->15 (4 days)
    assert_eq!(record.missed_workouts, 6);
}

#[test]
fn same_day_registration_is_idempotent() {
    let mut conn = test_db();
    let day = date(2024, 1, 10);

    let first = record_activity(&mut conn, KEY, day).unwrap();
    let second = record_activity(&mut conn, KEY, day).unwrap();

    assert!(!first.already_done_today);
    assert!(second.already_done_today);
    assert_eq!(first.record, second.record);
    assert_eq!(load_streak(&conn, KEY).unwrap(), Some(first.record));
}

#[test]
fn override_then_next_day_extends() {
    let mut conn = test_db();
    seed(
        &mut conn,
        json!({"currentStreak": 5, "longestStreak": 7, "missedWorkouts": 2, "lastWorkoutDate": "2024-01-10"}),
    );

    let out = record_activity(&mut conn, KEY, date(2024, 1, 11)).unwrap();
    assert_eq!(
        out.record,
        StreakRecord {
            current_streak: 6,
            longest_streak: 7,
            missed_workouts: 2,
            last_workout_date: Some(date(2024, 1, 11)),
        }
    );
}

#[test]
fn override_then_gap_resets_and_counts_missed() {
    let mut conn = test_db();
    seed(
        &mut conn,
        json!({"currentStreak": 5, "longestStreak": 7, "missedWorkouts": 2, "lastWorkoutDate": "2024-01-10"}),
    );

    let out = record_activity(&mut conn, KEY, date(2024, 1, 14)).unwrap();
    assert_eq!(out.record.current_streak, 1);
    assert_eq!(out.record.longest_streak, 7);
    assert_eq!(out.record.missed_workouts, 5);
    assert_eq!(out.record.last_workout_date, Some(date(2024, 1, 14)));
}

#[test]
fn override_can_clear_nothing_but_what_it_names() {
    let mut conn = test_db();
    seed(
        &mut conn,
        json!({"currentStreak": 3, "longestStreak": 9, "missedWorkouts": 1, "lastWorkoutDate": "2024-04-01"}),
    );
    seed(&mut conn, json!({"missedWorkouts": 0}));

    let record = load_streak(&conn, KEY).unwrap().unwrap();
    assert_eq!(record.current_streak, 3);
    assert_eq!(record.longest_streak, 9);
    assert_eq!(record.missed_workouts, 0);
    assert_eq!(record.last_workout_date, Some(date(2024, 4, 1)));
}

#[test]
fn first_activity_after_counter_only_override_starts_fresh() {
    let mut conn = test_db();
    seed(&mut conn, json!({"currentStreak": 10}));

    let out = record_activity(&mut conn, KEY, date(2024, 6, 1)).unwrap();
    assert_eq!(out.record.current_streak, 1);
    assert_eq!(out.record.longest_streak, 1);
    assert!(!out.already_done_today);
}

#[test]
fn day_boundary_decides_which_day_counts() {
    // 23:30 UTC on Jan 10 is already Jan 11 two hours east.
    let now = Utc.with_ymd_and_hms(2024, 1, 10, 23, 30, 0).unwrap();
    let record = StreakRecord {
        current_streak: 4,
        longest_streak: 4,
        missed_workouts: 0,
        last_workout_date: Some(date(2024, 1, 10)),
    };

    let utc = register_activity_at(now, &DayBoundary::utc(), Some(&record));
    assert!(utc.already_done_today);
    assert_eq!(utc.record.current_streak, 4);

    let east = DayBoundary::from_offset_minutes(120).unwrap();
    let shifted = register_activity_at(now, &east, Some(&record));
    assert!(!shifted.already_done_today);
    assert_eq!(shifted.record.current_streak, 5);
    assert_eq!(shifted.record.last_workout_date, Some(date(2024, 1, 11)));
}

#[test]
fn separate_keys_do_not_share_state() {
    let mut conn = test_db();
    record_activity(&mut conn, "alice", date(2024, 1, 1)).unwrap();
    record_activity(&mut conn, "alice", date(2024, 1, 2)).unwrap();
    record_activity(&mut conn, "bob", date(2024, 1, 2)).unwrap();

    assert_eq!(load_streak(&conn, "alice").unwrap().unwrap().current_streak, 2);
    assert_eq!(load_streak(&conn, "bob").unwrap().unwrap().current_streak, 1);
}
