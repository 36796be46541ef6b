mod helpers;

use helpers::test_db;
use stride::memory::clear::clear_memories;
use stride::memory::store::{list_memories, memory_count, store_memory};
use stride::memory::types::MemoryKind;
use stride::streak::store::{load_streak, record_activity};

#[test]
fn clear_removes_every_kind() {
    let mut conn = test_db();
    store_memory(&conn, MemoryKind::Fact, "Runs in size 44 shoes").unwrap();
    store_memory(&conn, MemoryKind::Preference, "Hates treadmills").unwrap();
    store_memory(&conn, MemoryKind::Goal, "Ten pull-ups by summer").unwrap();
    store_memory(&conn, MemoryKind::Context, "Travelling next week").unwrap();

    let result = clear_memories(&mut conn).unwrap();
    assert_eq!(result.deleted_count, 4);
    assert_eq!(memory_count(&conn).unwrap(), 0);
    assert!(list_memories(&conn, 10).unwrap().is_empty());
}

#[test]
fn clear_on_empty_store_reports_zero() {
    let mut conn = test_db();
    assert_eq!(clear_memories(&mut conn).unwrap().deleted_count, 0);
}

#[test]
fn clear_leaves_streak_alone() {
    let mut conn = test_db();
    let day = helpers::date(2024, 8, 20);
    record_activity(&mut conn, "local", day).unwrap();
    store_memory(&conn, MemoryKind::Goal, "Keep the streak alive").unwrap();

    clear_memories(&mut conn).unwrap();

    let record = load_streak(&conn, "local").unwrap().unwrap();
    assert_eq!(record.current_streak, 1);
    assert_eq!(record.last_workout_date, Some(day));
}

#[test]
fn store_accepts_new_entries_after_clear() {
    let mut conn = test_db();
    store_memory(&conn, MemoryKind::Fact, "old").unwrap();
    clear_memories(&mut conn).unwrap();

    let entry = store_memory(&conn, MemoryKind::Fact, "  new  ").unwrap();
    assert_eq!(entry.content, "new");
    assert_eq!(memory_count(&conn).unwrap(), 1);
}

#[test]
fn clear_result_serializes_camel_case() {
    let mut conn = test_db();
    store_memory(&conn, MemoryKind::Context, "Injured ankle").unwrap();
    let result = clear_memories(&mut conn).unwrap();

    let value = serde_json::to_value(result).unwrap();
    assert_eq!(value, serde_json::json!({"deletedCount": 1}));
}
