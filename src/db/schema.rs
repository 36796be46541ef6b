//! SQL DDL for all Stride tables.
//!
//! Defines the `streaks`, `memories`, `sessions`, and `schema_meta` tables. All
//! DDL uses `IF NOT EXISTS` for idempotent initialization. Columns added after
//! v1 live in [`super::migrations`].

use rusqlite::Connection;

/// All schema DDL statements for Stride's core tables (schema v1).
const SCHEMA_SQL: &str = r#"
-- One row per streak document; the service only ever uses a single key
CREATE TABLE IF NOT EXISTS streaks (
    key TEXT PRIMARY KEY,
    current_streak INTEGER NOT NULL DEFAULT 0 CHECK(current_streak >= 0),
    longest_streak INTEGER NOT NULL DEFAULT 0 CHECK(longest_streak >= 0),
    missed_workouts INTEGER NOT NULL DEFAULT 0 CHECK(missed_workouts >= 0),
    last_workout_date TEXT,
    updated_at TEXT NOT NULL
);

-- Long-term coaching memory
CREATE TABLE IF NOT EXISTS memories (
    id TEXT PRIMARY KEY,
    kind TEXT NOT NULL CHECK(kind IN ('fact','preference','goal','context')),
    content TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_memories_kind ON memories(kind);
CREATE INDEX IF NOT EXISTS idx_memories_created ON memories(created_at);

-- Sessions written by the external auth issuer; read-only here
CREATE TABLE IF NOT EXISTS sessions (
    token TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    role TEXT,
    created_at TEXT NOT NULL
);

-- Schema metadata
CREATE TABLE IF NOT EXISTS schema_meta (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;

/// Initialize all schema tables. Idempotent (uses IF NOT EXISTS).
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)?;

    // Set initial schema version if not already present
    conn.execute(
        "INSERT OR IGNORE INTO schema_meta (key, value) VALUES ('schema_version', '1')",
        [],
    )?;

    Ok(())
}
