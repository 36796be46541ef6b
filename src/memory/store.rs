//! Write and read paths for coaching memory.

use anyhow::{bail, Context, Result};
use rusqlite::{params, Connection};

use crate::memory::types::{MemoryEntry, MemoryKind};

/// Store a new memory entry and return it.
pub fn store_memory(conn: &Connection, kind: MemoryKind, content: &str) -> Result<MemoryEntry> {
    let content = content.trim();
    if content.is_empty() {
        bail!("content must not be empty");
    }

    let entry = MemoryEntry {
        id: uuid::Uuid::now_v7().to_string(),
        kind,
        content: content.to_string(),
        created_at: chrono::Utc::now().to_rfc3339(),
    };

    conn.execute(
        "INSERT INTO memories (id, kind, content, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![entry.id, entry.kind.as_str(), entry.content, entry.created_at],
    )
    .context("failed to insert memory")?;

    Ok(entry)
}

/// Most recent entries first, at most `limit`.
pub fn list_memories(conn: &Connection, limit: usize) -> Result<Vec<MemoryEntry>> {
    let mut stmt = conn.prepare(
        "SELECT id, kind, content, created_at FROM memories ORDER BY rowid DESC LIMIT ?1",
    )?;

    let rows = stmt
        .query_map(params![limit as i64], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    rows.into_iter()
        .map(|(id, kind, content, created_at)| {
            let kind = kind.parse::<MemoryKind>().map_err(anyhow::Error::msg)?;
            Ok(MemoryEntry {
                id,
                kind,
                content,
                created_at,
            })
        })
        .collect()
}

pub fn memory_count(conn: &Connection) -> Result<u64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM memories", [], |row| row.get(0))?;
    Ok(count as u64)
}
