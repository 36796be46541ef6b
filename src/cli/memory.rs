//! CLI `memory` commands: list and add coaching memory entries.

use anyhow::Result;

use stride::config::StrideConfig;
use stride::memory::store::{list_memories, memory_count, store_memory};
use stride::memory::types::MemoryKind;

const PREVIEW_CHARS: usize = 72;

/// Print the newest `limit` entries.
pub fn list(config: &StrideConfig, limit: usize) -> Result<()> {
    let db_path = config.resolved_db_path();
    let conn = stride::db::open_database(&db_path)?;

    let total = memory_count(&conn)?;
    if total == 0 {
        println!("No memories stored.");
        return Ok(());
    }

    let entries = list_memories(&conn, limit)?;
    println!("Showing {} of {total} memories (newest first)\n", entries.len());
    for entry in &entries {
        println!(
            "  [{:<10}] {}  {}",
            entry.kind,
            entry.created_at,
            preview(&entry.content, PREVIEW_CHARS)
        );
    }

    Ok(())
}

/// Store one entry by hand.
pub fn add(config: &StrideConfig, kind: MemoryKind, content: &str) -> Result<()> {
    let db_path = config.resolved_db_path();
    let conn = stride::db::open_database(&db_path)?;

    let entry = store_memory(&conn, kind, content)?;
    println!("Stored {} memory {}", entry.kind, entry.id);
    Ok(())
}

fn preview(content: &str, max_chars: usize) -> String {
    let line = content.lines().next().unwrap_or_default();
    if line.chars().count() <= max_chars && line.len() == content.len() {
        return line.to_string();
    }
    let cut: String = line.chars().take(max_chars).collect();
    format!("{cut}...")
}
