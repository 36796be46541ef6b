//! Bulk memory deletion.
//!
//! Removes every entry in a single statement; either all rows go or none do.

use anyhow::{Context, Result};
use rusqlite::Connection;
use serde::Serialize;

/// Result returned from a clear operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearResult {
    /// Number of entries removed; zero when the store was already empty.
    pub deleted_count: u64,
}

/// Delete all memory entries.
pub fn clear_memories(conn: &mut Connection) -> Result<ClearResult> {
    let tx = conn.transaction()?;
    let deleted = tx
        .execute("DELETE FROM memories", [])
        .context("failed to delete memories")?;
    tx.commit()?;

    tracing::info!(deleted_count = deleted, "memories cleared");

    Ok(ClearResult {
        deleted_count: deleted as u64,
    })
}
