//! CLI `reset-memory` command: delete all coaching memory after confirmation.

use anyhow::{bail, Result};
use std::io::Write;

use stride::config::StrideConfig;

/// Delete all memory entries after user confirmation.
pub fn reset_memory(config: &StrideConfig) -> Result<()> {
    let db_path = config.resolved_db_path();

    println!("WARNING: This will permanently delete ALL coaching memory.");
    println!("Streaks and sessions are kept.");
    println!("Database: {}", db_path.display());
    print!("\nType YES to confirm: ");
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;

    if input.trim() != "YES" {
        bail!("reset cancelled");
    }

    let mut conn = stride::db::open_database(&db_path)?;
    let result = stride::memory::clear::clear_memories(&mut conn)?;

    println!("Deleted {} memories.", result.deleted_count);
    Ok(())
}
