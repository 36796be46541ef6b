//! CLI `streak` command: print the stored streak record.

use anyhow::Result;

use stride::config::StrideConfig;
use stride::streak::calendar::{days_between, format_date};
use stride::streak::store::load_streak;

pub fn streak(config: &StrideConfig) -> Result<()> {
    let db_path = config.resolved_db_path();
    let conn = stride::db::open_database(&db_path)?;
    let key = &config.streak.record_key;

    let Some(record) = load_streak(&conn, key)? else {
        println!("No streak recorded yet for '{key}'.");
        return Ok(());
    };

    println!("Streak ({key})");
    println!("{}", "=".repeat(40));
    println!("  Current streak:      {}", record.current_streak);
    println!("  Longest streak:      {}", record.longest_streak);
    println!("  Missed workouts:     {}", record.missed_workouts);

    match record.last_workout_date {
        Some(last) => {
            let today = config.day_boundary().today();
            let ago = days_between(last, today);
            let when = match ago {
                0 => "today".to_string(),
                1 => "yesterday".to_string(),
                n if n > 1 => format!("{n} days ago"),
                _ => "in the future".to_string(),
            };
            println!("  Last workout:        {} ({when})", format_date(last));
        }
        None => println!("  Last workout:        never"),
    }

    Ok(())
}
