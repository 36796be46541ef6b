//! Single-user fitness coaching backend.
//!
//! Stride tracks workout streaks, answers session checks for the sign-in flow,
//! and keeps a long-term memory store for the coaching assistant, all over a
//! small JSON HTTP API backed by SQLite.
//!
//! # Streak rules
//!
//! | Last workout | Registration today does |
//! |--------------|-------------------------|
//! | never | start a streak of 1 |
//! | today | nothing (`alreadyDoneToday`) |
//! | yesterday | `currentStreak + 1` |
//! | `n` days ago | `missedWorkouts + (n - 1)`, streak back to 1 |
//!
//! Days are calendar days under a configurable UTC offset. Recovery days follow
//! the same rules as workouts.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from TOML files and environment variables
//! - [`db`]: SQLite database initialization, schema, migrations, and health checks
//! - [`streak`]: Streak record, transition policy, overrides, and persistence
//! - [`memory`]: Coaching memory storage and bulk clearing
//! - [`auth`]: Read-only session lookup
//! - [`api`]: axum router and handlers
//! - [`server`]: Server startup

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod memory;
pub mod server;
pub mod streak;
