//! Read-only session lookup.
//!
//! Sessions are issued elsewhere and land in the `sessions` table. This module
//! only answers whether the request carries a live session and, if so, who it
//! belongs to.

use anyhow::{Context, Result};
use axum::http::{header, HeaderMap};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use std::sync::{Arc, Mutex};

/// Role reported when the issuer stored none.
pub const DEFAULT_ROLE: &str = "user";

/// The authenticated subject behind a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionInfo {
    pub id: String,
    pub role: String,
}

/// Pluggable session lookup.
pub trait SessionProvider: Send + Sync {
    /// Return the session attached to the request, if any.
    ///
    /// Synchronous; async callers should use `tokio::task::spawn_blocking`.
    fn current_session(&self, headers: &HeaderMap) -> Result<Option<SessionInfo>>;
}

/// Extract a cookie value by name from all `Cookie` headers.
pub fn get_cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"').to_string())
        .filter(|value| !value.is_empty())
}

/// Session provider backed by the `sessions` table, keyed by a cookie token.
pub struct SqliteSessionProvider {
    db: Arc<Mutex<Connection>>,
    cookie_name: String,
}

impl SqliteSessionProvider {
    pub fn new(db: Arc<Mutex<Connection>>, cookie_name: impl Into<String>) -> Self {
        Self {
            db,
            cookie_name: cookie_name.into(),
        }
    }
}

impl SessionProvider for SqliteSessionProvider {
    fn current_session(&self, headers: &HeaderMap) -> Result<Option<SessionInfo>> {
        let Some(token) = get_cookie_value(headers, &self.cookie_name) else {
            return Ok(None);
        };

        let conn = self
            .db
            .lock()
            .map_err(|e| anyhow::anyhow!("db lock poisoned: {e}"))?;
        lookup_session(&conn, &token, Utc::now())
    }
}

/// Find a live session by token as of `now`.
///
/// Rows with an `expires_at` in the past, or one that cannot be parsed, are
/// treated as absent.
pub fn lookup_session(
    conn: &Connection,
    token: &str,
    now: DateTime<Utc>,
) -> Result<Option<SessionInfo>> {
    let row: Option<(String, Option<String>, Option<String>)> = conn
        .query_row(
            "SELECT user_id, role, expires_at FROM sessions WHERE token = ?1",
            params![token],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .optional()
        .context("failed to read session")?;

    let Some((user_id, role, expires_at)) = row else {
        return Ok(None);
    };

    if let Some(expires_at) = expires_at {
        match DateTime::parse_from_rfc3339(&expires_at) {
            Ok(expiry) if expiry.with_timezone(&Utc) > now => {}
            Ok(_) => return Ok(None),
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "unreadable session expiry");
                return Ok(None);
            }
        }
    }

    let role = role
        .filter(|r| !r.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ROLE.to_string());

    Ok(Some(SessionInfo { id: user_id, role }))
}
