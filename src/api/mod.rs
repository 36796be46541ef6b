//! HTTP API.
//!
//! Handlers parse the request, hand blocking database work to
//! [`with_db`], and turn failures into JSON through [`ApiError`].

pub mod memory;
pub mod session;
pub mod streak;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use rusqlite::Connection;
use serde::Serialize;
use serde_json::json;
use std::sync::{Arc, Mutex};
use tower_http::trace::TraceLayer;

use crate::auth::{SessionProvider, SqliteSessionProvider};
use crate::config::StrideConfig;
use crate::streak::calendar::DayBoundary;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
    pub sessions: Arc<dyn SessionProvider>,
    pub config: Arc<StrideConfig>,
    pub day_boundary: DayBoundary,
}

impl AppState {
    /// State with the cookie-backed session provider over the same database.
    pub fn new(db: Arc<Mutex<Connection>>, config: StrideConfig) -> Self {
        let sessions = Arc::new(SqliteSessionProvider::new(
            Arc::clone(&db),
            config.auth.session_cookie.clone(),
        ));
        Self::with_sessions(db, sessions, config)
    }

    pub fn with_sessions(
        db: Arc<Mutex<Connection>>,
        sessions: Arc<dyn SessionProvider>,
        config: StrideConfig,
    ) -> Self {
        let day_boundary = config.day_boundary();
        Self {
            db,
            sessions,
            config: Arc::new(config),
            day_boundary,
        }
    }

    pub fn record_key(&self) -> &str {
        &self.config.streak.record_key
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/admin/streak", put(streak::admin_override))
        .route("/streak", get(streak::get_streak))
        .route("/activity", post(streak::register_activity))
        .route("/recovery-day", post(streak::register_recovery_day))
        .route("/auth/session", get(session::current_session))
        .route("/login", get(session::login))
        .route("/clear-memory", post(memory::clear_memory))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Errors surfaced at the HTTP boundary.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    /// The client sees only `action`; the cause is logged.
    #[error("{action} failed")]
    Storage {
        action: &'static str,
        cause: anyhow::Error,
    },

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn storage(action: &'static str, cause: anyhow::Error) -> Self {
        Self::Storage { action, cause }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Storage { .. } | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn log(&self) {
        match self {
            Self::BadRequest(msg) => tracing::debug!(error = %msg, "rejected request"),
            Self::Storage { action, cause } => {
                tracing::error!(action, error = %format!("{cause:#}"), "storage failure")
            }
            Self::Internal(msg) => tracing::error!(error = %msg, "internal failure"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();
        let body = json!({ "ok": false, "error": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}

/// An [`ApiError`] rendered as `{"error": ...}`, for routes whose success body
/// has no `ok` flag.
#[derive(Debug)]
pub struct PlainError(pub ApiError);

impl From<ApiError> for PlainError {
    fn from(err: ApiError) -> Self {
        Self(err)
    }
}

impl IntoResponse for PlainError {
    fn into_response(self) -> Response {
        self.0.log();
        let body = json!({ "error": self.0.to_string() });
        (self.0.status(), Json(body)).into_response()
    }
}

/// Run `f` against the shared connection on the blocking pool.
pub async fn with_db<T, F>(state: &AppState, action: &'static str, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&mut Connection) -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let db = Arc::clone(&state.db);
    tokio::task::spawn_blocking(move || {
        let mut conn = db
            .lock()
            .map_err(|e| anyhow::anyhow!("db lock poisoned: {e}"))?;
        f(&mut conn)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("db task failed: {e}")))?
    .map_err(|e| ApiError::storage(action, e))
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
