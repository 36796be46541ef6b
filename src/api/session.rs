use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Json;
use serde::Serialize;
use std::sync::Arc;

use super::AppState;
use crate::auth::SessionInfo;

const LOGIN_PAGE: &str = r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>Sign in - Stride</title></head>
<body>
<main>
<h1>Sign in</h1>
<p>Sign in to keep your streak going.</p>
</main>
</body>
</html>
"#;

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<SessionInfo>,
}

/// Look up the caller's session. Lookup failures count as "no session".
async fn resolve_session(state: &AppState, headers: HeaderMap) -> Option<SessionInfo> {
    let sessions = Arc::clone(&state.sessions);
    match tokio::task::spawn_blocking(move || sessions.current_session(&headers)).await {
        Ok(Ok(session)) => session,
        Ok(Err(e)) => {
            tracing::warn!(error = %format!("{e:#}"), "session lookup failed");
            None
        }
        Err(e) => {
            tracing::error!(error = %e, "session task failed");
            None
        }
    }
}

/// GET /auth/session - who is signed in, if anyone
pub async fn current_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<SessionResponse> {
    let user = resolve_session(&state, headers).await;
    Json(SessionResponse {
        authenticated: user.is_some(),
        user,
    })
}

/// GET /login - signed-in users go home, everyone else gets the sign-in page
pub async fn login(State(state): State<AppState>, headers: HeaderMap) -> Response {
    match resolve_session(&state, headers).await {
        Some(session) => {
            tracing::debug!(user_id = %session.id, "already signed in, redirecting");
            Redirect::temporary("/").into_response()
        }
        None => Html(LOGIN_PAGE).into_response(),
    }
}
