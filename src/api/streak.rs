use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use super::{with_db, ApiError, AppState};
use crate::streak::overrides::StreakOverride;
use crate::streak::policy::ActivityOutcome;
use crate::streak::{store, StreakRecord};

#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryDayResponse {
    pub ok: bool,
    pub recovery_day_registered: bool,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub already_done_today: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityResponse {
    pub ok: bool,
    pub activity_registered: bool,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub already_done_today: bool,
}

/// PUT /admin/streak - overwrite any subset of the streak fields
///
/// The body is read as JSON whatever its `Content-Type`; an empty body is an
/// empty subset.
pub async fn admin_override(
    State(state): State<AppState>,
    payload: Bytes,
) -> Result<Json<OkResponse>, ApiError> {
    let body = parse_override_body(&payload)?;

    let overrides = StreakOverride::from_json(&body, &state.day_boundary);
    if overrides.is_empty() {
        debug!("override carried no usable fields");
    }
    let key = state.record_key().to_string();
    let applied = with_db(&state, "updating streak", move |conn| {
        store::apply_override(conn, &key, &overrides)
    })
    .await?;

    info!(fields = ?applied, "streak override applied");
    Ok(Json(OkResponse { ok: true }))
}

/// GET /streak - current record, defaults if nothing was ever written
pub async fn get_streak(State(state): State<AppState>) -> Result<Json<StreakRecord>, ApiError> {
    let key = state.record_key().to_string();
    let record = with_db(&state, "loading streak", move |conn| {
        store::load_streak(conn, &key)
    })
    .await?;
    Ok(Json(record.unwrap_or_default()))
}

/// POST /recovery-day - keep the streak alive with a rest day
pub async fn register_recovery_day(
    State(state): State<AppState>,
) -> Result<Json<RecoveryDayResponse>, ApiError> {
    let outcome = record_today(&state, "registering recovery day").await?;
    info!(
        current_streak = outcome.record.current_streak,
        already_done_today = outcome.already_done_today,
        "recovery day registered"
    );

    Ok(Json(RecoveryDayResponse {
        ok: true,
        recovery_day_registered: true,
        current_streak: outcome.record.current_streak,
        longest_streak: outcome.record.longest_streak,
        already_done_today: outcome.already_done_today,
    }))
}

/// POST /activity - register today's workout
pub async fn register_activity(
    State(state): State<AppState>,
) -> Result<Json<ActivityResponse>, ApiError> {
    let outcome = record_today(&state, "registering activity").await?;
    info!(
        current_streak = outcome.record.current_streak,
        already_done_today = outcome.already_done_today,
        "activity registered"
    );

    Ok(Json(ActivityResponse {
        ok: true,
        activity_registered: true,
        current_streak: outcome.record.current_streak,
        longest_streak: outcome.record.longest_streak,
        already_done_today: outcome.already_done_today,
    }))
}

async fn record_today(state: &AppState, action: &'static str) -> Result<ActivityOutcome, ApiError> {
    let now = Utc::now();
    let boundary = state.day_boundary;
    let key = state.record_key().to_string();
    with_db(state, action, move |conn| {
        store::record_activity_at(conn, &key, now, &boundary)
    })
    .await
}

fn parse_override_body(payload: &[u8]) -> Result<Value, ApiError> {
    if payload.iter().all(u8::is_ascii_whitespace) {
        return Ok(json!({}));
    }
    serde_json::from_slice(payload)
        .map_err(|e| ApiError::BadRequest(format!("invalid JSON body: {e}")))
}
