use axum::extract::State;
use axum::Json;
use serde::Serialize;

use super::{with_db, AppState, PlainError};
use crate::memory::clear::clear_memories;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearMemoryResponse {
    pub message: String,
    pub deleted_count: u64,
}

/// POST /clear-memory - wipe all long-term coaching memory
pub async fn clear_memory(
    State(state): State<AppState>,
) -> Result<Json<ClearMemoryResponse>, PlainError> {
    let result = with_db(&state, "clearing memory", clear_memories).await?;

    Ok(Json(ClearMemoryResponse {
        message: format!("Cleared {} memories", result.deleted_count),
        deleted_count: result.deleted_count,
    }))
}
