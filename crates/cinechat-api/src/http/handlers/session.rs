//! Session browsing HTTP handler.
//!
//! Endpoint:
//! - GET /api/v1/sessions - List stored sessions, most recently active first

use std::time::Instant;

use axum::extract::State;
use axum::Json;
use uuid::Uuid;

use cinechat_core::chat::repository::ConversationRepository;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/sessions - List stored sessions.
pub async fn list_sessions(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<serde_json::Value>>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sessions = state.turn_service.store().repo().list_sessions().await?;

    let elapsed = start.elapsed().as_millis() as u64;

    let sessions_json: Vec<serde_json::Value> = sessions
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<_, _>>()
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let resp = ApiResponse::success(sessions_json, request_id, elapsed)
        .with_link("self", "/api/v1/sessions");

    Ok(Json(resp))
}
