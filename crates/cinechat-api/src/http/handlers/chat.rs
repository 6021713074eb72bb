//! Chat turn HTTP handler.
//!
//! Endpoint:
//! - POST /api/v1/chat - Run one conversational turn for the caller's session

use std::time::Instant;

use axum::extract::State;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use uuid::Uuid;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::http::session::session_from_jar;
use crate::state::AppState;

/// Request body for a chat turn.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// The user's utterance. Blank input is accepted and simply runs no turn.
    #[serde(default)]
    pub message: String,
}

/// POST /api/v1/chat - Run one conversational turn.
///
/// Always returns the session's transcript, whether or not the input
/// produced a turn. Provider and storage failures are absorbed upstream,
/// so this handler only errors on response assembly.
pub async fn chat(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<ChatRequest>,
) -> Result<(CookieJar, Json<ApiResponse<serde_json::Value>>), AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let (jar, session_id) = session_from_jar(jar);

    let transcript = state.turn_service.run_turn(&session_id, &body.message).await;

    let elapsed = start.elapsed().as_millis() as u64;

    let messages_json: Vec<serde_json::Value> = transcript
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<_, _>>()
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let data = serde_json::json!({
        "session_id": session_id.as_str(),
        "messages": messages_json,
    });

    let resp = ApiResponse::success(data, request_id, elapsed)
        .with_link("self", "/api/v1/chat")
        .with_link("transcript", "/api/v1/transcript");

    Ok((jar, Json(resp)))
}
