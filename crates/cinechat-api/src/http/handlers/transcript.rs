//! Transcript HTTP handlers.
//!
//! Endpoints:
//! - GET  /api/v1/transcript       - Full transcript for the caller's session
//! - POST /api/v1/transcript/clear - Delete the caller's stored messages

use std::time::Instant;

use axum::extract::State;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use cinechat_core::chat::repository::ConversationRepository;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::http::session::session_from_jar;
use crate::state::AppState;

/// GET /api/v1/transcript - Get the caller's transcript.
///
/// A session seen for the first time comes back seeded with the system
/// prompt, same as it would after a first turn.
pub async fn get_transcript(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse<serde_json::Value>>), AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let (jar, session_id) = session_from_jar(jar);

    let transcript = state.turn_service.transcript(&session_id).await?;

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
        .with_link("self", "/api/v1/transcript")
        .with_link("chat", "/api/v1/chat");

    Ok((jar, Json(resp)))
}

/// POST /api/v1/transcript/clear - Delete the caller's stored messages.
///
/// Clearing a session with nothing stored is a no-op, not an error.
pub async fn clear_transcript(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse<serde_json::Value>>), AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let (jar, session_id) = session_from_jar(jar);

    state
        .turn_service
        .store()
        .repo()
        .clear(&session_id)
        .await?;

    let elapsed = start.elapsed().as_millis() as u64;

    let resp = ApiResponse::success(
        serde_json::json!({"cleared": true, "session_id": session_id.as_str()}),
        request_id,
        elapsed,
    );

    Ok((jar, Json(resp)))
}
