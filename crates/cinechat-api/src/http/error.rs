//! Application error type mapping to HTTP status codes and envelope format.

use axum::response::{IntoResponse, Response};

use cinechat_types::error::StoreError;

use crate::http::response::ApiResponse;

/// Application-level error that maps to HTTP responses.
///
/// Turn handling degrades internally rather than erroring, so this only
/// covers faults outside a turn: direct store reads and response assembly.
#[derive(Debug)]
pub enum AppError {
    /// Conversation store errors.
    Store(StoreError),
    /// Generic internal error.
    Internal(String),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Store(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, message) = match &self {
            AppError::Store(e) => ("STORE_ERROR", e.to_string()),
            AppError::Internal(msg) => ("INTERNAL_ERROR", msg.clone()),
        };

        ApiResponse::error(code, &message, String::new(), 0).into_response()
    }
}
