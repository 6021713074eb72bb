//! HTTP/REST API layer for cinechat.
//!
//! Axum-based REST API at `/api/v1/` with cookie session identity,
//! envelope response format, and CORS support.

pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod session;
