//! ConversationRepository trait definition.
//!
//! The persistence port for the append-only message log. Implementations
//! live in cinechat-infra (e.g., `SqliteConversationRepository`). Uses
//! native async fn in traits (RPITIT, Rust 2024 edition).

use cinechat_types::chat::{ChatMessage, SessionSummary};
use cinechat_types::error::StoreError;
use cinechat_types::session::SessionId;

/// Repository trait for conversation message persistence.
pub trait ConversationRepository: Send + Sync {
    /// Durably record one message. Never reorders or overwrites prior rows.
    fn append(
        &self,
        message: &ChatMessage,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// All messages for a session, in insertion order.
    fn list(
        &self,
        session_id: &SessionId,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, StoreError>> + Send;

    /// Number of messages recorded for a session.
    fn count(
        &self,
        session_id: &SessionId,
    ) -> impl std::future::Future<Output = Result<u32, StoreError>> + Send;

    /// Delete every message for a session. Deleting an empty session is a
    /// no-op, not an error.
    fn clear(
        &self,
        session_id: &SessionId,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Summaries of all stored sessions, most recently active first.
    fn list_sessions(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<SessionSummary>, StoreError>> + Send;
}
