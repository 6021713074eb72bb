//! Conversation types: messages and session summaries.
//!
//! A `ChatMessage` is an immutable record in a session's append-only log.
//! It carries no storage id: degraded-mode transcripts are assembled in
//! memory without ever touching the database, so a row id cannot be part
//! of the domain shape. Ordering is by `created_at`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::SessionId;

pub use crate::llm::MessageRole;

/// One message in a session's conversation log. Created once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub session_id: SessionId,
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a message timestamped now.
    pub fn new(session_id: SessionId, role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            session_id,
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

/// Aggregate view of one stored session, for listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: SessionId,
    pub started_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
    pub message_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_message_new_sets_timestamp() {
        let before = Utc::now();
        let msg = ChatMessage::new(SessionId::new("s1"), MessageRole::User, "hello");
        let after = Utc::now();

        assert_eq!(msg.session_id.as_str(), "s1");
        assert_eq!(msg.role, MessageRole::User);
        assert_eq!(msg.content, "hello");
        assert!(msg.created_at >= before && msg.created_at <= after);
    }

    #[test]
    fn test_chat_message_serde_roundtrip() {
        let msg = ChatMessage::new(SessionId::new("s1"), MessageRole::Assistant, "hi there");
        let json = serde_json::to_string(&msg).unwrap();
        let parsed: ChatMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, msg);
    }
}
