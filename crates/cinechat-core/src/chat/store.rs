//! Conversation store: durable transcripts with system-prompt seeding.
//!
//! Wraps a [`ConversationRepository`] with the session lifecycle semantics:
//! every materialized conversation starts with the fixed system prompt,
//! injected exactly once and persisted so the injection never repeats. The
//! store is the single source of truth; transcripts are reconstructed from
//! it on every read, never cached across requests.

use chrono::{Duration, Utc};

use cinechat_types::chat::{ChatMessage, MessageRole};
use cinechat_types::error::StoreError;
use cinechat_types::session::SessionId;

use crate::chat::repository::ConversationRepository;

/// Fixed system prompt seeded as the first message of every conversation.
pub const SYSTEM_PROMPT: &str =
    "You are a movie recommendation assistant. Recommend movies based on user requests.";

/// Session-keyed append-only transcript storage.
pub struct ConversationStore<R: ConversationRepository> {
    repo: R,
}

impl<R: ConversationRepository> ConversationStore<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Access the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Load the full transcript for a session, in insertion order.
    ///
    /// First contact synthesizes the system prompt and persists it, so
    /// subsequent loads return the identical sequence without
    /// re-synthesizing. If rows somehow exist without a system message, the
    /// seed is backdated below the earliest row so timestamp ordering keeps
    /// the system prompt first.
    pub async fn load(&self, session_id: &SessionId) -> Result<Vec<ChatMessage>, StoreError> {
        let messages = self.repo.list(session_id).await?;
        if messages.iter().any(|m| m.role == MessageRole::System) {
            return Ok(messages);
        }

        let seeded_at = match messages.first() {
            Some(first) => first.created_at - Duration::milliseconds(1),
            None => Utc::now(),
        };
        let seed = ChatMessage {
            session_id: session_id.clone(),
            role: MessageRole::System,
            content: SYSTEM_PROMPT.to_string(),
            created_at: seeded_at,
        };
        self.repo.append(&seed).await?;

        let mut transcript = Vec::with_capacity(messages.len() + 1);
        transcript.push(seed);
        transcript.extend(messages);
        Ok(transcript)
    }

    /// Append one message, timestamped now.
    ///
    /// Returns the stored message so callers can extend an in-memory
    /// transcript without reloading.
    pub async fn append(
        &self,
        session_id: &SessionId,
        role: MessageRole,
        content: impl Into<String>,
    ) -> Result<ChatMessage, StoreError> {
        let message = ChatMessage::new(session_id.clone(), role, content);
        self.repo.append(&message).await?;
        Ok(message)
    }
}
