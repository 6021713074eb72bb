//! Conversation lifecycle: repository port, store semantics, turn pipeline.

pub mod repository;
pub mod store;
pub mod turn;

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory repository doubles shared by the store and turn tests.

    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use cinechat_types::chat::{ChatMessage, SessionSummary};
    use cinechat_types::error::StoreError;
    use cinechat_types::session::SessionId;

    use super::repository::ConversationRepository;

    /// Vec-backed repository honoring the same ordering contract as the
    /// SQLite implementation (sorted by `created_at`, insertion-stable).
    pub(crate) struct MemoryRepository {
        messages: Mutex<Vec<ChatMessage>>,
    }

    impl MemoryRepository {
        pub(crate) fn new() -> Self {
            Self {
                messages: Mutex::new(Vec::new()),
            }
        }
    }

    impl ConversationRepository for MemoryRepository {
        async fn append(&self, message: &ChatMessage) -> Result<(), StoreError> {
            self.messages.lock().unwrap().push(message.clone());
            Ok(())
        }

        async fn list(&self, session_id: &SessionId) -> Result<Vec<ChatMessage>, StoreError> {
            let mut messages: Vec<ChatMessage> = self
                .messages
                .lock()
                .unwrap()
                .iter()
                .filter(|m| &m.session_id == session_id)
                .cloned()
                .collect();
            messages.sort_by_key(|m| m.created_at);
            Ok(messages)
        }

        async fn count(&self, session_id: &SessionId) -> Result<u32, StoreError> {
            let count = self
                .messages
                .lock()
                .unwrap()
                .iter()
                .filter(|m| &m.session_id == session_id)
                .count();
            Ok(count as u32)
        }

        async fn clear(&self, session_id: &SessionId) -> Result<(), StoreError> {
            self.messages
                .lock()
                .unwrap()
                .retain(|m| &m.session_id != session_id);
            Ok(())
        }

        async fn list_sessions(&self) -> Result<Vec<SessionSummary>, StoreError> {
            let messages = self.messages.lock().unwrap().clone();
            let mut by_session: BTreeMap<String, Vec<ChatMessage>> = BTreeMap::new();
            for message in messages {
                by_session
                    .entry(message.session_id.0.clone())
                    .or_default()
                    .push(message);
            }

            let mut summaries: Vec<SessionSummary> = by_session
                .into_iter()
                .map(|(sid, msgs)| SessionSummary {
                    session_id: SessionId::new(sid),
                    started_at: msgs.iter().map(|m| m.created_at).min().unwrap(),
                    last_active_at: msgs.iter().map(|m| m.created_at).max().unwrap(),
                    message_count: msgs.len() as u32,
                })
                .collect();
            summaries.sort_by(|a, b| b.last_active_at.cmp(&a.last_active_at));
            Ok(summaries)
        }
    }

    /// Repository whose every operation fails, for degraded-mode tests.
    pub(crate) struct FailingRepository;

    impl ConversationRepository for FailingRepository {
        async fn append(&self, _message: &ChatMessage) -> Result<(), StoreError> {
            Err(StoreError::Connection)
        }

        async fn list(&self, _session_id: &SessionId) -> Result<Vec<ChatMessage>, StoreError> {
            Err(StoreError::Connection)
        }

        async fn count(&self, _session_id: &SessionId) -> Result<u32, StoreError> {
            Err(StoreError::Connection)
        }

        async fn clear(&self, _session_id: &SessionId) -> Result<(), StoreError> {
            Err(StoreError::Connection)
        }

        async fn list_sessions(&self) -> Result<Vec<SessionSummary>, StoreError> {
            Err(StoreError::Connection)
        }
    }
}
