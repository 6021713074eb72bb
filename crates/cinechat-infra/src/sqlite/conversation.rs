//! SQLite conversation repository implementation.
//!
//! Implements `ConversationRepository` from `cinechat-core` using sqlx with
//! split read/write pools: raw queries, a private Row struct for the
//! SQLite-to-domain mapping, and RFC 3339 timestamps stored as TEXT.

use chrono::{DateTime, Utc};
use sqlx::Row;

use cinechat_core::chat::repository::ConversationRepository;
use cinechat_types::chat::{ChatMessage, SessionSummary};
use cinechat_types::error::StoreError;
use cinechat_types::llm::MessageRole;
use cinechat_types::session::SessionId;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ConversationRepository`.
pub struct SqliteConversationRepository {
    pool: DatabasePool,
}

impl SqliteConversationRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

/// Internal row type for mapping SQLite rows to domain ChatMessage.
struct MessageRow {
    session_id: String,
    role: String,
    content: String,
    created_at: String,
}

impl MessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            session_id: row.try_get("session_id")?,
            role: row.try_get("role")?,
            content: row.try_get("content")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_message(self) -> Result<ChatMessage, StoreError> {
        let role: MessageRole = self
            .role
            .parse()
            .map_err(|e: String| StoreError::Query(e))?;
        let created_at = parse_datetime(&self.created_at)?;

        Ok(ChatMessage {
            session_id: SessionId::new(self.session_id),
            role,
            content: self.content,
            created_at,
        })
    }
}

/// Internal row type for the per-session aggregate query.
struct SummaryRow {
    session_id: String,
    started_at: String,
    last_active_at: String,
    message_count: i64,
}

impl SummaryRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            session_id: row.try_get("session_id")?,
            started_at: row.try_get("started_at")?,
            last_active_at: row.try_get("last_active_at")?,
            message_count: row.try_get("message_count")?,
        })
    }

    fn into_summary(self) -> Result<SessionSummary, StoreError> {
        Ok(SessionSummary {
            session_id: SessionId::new(self.session_id),
            started_at: parse_datetime(&self.started_at)?,
            last_active_at: parse_datetime(&self.last_active_at)?,
            message_count: self.message_count as u32,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

/// Split sqlx failures into the two store error classes: pool/IO trouble is
/// `Connection`, everything else is `Query`.
fn store_err(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_) => StoreError::Connection,
        other => StoreError::Query(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// ConversationRepository implementation
// ---------------------------------------------------------------------------

impl ConversationRepository for SqliteConversationRepository {
    async fn append(&self, message: &ChatMessage) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO messages (session_id, role, content, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(message.session_id.as_str())
        .bind(message.role.to_string())
        .bind(&message.content)
        .bind(format_datetime(&message.created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(store_err)?;

        Ok(())
    }

    async fn list(&self, session_id: &SessionId) -> Result<Vec<ChatMessage>, StoreError> {
        // id breaks timestamp ties so same-instant appends keep insertion order.
        let rows = sqlx::query(
            "SELECT session_id, role, content, created_at FROM messages \
             WHERE session_id = ? ORDER BY created_at ASC, id ASC",
        )
        .bind(session_id.as_str())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(store_err)?;

        let mut messages = Vec::with_capacity(rows.len());
        for row in &rows {
            let msg_row =
                MessageRow::from_row(row).map_err(|e| StoreError::Query(e.to_string()))?;
            messages.push(msg_row.into_message()?);
        }

        Ok(messages)
    }

    async fn count(&self, session_id: &SessionId) -> Result<u32, StoreError> {
        let row = sqlx::query("SELECT COUNT(*) as cnt FROM messages WHERE session_id = ?")
            .bind(session_id.as_str())
            .fetch_one(&self.pool.reader)
            .await
            .map_err(store_err)?;

        let count: i64 = row
            .try_get("cnt")
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(count as u32)
    }

    async fn clear(&self, session_id: &SessionId) -> Result<(), StoreError> {
        // No rows_affected check: clearing an absent session is a no-op.
        sqlx::query("DELETE FROM messages WHERE session_id = ?")
            .bind(session_id.as_str())
            .execute(&self.pool.writer)
            .await
            .map_err(store_err)?;

        Ok(())
    }

    async fn list_sessions(&self) -> Result<Vec<SessionSummary>, StoreError> {
        // MIN/MAX over the RFC 3339 TEXT column is sound: the strings are
        // fixed-offset UTC, so lexicographic order is chronological order.
        let rows = sqlx::query(
            "SELECT session_id, MIN(created_at) AS started_at, MAX(created_at) AS last_active_at, \
             COUNT(*) AS message_count \
             FROM messages GROUP BY session_id ORDER BY last_active_at DESC",
        )
        .fetch_all(&self.pool.reader)
        .await
        .map_err(store_err)?;

        let mut summaries = Vec::with_capacity(rows.len());
        for row in &rows {
            let summary_row =
                SummaryRow::from_row(row).map_err(|e| StoreError::Query(e.to_string()))?;
            summaries.push(summary_row.into_summary()?);
        }

        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    use cinechat_core::chat::store::{ConversationStore, SYSTEM_PROMPT};
    use cinechat_core::chat::turn::TurnService;
    use cinechat_core::llm::LlmProvider;
    use cinechat_types::config::ChatConfig;
    use cinechat_types::llm::{CompletionRequest, CompletionResponse, ProviderError};

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    fn make_message(session: &str, role: MessageRole, content: &str) -> ChatMessage {
        ChatMessage::new(SessionId::new(session), role, content)
    }

    #[tokio::test]
    async fn test_append_and_list_round_trip() {
        let repo = SqliteConversationRepository::new(test_pool().await);

        let msg = make_message("s1", MessageRole::User, "Hello");
        repo.append(&msg).await.unwrap();

        let messages = repo.list(&SessionId::new("s1")).await.unwrap();
        assert_eq!(messages, vec![msg]);
    }

    #[tokio::test]
    async fn test_list_filters_by_session() {
        let repo = SqliteConversationRepository::new(test_pool().await);

        repo.append(&make_message("a", MessageRole::User, "for a"))
            .await
            .unwrap();
        repo.append(&make_message("b", MessageRole::User, "for b"))
            .await
            .unwrap();

        let a = repo.list(&SessionId::new("a")).await.unwrap();
        assert_eq!(a.len(), 1);
        assert_eq!(a[0].content, "for a");

        let b = repo.list(&SessionId::new("b")).await.unwrap();
        assert_eq!(b.len(), 1);
        assert_eq!(b[0].content, "for b");
    }

    #[tokio::test]
    async fn test_list_orders_by_timestamp() {
        let repo = SqliteConversationRepository::new(test_pool().await);
        let session = SessionId::new("ordered");
        let base = Utc::now();

        // Insert newest first; list must come back oldest first.
        for (offset_secs, content) in [(2, "third"), (0, "first"), (1, "second")] {
            let msg = ChatMessage {
                session_id: session.clone(),
                role: MessageRole::User,
                content: content.to_string(),
                created_at: base + Duration::seconds(offset_secs),
            };
            repo.append(&msg).await.unwrap();
        }

        let messages = repo.list(&session).await.unwrap();
        let contents: Vec<&str> = messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_count() {
        let repo = SqliteConversationRepository::new(test_pool().await);
        let session = SessionId::new("counted");

        assert_eq!(repo.count(&session).await.unwrap(), 0);

        repo.append(&make_message("counted", MessageRole::User, "one"))
            .await
            .unwrap();
        repo.append(&make_message("counted", MessageRole::Assistant, "two"))
            .await
            .unwrap();

        assert_eq!(repo.count(&session).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_clear_removes_only_target_session() {
        let repo = SqliteConversationRepository::new(test_pool().await);

        repo.append(&make_message("keep", MessageRole::User, "stays"))
            .await
            .unwrap();
        repo.append(&make_message("drop", MessageRole::User, "goes"))
            .await
            .unwrap();

        repo.clear(&SessionId::new("drop")).await.unwrap();

        assert_eq!(repo.count(&SessionId::new("drop")).await.unwrap(), 0);
        assert_eq!(repo.count(&SessionId::new("keep")).await.unwrap(), 1);

        // Clearing an already-empty session succeeds.
        repo.clear(&SessionId::new("drop")).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_sessions_aggregates() {
        let repo = SqliteConversationRepository::new(test_pool().await);
        let base = Utc::now();

        for (session, offset_secs, content) in [
            ("older", 0, "hello"),
            ("older", 5, "again"),
            ("newer", 10, "hi"),
        ] {
            let msg = ChatMessage {
                session_id: SessionId::new(session),
                role: MessageRole::User,
                content: content.to_string(),
                created_at: base + Duration::seconds(offset_secs),
            };
            repo.append(&msg).await.unwrap();
        }

        let summaries = repo.list_sessions().await.unwrap();
        assert_eq!(summaries.len(), 2);

        // Most recently active first.
        assert_eq!(summaries[0].session_id.as_str(), "newer");
        assert_eq!(summaries[0].message_count, 1);
        assert_eq!(summaries[1].session_id.as_str(), "older");
        assert_eq!(summaries[1].message_count, 2);
        assert!(summaries[1].started_at < summaries[1].last_active_at);
    }

    // ---------------------------------------------------------------------
    // Turn pipeline over a real database
    // ---------------------------------------------------------------------

    struct CannedProvider(&'static str);

    impl LlmProvider for CannedProvider {
        fn name(&self) -> &str {
            "canned"
        }

        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<CompletionResponse, ProviderError> {
            Ok(CompletionResponse {
                content: self.0.to_string(),
                model: request.model.clone(),
            })
        }
    }

    #[tokio::test]
    async fn test_turn_round_trip_through_sqlite() {
        let pool = test_pool().await;
        let svc = TurnService::new(
            ConversationStore::new(SqliteConversationRepository::new(pool.clone())),
            CannedProvider("I recommend Inception."),
            ChatConfig::default(),
        );
        let session = SessionId::new("movie-night");

        let transcript = svc.run_turn(&session, "Recommend a sci-fi movie").await;

        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[0].content, SYSTEM_PROMPT);
        assert_eq!(transcript[1].content, "Recommend a sci-fi movie");
        assert_eq!(transcript[2].content, "I recommend Inception.");

        // A fresh repository over the same database sees the same history.
        let repo = SqliteConversationRepository::new(pool);
        let stored = repo.list(&session).await.unwrap();
        assert_eq!(stored, transcript);
    }

    #[tokio::test]
    async fn test_history_accumulates_across_turns() {
        let pool = test_pool().await;
        let svc = TurnService::new(
            ConversationStore::new(SqliteConversationRepository::new(pool.clone())),
            CannedProvider("ok"),
            ChatConfig::default(),
        );
        let session = SessionId::new("regular");

        svc.run_turn(&session, "first").await;
        svc.run_turn(&session, "second").await;

        let repo = SqliteConversationRepository::new(pool);
        let stored = repo.list(&session).await.unwrap();
        let roles: Vec<MessageRole> = stored.iter().map(|m| m.role.clone()).collect();
        assert_eq!(
            roles,
            vec![
                MessageRole::System,
                MessageRole::User,
                MessageRole::Assistant,
                MessageRole::User,
                MessageRole::Assistant,
            ]
        );
    }
}
