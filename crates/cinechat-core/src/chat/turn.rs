//! Turn orchestration: one user utterance in, one assistant reply out.
//!
//! `TurnService` drives the full request cycle for a session: validate the
//! input, load the stored transcript, persist the user message, call the
//! provider once with the complete history, persist the reply. Failures
//! never escape a turn; the provider path degrades to a fixed fallback
//! reply and the storage path degrades to an in-memory transcript.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::warn;

use cinechat_types::chat::{ChatMessage, MessageRole};
use cinechat_types::config::ChatConfig;
use cinechat_types::error::StoreError;
use cinechat_types::llm::{CompletionRequest, Message};
use cinechat_types::session::SessionId;

use crate::chat::repository::ConversationRepository;
use crate::chat::store::{ConversationStore, SYSTEM_PROMPT};
use crate::input;
use crate::llm::LlmProvider;

/// Canned assistant reply persisted when the provider call fails.
pub const FALLBACK_REPLY: &str =
    "I'm sorry, I'm having trouble processing your request right now. Please try again later.";

/// Orchestrates one conversational turn per call.
///
/// Generic over `ConversationRepository` and `LlmProvider` so the pipeline
/// never depends on a concrete database or HTTP client.
pub struct TurnService<R: ConversationRepository, P: LlmProvider> {
    store: ConversationStore<R>,
    provider: P,
    config: ChatConfig,
    // Per-session turn locks. TODO: evict entries for sessions gone idle;
    // the map only grows while the process runs.
    session_locks: DashMap<SessionId, Arc<Mutex<()>>>,
}

impl<R: ConversationRepository, P: LlmProvider> TurnService<R, P> {
    pub fn new(store: ConversationStore<R>, provider: P, config: ChatConfig) -> Self {
        Self {
            store,
            provider,
            config,
            session_locks: DashMap::new(),
        }
    }

    /// Access the conversation store.
    pub fn store(&self) -> &ConversationStore<R> {
        &self.store
    }

    /// Access the effective chat configuration.
    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Run one turn for a session and return the resulting transcript.
    ///
    /// The user message is durable before the provider is called, so a
    /// crashed or failed completion still leaves the question on record.
    /// A provider failure appends [`FALLBACK_REPLY`] as the assistant turn.
    /// Empty input (after trimming) is not a turn: the stored transcript is
    /// returned unchanged and the provider is never called.
    pub async fn run_turn(&self, session_id: &SessionId, raw_input: &str) -> Vec<ChatMessage> {
        // Turns for the same session must not interleave their appends.
        // Cloning the Arc in the same statement drops the map guard before
        // the lock await, so no shard lock is held across a suspend point.
        let lock = self
            .session_locks
            .entry(session_id.clone())
            .or_default()
            .clone();
        let _guard = lock.lock().await;

        let validated = input::validate(
            raw_input,
            self.config.max_input_chars,
            self.config.escape_markup,
        );
        let Some(text) = validated else {
            return self.load_or_degrade(session_id).await;
        };

        let mut transcript = self.load_or_degrade(session_id).await;
        self.append_or_degrade(&mut transcript, session_id, MessageRole::User, text)
            .await;

        let request = self.completion_request(&transcript);
        let reply = match self.provider.complete(&request).await {
            Ok(response) => response.content,
            Err(err) => {
                warn!(
                    provider = self.provider.name(),
                    session_id = %session_id,
                    error = %err,
                    "Completion failed, substituting fallback reply"
                );
                FALLBACK_REPLY.to_string()
            }
        };
        self.append_or_degrade(&mut transcript, session_id, MessageRole::Assistant, reply)
            .await;

        transcript
    }

    /// Load the stored transcript for a session without running a turn.
    ///
    /// Takes the same per-session lock as [`run_turn`](Self::run_turn): a
    /// first-contact read racing a turn must not seed the system prompt
    /// twice.
    pub async fn transcript(&self, session_id: &SessionId) -> Result<Vec<ChatMessage>, StoreError> {
        let lock = self
            .session_locks
            .entry(session_id.clone())
            .or_default()
            .clone();
        let _guard = lock.lock().await;

        self.store.load(session_id).await
    }

    // --- Degraded-mode plumbing ---

    /// Load the transcript, falling back to an ephemeral one on store failure.
    async fn load_or_degrade(&self, session_id: &SessionId) -> Vec<ChatMessage> {
        match self.store.load(session_id).await {
            Ok(transcript) => transcript,
            Err(err) => {
                warn!(
                    session_id = %session_id,
                    error = %err,
                    "Transcript load failed, continuing with an ephemeral transcript"
                );
                vec![ChatMessage::new(
                    session_id.clone(),
                    MessageRole::System,
                    SYSTEM_PROMPT,
                )]
            }
        }
    }

    /// Persist one message and extend the working transcript.
    ///
    /// On store failure the message still joins the in-memory transcript so
    /// the provider sees it and the caller gets a coherent reply this turn.
    async fn append_or_degrade(
        &self,
        transcript: &mut Vec<ChatMessage>,
        session_id: &SessionId,
        role: MessageRole,
        content: String,
    ) {
        match self
            .store
            .append(session_id, role.clone(), content.as_str())
            .await
        {
            Ok(message) => transcript.push(message),
            Err(err) => {
                warn!(
                    session_id = %session_id,
                    role = %role,
                    error = %err,
                    "Append failed, keeping message in memory for this turn"
                );
                transcript.push(ChatMessage::new(session_id.clone(), role, content));
            }
        }
    }

    fn completion_request(&self, transcript: &[ChatMessage]) -> CompletionRequest {
        let messages = transcript
            .iter()
            .map(|m| Message {
                role: m.role.clone(),
                content: m.content.clone(),
            })
            .collect();
        CompletionRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        }
    }
}
