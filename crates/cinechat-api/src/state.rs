//! Application state shared by CLI commands and REST API handlers.

use std::path::PathBuf;
use std::sync::Arc;

use cinechat_core::chat::store::ConversationStore;
use cinechat_core::chat::turn::TurnService;
use cinechat_infra::config::{load_chat_config, provider_api_key, resolve_data_dir};
use cinechat_infra::llm::openai::OpenAiProvider;
use cinechat_infra::sqlite::conversation::SqliteConversationRepository;
use cinechat_infra::sqlite::pool::DatabasePool;

/// The turn service pinned to its production implementations.
pub type ConcreteTurnService = TurnService<SqliteConversationRepository, OpenAiProvider>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub turn_service: Arc<ConcreteTurnService>,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Initialize the application state: resolve the data directory, load
    /// config, connect to the database, wire up services.
    ///
    /// The provider credential is resolved here and nowhere else, so a
    /// missing key fails startup instead of surfacing mid-conversation.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_chat_config(&data_dir).await;

        // Initialize database
        let db_url = format!(
            "sqlite://{}?mode=rwc",
            data_dir.join("cinechat.db").display()
        );
        let db_pool = DatabasePool::new(&db_url).await?;

        let api_key = provider_api_key()?;
        let provider = match config.base_url.as_deref() {
            Some(base_url) => OpenAiProvider::with_base_url(&api_key, base_url),
            None => OpenAiProvider::new(&api_key),
        };

        let store = ConversationStore::new(SqliteConversationRepository::new(db_pool));
        let turn_service = TurnService::new(store, provider, config);

        Ok(Self {
            turn_service: Arc::new(turn_service),
            data_dir,
        })
    }
}
