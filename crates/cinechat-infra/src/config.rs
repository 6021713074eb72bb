//! Configuration loading for cinechat.
//!
//! Reads `config.toml` from the data directory (`~/.cinechat/` in production)
//! and deserializes it into [`ChatConfig`]. Falls back to defaults when the
//! file is missing or malformed. The provider credential is the one setting
//! with no default: a missing key is a startup error, never a runtime
//! surprise halfway through a conversation.

use std::path::{Path, PathBuf};

use secrecy::SecretString;

use cinechat_types::config::ChatConfig;
use cinechat_types::error::ConfigError;

/// Environment variables consulted for the provider API key, in order.
const API_KEY_VARS: [&str; 2] = ["CINECHAT_OPENAI_API_KEY", "OPENAI_API_KEY"];

/// Load chat configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`ChatConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and
///   returns the default.
pub async fn load_chat_config(data_dir: &Path) -> ChatConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return ChatConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return ChatConfig::default();
        }
    };

    match toml::from_str::<ChatConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            ChatConfig::default()
        }
    }
}

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `CINECHAT_DATA_DIR` environment variable
/// 2. Platform home directory (`~/.cinechat`)
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CINECHAT_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".cinechat");
    }

    // Last resort: current directory
    PathBuf::from(".cinechat")
}

/// Resolve the provider API key from the environment.
///
/// Checks `CINECHAT_OPENAI_API_KEY` first so a dedicated key can override a
/// shared `OPENAI_API_KEY`. The key never enters [`ChatConfig`] or the
/// config file; it lives only in a [`SecretString`].
pub fn provider_api_key() -> Result<SecretString, ConfigError> {
    for var in API_KEY_VARS {
        if let Ok(value) = std::env::var(var) {
            if !value.trim().is_empty() {
                return Ok(SecretString::from(value));
            }
        }
    }
    Err(ConfigError::MissingCredential("OPENAI_API_KEY"))
}
