//! Service configuration.
//!
//! `ChatConfig` represents the optional `config.toml` read from the data
//! directory. All fields have defaults, so an absent or empty file yields a
//! working configuration. The provider credential deliberately does not
//! live here -- it comes from the environment and is never written to disk.

use serde::{Deserialize, Serialize};

/// Tunable settings for the chat service.
///
/// Loaded from `~/.cinechat/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Model identifier sent to the provider.
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum accepted user input length in characters; longer input is
    /// silently truncated.
    #[serde(default = "default_max_input_chars")]
    pub max_input_chars: usize,

    /// Escape markup-significant characters in user input before storing
    /// and sending it. When disabled, the raw trimmed text is kept and
    /// escaping becomes the renderer's concern.
    #[serde(default = "default_escape_markup")]
    pub escape_markup: bool,

    /// Override the provider's base URL (for OpenAI-compatible endpoints).
    #[serde(default)]
    pub base_url: Option<String>,

    /// Cap on generated tokens per completion.
    #[serde(default)]
    pub max_tokens: Option<u32>,

    /// Sampling temperature passed through to the provider.
    #[serde(default)]
    pub temperature: Option<f32>,
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_max_input_chars() -> usize {
    1000
}

fn default_escape_markup() -> bool {
    true
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_input_chars: default_max_input_chars(),
            escape_markup: default_escape_markup(),
            base_url: None,
            max_tokens: None,
            temperature: None,
        }
    }
}
