//! Provider ports for chat completion.

pub mod provider;

pub use provider::LlmProvider;
