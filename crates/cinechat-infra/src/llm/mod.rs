//! LLM provider implementations.
//!
//! Concrete implementations of the `LlmProvider` trait defined in
//! `cinechat-core`.

pub mod openai;
