//! Infrastructure layer for cinechat.
//!
//! Contains implementations of the ports defined in `cinechat-core`:
//! SQLite conversation storage, the OpenAI completion client, and
//! configuration loading for the data directory.

pub mod config;
pub mod llm;
pub mod sqlite;
