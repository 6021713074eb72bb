//! Business logic and repository trait definitions for cinechat.
//!
//! This crate defines the "ports" (repository and provider traits) that the
//! infrastructure layer implements, plus the turn pipeline that composes
//! them. It depends only on `cinechat-types` -- never on `cinechat-infra`
//! or any database/HTTP crate.

pub mod chat;
pub mod input;
pub mod llm;
