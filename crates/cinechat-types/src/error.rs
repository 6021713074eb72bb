use thiserror::Error;

/// Errors from conversation storage operations (used by trait definitions
/// in cinechat-core).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),
}

/// Fatal configuration errors detected at startup.
///
/// This is the only error class allowed to terminate the process: a missing
/// provider credential means every turn would fail, so refusing to start is
/// better than serving a broken assistant.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing provider credential: set {0}")]
    MissingCredential(&'static str),
}
