//! Session identity.
//!
//! A session is identified by an opaque string key issued by the transport
//! layer (a cookie at the HTTP edge, a positional argument in the CLI).
//! The core only relies on the key being stable across a client's requests.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque per-client session identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl SessionId {
    /// Wrap an opaque key supplied by the transport layer.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
