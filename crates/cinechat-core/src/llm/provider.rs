//! Completion provider port.

use cinechat_types::llm::{CompletionRequest, CompletionResponse, ProviderError};

/// A chat completion backend.
///
/// One call per turn: the full transcript goes out, one assistant message
/// comes back. Implementations must not retry internally; failure handling
/// belongs to the turn service so a failed call degrades to a fallback reply
/// instead of stacking retries on a slow provider.
pub trait LlmProvider: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Generate a completion for the given request.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, ProviderError>> + Send;
}
