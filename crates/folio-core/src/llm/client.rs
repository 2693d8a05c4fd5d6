//! CompletionClient trait definition.

use folio_types::chat::ChatTurn;
use folio_types::error::UpstreamError;

/// A chat-completion backend.
///
/// Model and generation parameters belong to the implementation, never to the
/// caller. One call is one upstream attempt; retries are the caller's
/// business.
pub trait CompletionClient: Send + Sync {
    /// Provider name for logs (e.g., "openrouter").
    fn name(&self) -> &str;

    /// Whether a credential is available. When false, `complete` fails with
    /// [`UpstreamError::MissingCredential`] without any network I/O.
    fn is_configured(&self) -> bool;

    /// Send `messages` and return the first completion's text.
    ///
    /// A successful response without usable text yields `Ok("")`.
    fn complete(
        &self,
        messages: &[ChatTurn],
    ) -> impl std::future::Future<Output = Result<String, UpstreamError>> + Send;
}
