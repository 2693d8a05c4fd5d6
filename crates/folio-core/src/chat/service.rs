//! Chat service running one validated request through the pipeline.
//!
//! Order: rate limit, scope, credential, context, prompt, upstream. Each stage
//! may end the request. HTTP concerns (auth, method, body parsing) stay in
//! the API layer.

use folio_types::chat::{ChatReply, ChatTurn};
use folio_types::config::HistoryConfig;
use folio_types::error::UpstreamError;

use crate::context::ContextSource;
use crate::context::cache::ContextCache;
use crate::llm::client::CompletionClient;
use crate::prompt::{PromptAssembler, bound_history};
use crate::rate_limit::{ClientKey, RateDecision, RateLimiter};
use crate::scope::ScopeClassifier;

/// Non-error result of a chat request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOutcome {
    /// The client exhausted its window.
    RateLimited { retry_after_secs: u64 },
    /// Canned refusal; no upstream call was made.
    OutOfScope(ChatReply),
    /// Upstream answer.
    Answered(ChatReply),
}

/// Orchestrates the pipeline stages.
///
/// Generic over the context source and the completion client so that
/// folio-core never depends on folio-infra.
pub struct ChatService<S: ContextSource, C: CompletionClient> {
    limiter: RateLimiter,
    scope: ScopeClassifier,
    context: ContextCache<S>,
    prompt: PromptAssembler,
    client: C,
    history: HistoryConfig,
}

impl<S: ContextSource, C: CompletionClient> ChatService<S, C> {
    pub fn new(
        limiter: RateLimiter,
        scope: ScopeClassifier,
        context: ContextCache<S>,
        prompt: PromptAssembler,
        client: C,
        history: HistoryConfig,
    ) -> Self {
        Self {
            limiter,
            scope,
            context,
            prompt,
            client,
            history,
        }
    }

    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    pub fn context(&self) -> &ContextCache<S> {
        &self.context
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Run `message` (already validated non-empty) with caller `history`.
    pub async fn handle(
        &self,
        key: &ClientKey,
        message: &str,
        history: Vec<ChatTurn>,
    ) -> Result<ChatOutcome, UpstreamError> {
        if let RateDecision::Denied { retry_after_secs } = self.limiter.check(key) {
            tracing::info!(client = key.as_str(), retry_after_secs, "rate limit exceeded");
            return Ok(ChatOutcome::RateLimited { retry_after_secs });
        }

        if !self.scope.is_in_scope(message) {
            tracing::info!(term = self.scope.matched_term(message), "message out of scope");
            return Ok(ChatOutcome::OutOfScope(self.refusal()));
        }

        if !self.client.is_configured() {
            tracing::error!(provider = self.client.name(), "upstream credential missing");
            return Err(UpstreamError::MissingCredential);
        }

        let context = self.context.get().await;
        let supplied = history.len();
        let history = bound_history(history, self.history.max_turns, self.history.max_chars);
        if history.len() < supplied {
            tracing::debug!(supplied, kept = history.len(), "history trimmed");
        }

        let messages = self.prompt.build_messages(&context, &history, message);
        let reply = self.client.complete(&messages).await?;

        Ok(ChatOutcome::Answered(ChatReply {
            in_scope: true,
            reply,
        }))
    }

    fn refusal(&self) -> ChatReply {
        ChatReply {
            in_scope: false,
            reply: self.prompt.refusal(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use folio_types::chat::ChatRole;
    use folio_types::config::AssistantConfig;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[derive(Default)]
    struct FixedSource {
        loads: AtomicUsize,
    }

    impl ContextSource for FixedSource {
        async fn load(&self) -> String {
            self.loads.fetch_add(1, Ordering::SeqCst);
            "Projects (1):\n- Folio".to_string()
        }
    }

    struct RecordingClient {
        configured: bool,
        fail_with: Option<u16>,
        calls: Mutex<Vec<Vec<ChatTurn>>>,
    }

    impl RecordingClient {
        fn new(configured: bool) -> Self {
            Self {
                configured,
                fail_with: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl CompletionClient for RecordingClient {
        fn name(&self) -> &str {
            "recording"
        }

        fn is_configured(&self) -> bool {
            self.configured
        }

        async fn complete(&self, messages: &[ChatTurn]) -> Result<String, UpstreamError> {
            self.calls.lock().unwrap().push(messages.to_vec());
            match self.fail_with {
                Some(status) => Err(UpstreamError::Status {
                    status,
                    details: "boom".into(),
                }),
                None => Ok("Folio is a Rust service.".into()),
            }
        }
    }

    fn service(client: RecordingClient, max_requests: u32) -> ChatService<FixedSource, RecordingClient> {
        let clock = Arc::new(ManualClock::new());
        ChatService::new(
            RateLimiter::new(Duration::from_secs(60), max_requests, clock.clone()),
            ScopeClassifier::default(),
            ContextCache::new(FixedSource::default(), Duration::from_secs(300), clock),
            PromptAssembler::new(&AssistantConfig::default()),
            client,
            HistoryConfig {
                max_turns: 2,
                max_chars: 1_000,
            },
        )
    }

    #[tokio::test]
    async fn answers_in_scope_message() {
        let svc = service(RecordingClient::new(true), 15);
        let key = ClientKey::from("k");
        let outcome = svc
            .handle(&key, "What is Folio?", vec![ChatTurn::user("hi")])
            .await
            .unwrap();

        assert_eq!(
            outcome,
            ChatOutcome::Answered(ChatReply {
                in_scope: true,
                reply: "Folio is a Rust service.".into()
            })
        );
        let calls = svc.client().calls.lock().unwrap();
        let sent = &calls[0];
        assert_eq!(sent.len(), 3);
        assert_eq!(sent[0].role, ChatRole::System);
        assert!(sent[0].content.contains("- Folio"));
        assert_eq!(sent[2], ChatTurn::user("What is Folio?"));
    }

    #[tokio::test]
    async fn out_of_scope_skips_upstream_and_context() {
        let svc = service(RecordingClient::new(true), 15);
        let outcome = svc
            .handle(&ClientKey::from("k"), "Tell me about your weather forecast skills", vec![])
            .await
            .unwrap();

        match outcome {
            ChatOutcome::OutOfScope(reply) => {
                assert!(!reply.in_scope);
                assert!(reply.reply.contains("projects, blog posts, or resume"));
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_eq!(svc.client().call_count(), 0);
        assert_eq!(svc.context().source().loads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn rate_limit_precedes_scope() {
        let svc = service(RecordingClient::new(true), 1);
        let key = ClientKey::from("k");
        svc.handle(&key, "weather?", vec![]).await.unwrap();
        let outcome = svc.handle(&key, "weather?", vec![]).await.unwrap();
        assert_eq!(outcome, ChatOutcome::RateLimited { retry_after_secs: 60 });
    }

    #[tokio::test]
    async fn missing_credential_fails_before_context() {
        let svc = service(RecordingClient::new(false), 15);
        let err = svc
            .handle(&ClientKey::from("k"), "What is Folio?", vec![])
            .await
            .unwrap_err();
        assert!(matches!(err, UpstreamError::MissingCredential));
        assert_eq!(svc.client().call_count(), 0);
        assert_eq!(svc.context().source().loads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn upstream_error_propagates() {
        let mut client = RecordingClient::new(true);
        client.fail_with = Some(503);
        let svc = service(client, 15);
        let err = svc
            .handle(&ClientKey::from("k"), "What is Folio?", vec![])
            .await
            .unwrap_err();
        assert!(matches!(err, UpstreamError::Status { status: 503, .. }));
    }

    #[tokio::test]
    async fn history_is_bounded_before_sending() {
        let svc = service(RecordingClient::new(true), 15);
        let history = vec![
            ChatTurn::user("one"),
            ChatTurn::assistant("two"),
            ChatTurn::user("three"),
        ];
        svc.handle(&ClientKey::from("k"), "four", history).await.unwrap();

        let calls = svc.client().calls.lock().unwrap();
        let contents: Vec<&str> = calls[0][1..].iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, vec!["two", "three", "four"]);
    }
}
