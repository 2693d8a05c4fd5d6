//! OpenRouterClient -- concrete [`CompletionClient`] for the OpenRouter
//! chat completions API.
//!
//! Sends one non-streaming `POST {base_url}/chat/completions` per call with
//! bearer authentication and attribution headers (`HTTP-Referer`,
//! `X-Title`). Model, temperature, and output cap come from
//! [`UpstreamConfig`]; callers cannot override them.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

pub mod types;

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tracing::Instrument;

use folio_core::llm::client::CompletionClient;
use folio_types::chat::ChatTurn;
use folio_types::config::UpstreamConfig;
use folio_types::error::UpstreamError;

use self::types::{OpenRouterRequest, OpenRouterResponse};

/// Maximum characters of an error body kept for diagnostics.
pub const ERROR_EXCERPT_CHARS: usize = 1000;

/// OpenRouter chat-completion client.
///
/// # API Key Security
///
/// The API key is stored as a [`SecretString`] and is only exposed when
/// constructing the `Authorization` header.
pub struct OpenRouterClient {
    client: reqwest::Client,
    api_key: Option<SecretString>,
    config: UpstreamConfig,
}

impl OpenRouterClient {
    /// Create a client. `api_key = None` produces an unconfigured client whose
    /// calls fail with [`UpstreamError::MissingCredential`].
    pub fn new(api_key: Option<SecretString>, config: UpstreamConfig) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| UpstreamError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            config,
        })
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }
}

// OpenRouterClient intentionally does NOT derive Debug. The SecretString
// already redacts itself, but the struct stays out of Debug output entirely.

impl CompletionClient for OpenRouterClient {
    fn name(&self) -> &str {
        "openrouter"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn complete(&self, messages: &[ChatTurn]) -> Result<String, UpstreamError> {
        let Some(api_key) = self.api_key.as_ref() else {
            return Err(UpstreamError::MissingCredential);
        };

        let body = OpenRouterRequest {
            model: &self.config.model,
            messages,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let span = tracing::info_span!(
            "gen_ai.complete",
            gen_ai.system = self.name(),
            gen_ai.request.model = %self.config.model,
            gen_ai.request.max_tokens = self.config.max_tokens,
            gen_ai.request.temperature = self.config.temperature,
            messages = messages.len(),
        );

        async move {
            let response = self
                .client
                .post(self.url())
                .bearer_auth(api_key.expose_secret())
                .header("HTTP-Referer", &self.config.referer)
                .header("X-Title", &self.config.title)
                .json(&body)
                .send()
                .await
                .map_err(|e| UpstreamError::Transport(format!("HTTP request failed: {e}")))?;

            let status = response.status();
            let text = response
                .text()
                .await
                .map_err(|e| UpstreamError::Transport(format!("failed to read response: {e}")))?;

            if !status.is_success() {
                let details: String = text.chars().take(ERROR_EXCERPT_CHARS).collect();
                tracing::warn!(status = status.as_u16(), details = %details, "upstream returned error status");
                return Err(UpstreamError::Status {
                    status: status.as_u16(),
                    details,
                });
            }

            let reply = match serde_json::from_str::<OpenRouterResponse>(&text) {
                Ok(parsed) => parsed.first_text(),
                Err(e) => {
                    tracing::warn!(error = %e, "unparseable upstream response, replying with empty text");
                    String::new()
                }
            };
            tracing::debug!(chars = reply.chars().count(), "upstream reply received");
            Ok(reply)
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use axum::Router;
    use axum::extract::State;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;

    #[derive(Clone, Default)]
    struct Recorded {
        hits: Arc<AtomicUsize>,
        last_headers: Arc<Mutex<Option<HeaderMap>>>,
        last_body: Arc<Mutex<Option<serde_json::Value>>>,
    }

    /// Start a mock upstream that always answers with `status` and `body`.
    async fn mock_upstream(status: StatusCode, body: String) -> (String, Recorded) {
        let recorded = Recorded::default();
        let app = Router::new()
            .route(
                "/chat/completions",
                post(
                    move |State(rec): State<Recorded>, headers: HeaderMap, payload: String| {
                        let body = body.clone();
                        async move {
                            rec.hits.fetch_add(1, Ordering::SeqCst);
                            *rec.last_headers.lock().unwrap() = Some(headers);
                            *rec.last_body.lock().unwrap() = serde_json::from_str(&payload).ok();
                            (status, body)
                        }
                    },
                ),
            )
            .with_state(recorded.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}"), recorded)
    }

    fn client(base_url: &str, key: Option<&str>) -> OpenRouterClient {
        let config = UpstreamConfig {
            base_url: base_url.to_string(),
            ..UpstreamConfig::default()
        };
        OpenRouterClient::new(key.map(|k| SecretString::from(k.to_string())), config).unwrap()
    }

    #[tokio::test]
    async fn success_returns_first_choice() {
        let (url, rec) = mock_upstream(
            StatusCode::OK,
            r#"{"choices":[{"message":{"role":"assistant","content":"Folio is written in Rust."}}]}"#
                .to_string(),
        )
        .await;

        let reply = client(&url, Some("sk-or-test"))
            .complete(&[ChatTurn::system("rules"), ChatTurn::user("what is folio?")])
            .await
            .unwrap();
        assert_eq!(reply, "Folio is written in Rust.");
        assert_eq!(rec.hits.load(Ordering::SeqCst), 1);

        let headers = rec.last_headers.lock().unwrap().clone().unwrap();
        assert_eq!(headers["authorization"], "Bearer sk-or-test");
        assert_eq!(headers["http-referer"], "http://localhost:4321");
        assert_eq!(headers["x-title"], "Folio Portfolio Assistant");

        let body = rec.last_body.lock().unwrap().clone().unwrap();
        assert_eq!(body["model"], "openai/gpt-oss-20b:free");
        assert_eq!(body["max_tokens"], 800);
        assert_eq!(body["temperature"], 0.2);
        assert_eq!(body["messages"][1]["content"], "what is folio?");
    }

    #[tokio::test]
    async fn error_status_carries_truncated_details() {
        let (url, _rec) = mock_upstream(StatusCode::SERVICE_UNAVAILABLE, "e".repeat(1500)).await;

        let err = client(&url, Some("k"))
            .complete(&[ChatTurn::user("hi")])
            .await
            .unwrap_err();
        match err {
            UpstreamError::Status { status, details } => {
                assert_eq!(status, 503);
                assert_eq!(details.len(), ERROR_EXCERPT_CHARS);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_success_body_is_empty_reply() {
        let (url, _rec) = mock_upstream(StatusCode::OK, "not json".to_string()).await;
        let reply = client(&url, Some("k")).complete(&[ChatTurn::user("hi")]).await.unwrap();
        assert_eq!(reply, "");
    }

    #[tokio::test]
    async fn missing_key_makes_no_request() {
        let (url, rec) = mock_upstream(StatusCode::OK, "{}".to_string()).await;
        let client = client(&url, None);
        assert!(!client.is_configured());

        let err = client.complete(&[ChatTurn::user("hi")]).await.unwrap_err();
        assert!(matches!(err, UpstreamError::MissingCredential));
        assert_eq!(rec.hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unreachable_upstream_is_transport_error() {
        // Bind then drop to get a port nobody listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(&format!("http://{addr}"), Some("k"))
            .complete(&[ChatTurn::user("hi")])
            .await
            .unwrap_err();
        assert!(matches!(err, UpstreamError::Transport(_)));
    }
}
