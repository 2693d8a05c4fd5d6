//! Application state wiring the chat pipeline together.
//!
//! `ChatService` is generic over its context source and completion client;
//! AppState pins it to the filesystem content store and the OpenRouter client.

use std::sync::Arc;
use std::time::Duration;

use folio_core::chat::service::ChatService;
use folio_core::clock::Clock;
use folio_core::context::cache::ContextCache;
use folio_core::context::provider::{ContextLimits, PortfolioContextProvider};
use folio_core::prompt::PromptAssembler;
use folio_core::rate_limit::RateLimiter;
use folio_core::scope::ScopeClassifier;
use folio_infra::content::FileContentStore;
use folio_infra::llm::openrouter::OpenRouterClient;
use folio_infra::secret::Secrets;
use folio_types::config::FolioConfig;

use crate::http::extractors::auth::InternalGate;

pub type ConcreteContextSource = PortfolioContextProvider<FileContentStore>;

pub type ConcreteChatService = ChatService<ConcreteContextSource, OpenRouterClient>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub gate: Arc<InternalGate>,
    pub session_cookie: Arc<str>,
}

impl AppState {
    /// Build every pipeline component from config and secrets.
    pub fn new(config: &FolioConfig, secrets: Secrets, clock: Arc<dyn Clock>) -> anyhow::Result<Self> {
        let provider = PortfolioContextProvider::new(
            FileContentStore::new(&config.context.content_dir),
            ContextLimits::from(&config.context),
        );
        let context = ContextCache::new(
            provider,
            Duration::from_secs(config.context.ttl_secs),
            clock.clone(),
        );

        if secrets.openrouter_api_key.is_none() {
            tracing::warn!("OPENROUTER_API_KEY is not set; in-scope chat requests will fail");
        }
        let client = OpenRouterClient::new(secrets.openrouter_api_key, config.upstream.clone())?;

        let chat_service = ChatService::new(
            RateLimiter::from_config(&config.rate_limit, clock),
            ScopeClassifier::new(&config.scope.extra_deny_terms),
            context,
            PromptAssembler::new(&config.assistant),
            client,
            config.history.clone(),
        );

        Ok(Self {
            chat_service: Arc::new(chat_service),
            gate: Arc::new(InternalGate::new(
                secrets.internal_token,
                config.auth.allow_unauthenticated,
            )),
            session_cookie: Arc::from(config.rate_limit.session_cookie.as_str()),
        })
    }

    /// Drop the cached portfolio context so the next chat request re-reads
    /// the content directory.
    pub async fn reload_context(&self) {
        self.chat_service.context().invalidate().await;
        tracing::info!("portfolio context cache invalidated");
    }
}
