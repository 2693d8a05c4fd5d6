//! Configuration types for Folio.
//!
//! `FolioConfig` represents the top-level `folio.toml`. Every section and
//! field has a default, so an empty file (or no file) is a valid config.
//! Secrets are never part of this file; they come from the environment.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    pub server: ServerConfig,
    pub rate_limit: RateLimitConfig,
    pub context: ContextConfig,
    pub history: HistoryConfig,
    pub upstream: UpstreamConfig,
    pub scope: ScopeConfig,
    pub assistant: AssistantConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 4321,
        }
    }
}

/// Fixed-window rate limit settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Window length in seconds.
    pub window_secs: u64,
    /// Requests allowed per client per window.
    pub max_requests: u32,
    /// Cookie carrying the session id used as the preferred client identity.
    pub session_cookie: String,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_secs: 60,
            max_requests: 15,
            session_cookie: "folio_sid".to_string(),
        }
    }
}

/// Knowledge-context settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// How long an assembled context stays fresh, in seconds.
    pub ttl_secs: u64,
    /// Root of the content directory: `resume/` (any `.json`, `resume/en/`
    /// preferred), `projects/` and `blog/`.
    pub content_dir: PathBuf,
    pub max_posts: usize,
    pub max_projects: usize,
    /// Character cap for each post description.
    pub post_summary_chars: usize,
    /// Character cap for each project description.
    pub project_summary_chars: usize,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 300,
            content_dir: PathBuf::from("content"),
            max_posts: 8,
            max_projects: 12,
            post_summary_chars: 220,
            project_summary_chars: 240,
        }
    }
}

/// Caps applied to caller-supplied history before it is sent upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub max_turns: usize,
    pub max_chars: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_turns: 20,
            max_chars: 8_000,
        }
    }
}

/// Upstream chat-completion provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub timeout_secs: u64,
    /// Sent as `HTTP-Referer` for provider-side attribution.
    pub referer: String,
    /// Sent as `X-Title` for provider-side attribution.
    pub title: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://openrouter.ai/api/v1".to_string(),
            model: "openai/gpt-oss-20b:free".to_string(),
            temperature: 0.2,
            max_tokens: 800,
            timeout_secs: 60,
            referer: "http://localhost:4321".to_string(),
            title: "Folio Portfolio Assistant".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopeConfig {
    /// Deny terms appended to the built-in list.
    pub extra_deny_terms: Vec<String>,
}

/// Persona used in the system prompt and canned refusals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    pub name: String,
    /// Whose portfolio the assistant talks about.
    pub owner: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            name: "Folio".to_string(),
            owner: "the portfolio owner".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Skip the internal shared-secret check. Local development only.
    pub allow_unauthenticated: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = FolioConfig::default();
        assert_eq!(config.rate_limit.window_secs, 60);
        assert_eq!(config.rate_limit.max_requests, 15);
        assert_eq!(config.context.ttl_secs, 300);
        assert_eq!(config.context.max_posts, 8);
        assert_eq!(config.context.max_projects, 12);
        assert_eq!(config.upstream.max_tokens, 800);
        assert!(!config.auth.allow_unauthenticated);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: FolioConfig = toml::from_str(
            r#"
[rate_limit]
max_requests = 3

[scope]
extra_deny_terms = ["horoscope"]
"#,
        )
        .unwrap();
        assert_eq!(config.rate_limit.max_requests, 3);
        assert_eq!(config.rate_limit.window_secs, 60);
        assert_eq!(config.rate_limit.session_cookie, "folio_sid");
        assert_eq!(config.scope.extra_deny_terms, vec!["horoscope".to_string()]);
        assert_eq!(config.server.port, 4321);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: FolioConfig = toml::from_str("").unwrap();
        assert_eq!(config.history.max_turns, 20);
        assert_eq!(config.upstream.model, "openai/gpt-oss-20b:free");
    }
}
