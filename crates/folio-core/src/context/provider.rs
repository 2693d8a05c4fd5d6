//! Builds the knowledge context from a [`ContentStore`].
//!
//! The three sections (resume, projects, posts) are fetched concurrently and
//! fail independently: a failed fetch is logged and contributes an empty
//! section instead of aborting the whole build.

use folio_types::config::ContextConfig;
use folio_types::error::ContentError;

use super::render::{render_posts, render_projects, render_resume};
use super::{ContentStore, ContextSource};

/// Size limits applied while rendering the context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextLimits {
    pub max_posts: usize,
    pub max_projects: usize,
    pub post_summary_chars: usize,
    pub project_summary_chars: usize,
}

impl Default for ContextLimits {
    fn default() -> Self {
        Self::from(&ContextConfig::default())
    }
}

impl From<&ContextConfig> for ContextLimits {
    fn from(config: &ContextConfig) -> Self {
        Self {
            max_posts: config.max_posts,
            max_projects: config.max_projects,
            post_summary_chars: config.post_summary_chars,
            project_summary_chars: config.project_summary_chars,
        }
    }
}

/// Map one section result to its text, or to an empty string on failure.
pub fn section_or_empty(section: &str, result: Result<String, ContentError>) -> String {
    match result {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(section, error = %e, "context section unavailable, using empty section");
            String::new()
        }
    }
}

/// Join non-empty sections with a blank line.
pub fn join_sections<I>(sections: I) -> String
where
    I: IntoIterator<Item = String>,
{
    sections
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub struct PortfolioContextProvider<S> {
    store: S,
    limits: ContextLimits,
}

impl<S: ContentStore> PortfolioContextProvider<S> {
    pub fn new(store: S, limits: ContextLimits) -> Self {
        Self { store, limits }
    }

    /// Fetch and render all sections. Order: resume, projects, posts.
    pub async fn build(&self) -> String {
        let limits = self.limits;
        let (resume, projects, posts) = tokio::join!(
            async { self.store.resume().await.map(|r| render_resume(&r)) },
            async {
                self.store.projects().await.map(|p| {
                    render_projects(&p, limits.max_projects, limits.project_summary_chars)
                })
            },
            async {
                self.store
                    .posts()
                    .await
                    .map(|p| render_posts(&p, limits.max_posts, limits.post_summary_chars))
            },
        );

        join_sections([
            section_or_empty("resume", resume),
            section_or_empty("projects", projects),
            section_or_empty("posts", posts),
        ])
    }
}

impl<S: ContentStore> ContextSource for PortfolioContextProvider<S> {
    async fn load(&self) -> String {
        let context = self.build().await;
        tracing::debug!(chars = context.chars().count(), "built portfolio context");
        context
    }
}
