//! Knowledge context: the portfolio summary embedded in every system prompt.
//!
//! - [`ContentStore`]: port for reading resume, project, and post records
//! - [`ContextSource`]: anything that can produce the context text
//! - [`provider::PortfolioContextProvider`]: builds the text from a store
//! - [`cache::ContextCache`]: TTL cache in front of a source

pub mod cache;
pub mod provider;
pub mod render;

use folio_types::content::{Post, Project, Resume};
use folio_types::error::ContentError;

/// Read access to portfolio content.
///
/// Implementations live in folio-infra (e.g., the filesystem store).
pub trait ContentStore: Send + Sync {
    fn resume(&self) -> impl std::future::Future<Output = Result<Resume, ContentError>> + Send;

    /// All projects, drafts included. Filtering and ordering happen in the
    /// provider.
    fn projects(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Project>, ContentError>> + Send;

    /// All posts, drafts included.
    fn posts(&self) -> impl std::future::Future<Output = Result<Vec<Post>, ContentError>> + Send;
}

/// Produces the context text. Infallible: sources degrade to empty text.
pub trait ContextSource: Send + Sync {
    fn load(&self) -> impl std::future::Future<Output = String> + Send;
}
