//! Read-only inspection commands.

use folio_core::context::provider::{ContextLimits, PortfolioContextProvider};
use folio_infra::content::FileContentStore;
use folio_types::config::FolioConfig;

/// `folio config`
pub fn print_config(config: &FolioConfig) -> anyhow::Result<()> {
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

/// `folio context`
pub async fn print_context(config: &FolioConfig) -> anyhow::Result<()> {
    let provider = PortfolioContextProvider::new(
        FileContentStore::new(&config.context.content_dir),
        ContextLimits::from(&config.context),
    );
    let context = provider.build().await;
    if context.is_empty() {
        eprintln!(
            "No context could be built from {}",
            config.context.content_dir.display()
        );
    } else {
        println!("{context}");
    }
    Ok(())
}
