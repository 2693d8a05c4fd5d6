//! Filesystem implementation of [`ContentStore`].
//!
//! Layout under the content root:
//! ```text
//! {root}/resume/en/resume.json   resume document (any .json; `en/` preferred)
//! {root}/projects/**/*.md        one project per file
//! {root}/blog/**/*.md            one post per file
//! ```
//! `.mdx` files are read the same way as `.md`.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use folio_core::context::ContentStore;
use folio_types::content::{Post, Project, Resume};
use folio_types::error::ContentError;

use super::parse_frontmatter;

const RESUME_DIR: &str = "resume";
const PROJECTS_DIR: &str = "projects";
const BLOG_DIR: &str = "blog";
const PREFERRED_LOCALE: &str = "en";

/// Reads portfolio content from a directory tree with `tokio::fs`.
#[derive(Debug, Clone)]
pub struct FileContentStore {
    root: PathBuf,
}

impl FileContentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Parse every Markdown entry under `dir`.
    ///
    /// A missing directory yields no entries. Entries that fail to read or
    /// parse are skipped with a warning so one bad file cannot hide the rest.
    async fn load_entries<T: DeserializeOwned>(&self, dir: &str) -> Result<Vec<T>, ContentError> {
        let base = self.root.join(dir);
        let files = match collect_files(&base, &["md", "mdx"]).await {
            Ok(files) => files,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(dir = %base.display(), "content directory missing, no entries");
                return Ok(Vec::new());
            }
            Err(e) => return Err(ContentError::Io(format!("{}: {e}", base.display()))),
        };

        let mut entries = Vec::with_capacity(files.len());
        for path in files {
            let shown = path.display().to_string();
            let content = match tokio::fs::read_to_string(&path).await {
                Ok(content) => content,
                Err(e) => {
                    tracing::warn!(path = %shown, error = %e, "skipping unreadable content file");
                    continue;
                }
            };
            match parse_frontmatter::<T>(&shown, &content) {
                Ok(entry) => entries.push(entry),
                Err(e) => tracing::warn!(error = %e, "skipping content entry"),
            }
        }
        Ok(entries)
    }
}

impl ContentStore for FileContentStore {
    async fn resume(&self) -> Result<Resume, ContentError> {
        let base = self.root.join(RESUME_DIR);
        let files = collect_files(&base, &["json"]).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ContentError::NotFound(base.display().to_string())
            } else {
                ContentError::Io(format!("{}: {e}", base.display()))
            }
        })?;

        let preferred = base.join(PREFERRED_LOCALE);
        let pick = files
            .iter()
            .find(|p| p.starts_with(&preferred))
            .or_else(|| files.first())
            .ok_or_else(|| ContentError::NotFound(base.display().to_string()))?;

        let raw = tokio::fs::read_to_string(pick)
            .await
            .map_err(|e| ContentError::Io(format!("{}: {e}", pick.display())))?;
        serde_json::from_str(&raw).map_err(|e| ContentError::Parse {
            path: pick.display().to_string(),
            message: e.to_string(),
        })
    }

    async fn projects(&self) -> Result<Vec<Project>, ContentError> {
        self.load_entries(PROJECTS_DIR).await
    }

    async fn posts(&self) -> Result<Vec<Post>, ContentError> {
        self.load_entries(BLOG_DIR).await
    }
}

/// Recursively list files under `dir` with one of `extensions`, sorted by path.
async fn collect_files(dir: &Path, extensions: &[&str]) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut pending = vec![dir.to_path_buf()];

    while let Some(current) = pending.pop() {
        let mut entries = tokio::fs::read_dir(&current).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let file_type = entry.file_type().await?;
            if file_type.is_dir() {
                pending.push(path);
            } else if path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| extensions.contains(&ext))
            {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}
