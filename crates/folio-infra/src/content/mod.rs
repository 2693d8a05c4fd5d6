//! Portfolio content adapters.
//!
//! Projects and posts are Markdown files whose metadata lives in YAML
//! frontmatter:
//! ```text
//! ---
//! title: Folio
//! description: Portfolio assistant
//! technologies: [Rust, axum]
//! order: 3
//! ---
//! # Folio
//! ...
//! ```
//! Only the frontmatter is read; Markdown bodies are ignored.

pub mod filesystem;

use serde::de::DeserializeOwned;

use folio_types::error::ContentError;

pub use filesystem::FileContentStore;

/// Split a document into `(frontmatter, body)`.
///
/// Returns `None` when the document has no `---` delimited frontmatter.
pub fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let trimmed = content.trim_start_matches('\u{feff}').trim_start();
    let after_opening = trimmed.strip_prefix("---")?;
    let closing_pos = after_opening.find("\n---")?;
    let frontmatter = after_opening[..closing_pos].trim();
    let body = after_opening[closing_pos + 4..].trim_start_matches(['\n', '\r']);

    Some((frontmatter, body))
}

/// Deserialize the frontmatter of `content` into `T`.
///
/// `path` is only used for error messages.
pub fn parse_frontmatter<T: DeserializeOwned>(path: &str, content: &str) -> Result<T, ContentError> {
    let (yaml, _body) = split_frontmatter(content).ok_or_else(|| ContentError::Parse {
        path: path.to_string(),
        message: "missing frontmatter".to_string(),
    })?;

    serde_yaml_ng::from_str(yaml).map_err(|e| ContentError::Parse {
        path: path.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use folio_types::content::{Post, Project};

    #[test]
    fn splits_frontmatter_and_body() {
        let doc = "---\ntitle: Hello\n---\n# Body\ntext";
        let (fm, body) = split_frontmatter(doc).unwrap();
        assert_eq!(fm, "title: Hello");
        assert_eq!(body, "# Body\ntext");
    }

    #[test]
    fn no_frontmatter_is_none() {
        assert!(split_frontmatter("# Just markdown").is_none());
        assert!(split_frontmatter("---\ntitle: unterminated").is_none());
    }

    #[test]
    fn parses_project_frontmatter() {
        let doc = r#"---
title: Folio
description: Portfolio assistant
technologies: [Rust, axum]
keyFeatures:
  - Scope filter
  - Rate limiting
order: 2
completionDate: 2024-05-01
---
Body is ignored.
"#;
        let project: Project = parse_frontmatter("projects/folio.md", doc).unwrap();
        assert_eq!(project.title, "Folio");
        assert_eq!(project.technologies, vec!["Rust", "axum"]);
        assert_eq!(project.key_features.len(), 2);
        assert_eq!(project.order, Some(2.0));
        assert_eq!(project.completion_date, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert!(!project.draft);
    }

    #[test]
    fn parses_post_frontmatter() {
        let doc = "---\ntitle: Hello\npubDate: 2024-01-15\ncategories: [rust]\ndraft: true\n---\n";
        let post: Post = parse_frontmatter("blog/hello.md", doc).unwrap();
        assert_eq!(post.pub_date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert!(post.draft);
    }

    #[test]
    fn invalid_frontmatter_reports_path() {
        let err = parse_frontmatter::<Post>("blog/bad.md", "---\ntitle: [unclosed\n---\n").unwrap_err();
        assert!(err.to_string().contains("blog/bad.md"));

        let err = parse_frontmatter::<Post>("blog/plain.md", "no frontmatter").unwrap_err();
        assert!(err.to_string().contains("missing frontmatter"));
    }
}
