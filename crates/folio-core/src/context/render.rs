//! Plain-text rendering of portfolio content for the system prompt.
//!
//! Output is line-oriented and stable so the prompt size stays predictable:
//! lists are capped, descriptions truncated by character count.

use std::cmp::Ordering;

use folio_types::content::{Post, Project, Resume};

/// Responsibilities shown per experience entry.
const KEY_POINTS: usize = 3;
/// Technologies shown per project.
const TECH_SHOWN: usize = 6;
/// Key features shown per project.
const HIGHLIGHTS_SHOWN: usize = 3;

/// Truncate to at most `max` characters without splitting a code point.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Remove anything that looks like an HTML tag (`<...>`).
pub fn strip_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        match rest[start..].find('>') {
            // `<>` is not a tag
            Some(1) => {
                out.push_str("<>");
                rest = &rest[start + 2..];
            }
            Some(end) => rest = &rest[start + end + 1..],
            None => {
                rest = &rest[start..];
                break;
            }
        }
    }
    out.push_str(rest);
    out
}

pub fn render_resume(resume: &Resume) -> String {
    if resume.is_empty() {
        return String::new();
    }

    let mut lines = vec!["Resume:".to_string()];

    if !resume.certifications.is_empty() {
        let certs: Vec<String> = resume
            .certifications
            .iter()
            .map(|c| format!("{} ({})", c.title, c.year))
            .collect();
        lines.push(format!("Certifications: {}", certs.join(", ")));
    }

    if !resume.experience.is_empty() {
        let entries: Vec<String> = resume
            .experience
            .iter()
            .map(|e| {
                let points: Vec<&str> = e
                    .responsibilities
                    .iter()
                    .take(KEY_POINTS)
                    .map(String::as_str)
                    .collect();
                format!(
                    "- {} @ {} ({}, {})\n  Key points: {}",
                    e.title,
                    e.company,
                    e.dates,
                    e.location,
                    points.join("; ")
                )
            })
            .collect();
        lines.push(format!("Experience:\n{}", entries.join("\n")));
    }

    if !resume.hard_skills.is_empty() {
        let skills: Vec<&str> = resume.hard_skills.iter().map(|s| s.skill.as_str()).collect();
        lines.push(format!("Hard skills: {}", skills.join(", ")));
    }

    lines.join("\n")
}

/// Published projects, highest `order` first, then newest completion first.
/// Missing values sort last on both keys.
pub fn rank_projects(projects: &[Project], limit: usize) -> Vec<&Project> {
    let mut ranked: Vec<&Project> = projects.iter().filter(|p| !p.draft).collect();
    ranked.sort_by(|a, b| match rank_order(b.order, a.order) {
        Ordering::Equal => b.completion_date.cmp(&a.completion_date),
        other => other,
    });
    ranked.truncate(limit);
    ranked
}

/// Total order over optional ranks with `None` below every value.
fn rank_order(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

/// Published posts, newest first.
pub fn rank_posts(posts: &[Post], limit: usize) -> Vec<&Post> {
    let mut ranked: Vec<&Post> = posts.iter().filter(|p| !p.draft).collect();
    ranked.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));
    ranked.truncate(limit);
    ranked
}

pub fn render_projects(projects: &[Project], limit: usize, summary_chars: usize) -> String {
    let ranked = rank_projects(projects, limit);
    if ranked.is_empty() {
        return String::new();
    }

    let items: Vec<String> = ranked
        .iter()
        .map(|p| {
            let tech: Vec<&str> = p
                .technologies
                .iter()
                .take(TECH_SHOWN)
                .map(String::as_str)
                .collect();
            let highlights: Vec<&str> = p
                .key_features
                .iter()
                .take(HIGHLIGHTS_SHOWN)
                .map(String::as_str)
                .collect();
            format!(
                "- {} — {}\n  Tech: {}\n  Highlights: {}",
                p.title,
                truncate_chars(&p.description, summary_chars),
                tech.join(", "),
                highlights.join("; ")
            )
        })
        .collect();

    format!("Projects ({}):\n{}", items.len(), items.join("\n"))
}

pub fn render_posts(posts: &[Post], limit: usize, summary_chars: usize) -> String {
    let ranked = rank_posts(posts, limit);
    if ranked.is_empty() {
        return String::new();
    }

    let items: Vec<String> = ranked
        .iter()
        .map(|p| {
            let categories: Vec<&str> = p
                .categories
                .iter()
                .map(String::as_str)
                .filter(|c| !c.is_empty())
                .collect();
            let description = strip_html(&p.description);
            let description = truncate_chars(&description, summary_chars);
            if categories.is_empty() {
                format!("- {} — {}", p.title, description)
            } else {
                format!("- {} ({}) — {}", p.title, categories.join(", "), description)
            }
        })
        .collect();

    format!(
        "Blog posts (latest {}):\n{}",
        items.len(),
        items.join("\n")
    )
}
