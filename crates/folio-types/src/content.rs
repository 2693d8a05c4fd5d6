//! Portfolio content records read from the content store.
//!
//! Field names follow the camelCase keys used in content frontmatter and the
//! resume JSON document (`keyFeatures`, `completionDate`, `pubDate`, ...).

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// The resume document. Every list may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Resume {
    pub certifications: Vec<Certification>,
    pub experience: Vec<Experience>,
    pub hard_skills: Vec<HardSkill>,
}

impl Resume {
    pub fn is_empty(&self) -> bool {
        self.certifications.is_empty() && self.experience.is_empty() && self.hard_skills.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub title: String,
    #[serde(deserialize_with = "string_or_number")]
    pub year: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub dates: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub responsibilities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardSkill {
    pub skill: String,
}

/// A portfolio project.
///
/// `order` is a manual display rank (fractional values allowed): higher sorts
/// first, missing sorts last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub key_features: Vec<String>,
    #[serde(default)]
    pub order: Option<f64>,
    #[serde(default)]
    pub completion_date: Option<NaiveDate>,
    #[serde(default)]
    pub draft: bool,
}

/// A blog post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub categories: Vec<String>,
    pub pub_date: NaiveDate,
    #[serde(default)]
    pub draft: bool,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resume_accepts_numeric_and_string_years() {
        let resume: Resume = serde_json::from_str(
            r#"{
                "certifications": [
                    {"title": "CKA", "year": 2023},
                    {"title": "AWS SAA", "year": "2021"}
                ],
                "hardSkills": [{"skill": "Rust"}]
            }"#,
        )
        .unwrap();
        assert_eq!(resume.certifications[0].year, "2023");
        assert_eq!(resume.certifications[1].year, "2021");
        assert_eq!(resume.hard_skills[0].skill, "Rust");
        assert!(resume.experience.is_empty());
    }

    #[test]
    fn empty_resume() {
        let resume: Resume = serde_json::from_str("{}").unwrap();
        assert!(resume.is_empty());
    }

    #[test]
    fn project_optional_fields_default() {
        let project: Project = serde_json::from_str(r#"{"title": "Folio"}"#).unwrap();
        assert_eq!(project.order, None);
        assert_eq!(project.completion_date, None);
        assert!(!project.draft);
        assert!(project.technologies.is_empty());
    }

    #[test]
    fn post_parses_date() {
        let post: Post =
            serde_json::from_str(r#"{"title": "Hello", "pubDate": "2024-05-02"}"#).unwrap();
        assert_eq!(post.pub_date, NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
    }
}
