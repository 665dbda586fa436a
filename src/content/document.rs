//! Content document model

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use super::FrontMatter;

/// Kind of a content document, inferred from its location under the
/// content root. The kind decides which front-matter keys are required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Post,
    Page,
    AuthorProfile,
    SiteSettings,
}

impl DocumentKind {
    /// Front-matter keys that must be present for this kind
    pub fn required_keys(&self) -> &'static [&'static str] {
        match self {
            DocumentKind::Post => &["title", "date", "author"],
            DocumentKind::Page => &["title"],
            DocumentKind::AuthorProfile => &["title"],
            DocumentKind::SiteSettings => &[],
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentKind::Post => "post",
            DocumentKind::Page => "page",
            DocumentKind::AuthorProfile => "author",
            DocumentKind::SiteSettings => "settings",
        };
        write!(f, "{}", name)
    }
}

/// A single content document: structured front matter plus a markdown body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentDocument {
    /// Unique store key: content-root-relative path without extension,
    /// `/`-separated. Assigned at load, never mutated.
    pub path: String,

    pub kind: DocumentKind,

    pub front_matter: FrontMatter,

    /// Free-text markdown body; empty for pure-data documents
    pub body: String,

    /// Source file on disk
    pub source: PathBuf,
}

impl ContentDocument {
    /// Publication date, if the `date` field is present and parses
    pub fn date(&self) -> Option<DateTime<Local>> {
        self.front_matter.parse_date()
    }

    /// Whether this document is flagged as a draft
    pub fn is_draft(&self) -> bool {
        self.front_matter.draft
    }

    /// Title, falling back to the last path segment
    pub fn title(&self) -> &str {
        self.front_matter
            .title
            .as_deref()
            .unwrap_or_else(|| self.path.rsplit('/').next().unwrap_or(&self.path))
    }

    /// Body content before the `<!-- more -->` marker, if present
    pub fn excerpt(&self) -> Option<&str> {
        self.body.split("<!-- more -->").next().and_then(|head| {
            if self.body.contains("<!-- more -->") {
                Some(head.trim_end())
            } else {
                None
            }
        })
    }

    /// Serialize back to the on-disk file format
    pub fn to_file_string(&self) -> anyhow::Result<String> {
        self.front_matter.to_file_string(&self.body)
    }
}

/// Call-to-action button nested inside banner/feature structures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Button {
    pub enable: bool,
    pub label: String,
    pub link: String,
}

/// Homepage banner section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Banner {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button: Option<Button>,
}

/// A single feature block on a landing page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Feature {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bulletpoints: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button: Option<Button>,
}

/// A testimonial entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Testimonial {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(kind: DocumentKind, path: &str) -> ContentDocument {
        ContentDocument {
            path: path.to_string(),
            kind,
            front_matter: FrontMatter::default(),
            body: String::new(),
            source: PathBuf::from(format!("content/{}.md", path)),
        }
    }

    #[test]
    fn test_required_keys_per_kind() {
        assert_eq!(
            DocumentKind::Post.required_keys(),
            &["title", "date", "author"]
        );
        assert_eq!(DocumentKind::Page.required_keys(), &["title"]);
        assert_eq!(DocumentKind::AuthorProfile.required_keys(), &["title"]);
        assert!(DocumentKind::SiteSettings.required_keys().is_empty());
    }

    #[test]
    fn test_title_falls_back_to_path_segment() {
        let d = doc(DocumentKind::Page, "about/index");
        assert_eq!(d.title(), "index");

        let mut titled = doc(DocumentKind::Page, "about");
        titled.front_matter.title = Some("About Us".to_string());
        assert_eq!(titled.title(), "About Us");
    }

    #[test]
    fn test_excerpt_split() {
        let mut d = doc(DocumentKind::Post, "blog/hello");
        d.body = "Intro paragraph.\n\n<!-- more -->\n\nThe rest.".to_string();
        assert_eq!(d.excerpt(), Some("Intro paragraph."));

        d.body = "No marker here.".to_string();
        assert_eq!(d.excerpt(), None);
    }

    #[test]
    fn test_button_schema() {
        let value: serde_yaml::Value = serde_yaml::from_str(
            r#"
enable: true
label: Get Started
link: /signup
"#,
        )
        .unwrap();
        let button: Button = serde_yaml::from_value(value).unwrap();
        assert!(button.enable);
        assert_eq!(button.label, "Get Started");
    }

    #[test]
    fn test_feature_rejects_unknown_fields() {
        let value: serde_yaml::Value = serde_yaml::from_str(
            r#"
title: Fast builds
unexpected: nope
"#,
        )
        .unwrap();
        assert!(serde_yaml::from_value::<Feature>(value).is_err());
    }
}
