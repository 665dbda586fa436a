//! Front-matter parsing and serialization

use anyhow::{anyhow, Result};
use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Front-matter metadata from a content document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Raw date string; parsed lazily so an unparsable value can be
    /// reported at validation time instead of being coerced
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(
        deserialize_with = "string_or_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub categories: Vec<String>,

    #[serde(
        deserialize_with = "string_or_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tags: Vec<String>,

    /// Drafts are excluded from published listings; false unless stated
    #[serde(skip_serializing_if = "is_false")]
    pub draft: bool,

    /// Additional custom fields, in file order so serialization round-trips
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front-matter from the head of a content file.
    /// Returns (front_matter, remaining_body).
    ///
    /// A file with no leading metadata block yields a default front matter
    /// and the untouched content; a block that opens but is syntactically
    /// broken is an error.
    pub fn parse(content: &str) -> Result<(Self, &str)> {
        let content = content.trim_start();

        // YAML front-matter (---)
        if content.starts_with("---") {
            return Self::parse_yaml(content);
        }

        // JSON front-matter (;;; or {"key":)
        if content.starts_with(";;;") || content.starts_with('{') {
            return Self::parse_json(content);
        }

        Ok((FrontMatter::default(), content))
    }

    fn parse_yaml(content: &str) -> Result<(Self, &str)> {
        let rest = &content[3..]; // Skip opening ---
        let rest = rest.trim_start_matches(['\n', '\r']);

        let Some(end_pos) = rest.find("\n---") else {
            return Err(anyhow!("unterminated front matter (no closing ---)"));
        };

        let yaml_content = &rest[..end_pos];
        let remaining = &rest[end_pos + 4..]; // Skip \n---
        let remaining = remaining.trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), remaining));
        }

        let fm = serde_yaml::from_str::<FrontMatter>(yaml_content)
            .map_err(|e| anyhow!("invalid YAML: {}", e))?;
        Ok((fm, remaining))
    }

    fn parse_json(content: &str) -> Result<(Self, &str)> {
        // JSON front-matter fenced with ;;;
        if let Some(rest) = content.strip_prefix(";;;") {
            let Some(end_pos) = rest.find(";;;") else {
                return Err(anyhow!("unterminated front matter (no closing ;;;)"));
            };
            let json_content = &rest[..end_pos];
            let remaining = &rest[end_pos + 3..];
            let remaining = remaining.trim_start_matches(['\n', '\r']);

            let fm: FrontMatter = serde_json::from_str(json_content)
                .map_err(|e| anyhow!("invalid JSON: {}", e))?;

            return Ok((fm, remaining));
        }

        // Bare JSON object at the start of the file
        let mut depth = 0;
        let mut end_pos = 0;
        for (i, c) in content.char_indices() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        end_pos = i + 1;
                        break;
                    }
                }
                _ => {}
            }
        }

        if end_pos == 0 {
            return Err(anyhow!("unterminated front matter (unbalanced braces)"));
        }

        let json_content = &content[..end_pos];
        let remaining = &content[end_pos..];
        let remaining = remaining.trim_start_matches(['\n', '\r']);

        let fm: FrontMatter =
            serde_json::from_str(json_content).map_err(|e| anyhow!("invalid JSON: {}", e))?;

        Ok((fm, remaining))
    }

    /// Parse the date string into a DateTime
    pub fn parse_date(&self) -> Option<DateTime<Local>> {
        self.date.as_ref().and_then(|s| parse_date_string(s))
    }

    /// Re-emit this front matter as a fenced YAML block followed by the body
    pub fn to_file_string(&self, body: &str) -> Result<String> {
        let yaml = serde_yaml::to_string(self)?;
        Ok(format!("---\n{}---\n\n{}", yaml, body))
    }
}

/// Parse a date string in various formats
pub fn parse_date_string(s: &str) -> Option<DateTime<Local>> {
    let s = s.trim();

    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%z",
        "%Y-%m-%dT%H:%M:%S%.f%z",
    ];

    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return local_from_wall_clock(dt);
        }
        // Try parsing date only
        if let Ok(d) = chrono::NaiveDate::parse_from_str(s, fmt) {
            let dt = d.and_hms_opt(0, 0, 0)?;
            return local_from_wall_clock(dt);
        }
    }

    // RFC 3339 / ISO 8601
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local));
    }

    None
}

/// A naive front-matter datetime is the author's wall clock, so resolve
/// it in the local timezone rather than treating it as a UTC instant.
fn local_from_wall_clock(dt: NaiveDateTime) -> Option<DateTime<Local>> {
    match Local.from_local_datetime(&dt) {
        chrono::LocalResult::Single(t) => Some(t),
        // DST fold: either side keeps the same wall-clock value
        chrono::LocalResult::Ambiguous(t, _) => Some(t),
        chrono::LocalResult::None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
date: 2024-01-15 10:30:00
tags:
  - rust
  - blog
categories:
  - programming
---

This is the content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, Some("Hello World".to_string()));
        assert_eq!(fm.tags, vec!["rust", "blog"]);
        assert_eq!(fm.categories, vec!["programming"]);
        assert!(!fm.draft);
        assert!(remaining.contains("This is the content."));
    }

    #[test]
    fn test_parse_json_frontmatter() {
        let content = r#"{"title": "Test Post", "tags": ["a", "b"]}

This is content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, Some("Test Post".to_string()));
        assert_eq!(fm.tags, vec!["a", "b"]);
        assert!(remaining.contains("This is content."));
    }

    #[test]
    fn test_parse_fenced_json_frontmatter() {
        let content = ";;;\n{\"title\": \"Fenced\", \"draft\": true}\n;;;\n\nBody text.\n";

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, Some("Fenced".to_string()));
        assert!(fm.draft);
        assert!(remaining.contains("Body text."));
    }

    #[test]
    fn test_parse_single_string_tags() {
        let content = r#"---
title: Single Tag Post
date: 2024-01-15
tags: Notes
categories: Blog
---

Content here.
"#;

        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.tags, vec!["Notes"]);
        assert_eq!(fm.categories, vec!["Blog"]);
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "Just a plain markdown file.\n";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm, FrontMatter::default());
        assert!(remaining.contains("plain markdown"));
    }

    #[test]
    fn test_unterminated_block_is_error() {
        let content = "---\ntitle: Broken\n\nNo closing fence here.\n";
        assert!(FrontMatter::parse(content).is_err());
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        let content = "---\ntitle: [unclosed\n---\n\nBody.\n";
        let err = FrontMatter::parse(content).unwrap_err();
        assert!(err.to_string().contains("invalid YAML"));
    }

    #[test]
    fn test_parse_date() {
        let fm = FrontMatter {
            date: Some("2024-01-15 10:30:00".to_string()),
            ..Default::default()
        };

        let dt = fm.parse_date().unwrap();
        assert_eq!(dt.format("%Y-%m-%d").to_string(), "2024-01-15");
    }

    #[test]
    fn test_naive_date_keeps_wall_clock_value() {
        // Whatever timezone the host runs in, a naive date must format
        // back to the day the author wrote, not a UTC-shifted neighbor
        let dt = parse_date_string("2024-09-19").unwrap();
        assert_eq!(dt.format("%Y-%m-%d").to_string(), "2024-09-19");

        let dt = parse_date_string("2024-09-19 23:30:00").unwrap();
        assert_eq!(
            dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            "2024-09-19 23:30:00"
        );
    }

    #[test]
    fn test_unparsable_date_is_none() {
        let fm = FrontMatter {
            date: Some("not a date".to_string()),
            ..Default::default()
        };
        assert!(fm.parse_date().is_none());
    }

    #[test]
    fn test_draft_defaults_false() {
        let content = "---\ntitle: T\n---\n\nBody.\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert!(!fm.draft);
    }

    #[test]
    fn test_serialize_parse_round_trip() {
        let content = r#"---
title: Round Trip
date: 2024-09-17
author: jane
tags:
  - one
  - two
draft: true
custom_field: keep me
---

Body text stays intact.
"#;

        let (fm, body) = FrontMatter::parse(content).unwrap();
        let emitted = fm.to_file_string(body).unwrap();
        let (fm2, body2) = FrontMatter::parse(&emitted).unwrap();

        assert_eq!(fm, fm2);
        assert_eq!(body, body2);
    }
}
