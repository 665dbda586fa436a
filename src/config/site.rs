//! Site configuration (_config.yml)

use anyhow::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub url: String,
    pub author: String,

    // Directory layout under the content root
    pub content_dir: String,
    pub blog_dir: String,
    pub authors_dir: String,
    pub settings_dir: String,

    /// Glob patterns (relative to the content root) excluded from loading
    #[serde(default)]
    pub exclude: Vec<String>,

    // Writing
    pub new_post_name: String,
    pub default_layout: String,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Folio".to_string(),
            description: String::new(),
            url: "http://example.com".to_string(),
            author: String::new(),

            content_dir: "content".to_string(),
            blog_dir: "blog".to_string(),
            authors_dir: "authors".to_string(),
            settings_dir: "settings".to_string(),
            exclude: Vec::new(),

            new_post_name: ":title.md".to_string(),
            default_layout: "post".to_string(),

            extra: IndexMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}
