//! folio: a content collection loader and validator for markdown sites
//!
//! This crate loads a tree of markdown documents with YAML front matter
//! (posts, pages, author profiles, site settings), types and validates
//! them, and exposes the collection to an external renderer.

pub mod commands;
pub mod config;
pub mod content;

use anyhow::Result;
use std::path::Path;

use content::ContentStore;

/// The main Folio application
#[derive(Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Content root directory
    pub content_dir: std::path::PathBuf,
}

impl Folio {
    /// Create a new Folio instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
        })
    }

    /// A content store over this site's content root
    pub fn store(&self) -> ContentStore {
        ContentStore::new(&self.content_dir, self.config.clone())
    }

    /// Load and validate all content, reporting aggregate errors
    pub fn check(&self) -> Result<()> {
        commands::check::run(self, commands::check::ReportFormat::Text)
    }

    /// Create a new content file
    pub fn new_document(&self, title: &str, layout: Option<&str>) -> Result<()> {
        commands::new::run(self, title, layout)
    }
}
