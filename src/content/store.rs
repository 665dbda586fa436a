//! Content store - loads, validates, and orders content documents

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::document::{Banner, ContentDocument, DocumentKind, Feature, Testimonial};
use super::error::{DuplicatePathError, ParseError, StoreError, ValidationError};
use super::FrontMatter;
use crate::config::SiteConfig;

/// Result of one load pass: documents that made it in, plus every
/// per-document error collected along the way. Reported in aggregate so
/// content authors see all problems at once instead of the first one.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub documents: Vec<ContentDocument>,
    pub errors: Vec<StoreError>,
}

impl LoadOutcome {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} documents loaded, {} rejected",
            self.documents.len(),
            self.errors.len()
        )
    }
}

/// The content store for a single content root.
///
/// Holds no document state between calls: every `load_all` re-reads the
/// tree from disk, so the sequence is restartable by construction.
pub struct ContentStore {
    root: PathBuf,
    config: SiteConfig,
}

impl ContentStore {
    pub fn new<P: AsRef<Path>>(root: P, config: SiteConfig) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            config,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load every content document under the root.
    ///
    /// Parse and validation failures are collected per document; a
    /// duplicate store path aborts the whole batch with zero documents,
    /// since the identity conflict cannot be resolved here.
    pub fn load_all(&self) -> Result<LoadOutcome, StoreError> {
        let mut outcome = LoadOutcome::default();

        if !self.root.exists() {
            tracing::warn!("Content root {:?} does not exist", self.root);
            return Ok(outcome);
        }

        let excludes = self.exclude_patterns();

        // Parse pass: collect every well-formed document plus parse errors
        let mut parsed = Vec::new();
        for entry in WalkDir::new(&self.root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !is_markdown_file(path) {
                continue;
            }

            let relative = path.strip_prefix(&self.root).unwrap_or(path);
            if self.is_skipped(relative, &excludes) {
                tracing::debug!("Skipping {:?}", relative);
                continue;
            }

            match self.load_document(path, relative) {
                Ok(doc) => parsed.push(doc),
                Err(e) => {
                    tracing::warn!("Failed to load document {:?}: {}", relative, e);
                    outcome.errors.push(e);
                }
            }
        }

        // Identity pass: duplicate store paths are fatal for the batch
        let mut seen: HashMap<String, PathBuf> = HashMap::new();
        for doc in &parsed {
            if let Some(first) = seen.get(&doc.path) {
                return Err(DuplicatePathError {
                    path: doc.path.clone(),
                    first: first.clone(),
                    second: doc.source.clone(),
                }
                .into());
            }
            seen.insert(doc.path.clone(), doc.source.clone());
        }

        // Validation pass: rejects are collected, survivors are exposed
        for doc in parsed {
            match self.validate(&doc) {
                Ok(()) => outcome.documents.push(doc),
                Err(e) => {
                    tracing::warn!("Rejected {}: {}", doc.path, e);
                    outcome.errors.push(e.into());
                }
            }
        }

        tracing::info!("Loaded content store: {}", outcome.summary());
        Ok(outcome)
    }

    /// Load a single document from a file
    fn load_document(&self, path: &Path, relative: &Path) -> Result<ContentDocument, StoreError> {
        let store_path = store_path(relative);

        let content = fs::read_to_string(path)
            .map_err(|e| StoreError::Io(path.to_path_buf(), e))?;

        let (front_matter, body) = FrontMatter::parse(&content).map_err(|e| ParseError {
            path: store_path.clone(),
            reason: e.to_string(),
        })?;

        Ok(ContentDocument {
            path: store_path,
            kind: self.infer_kind(relative),
            front_matter,
            body: body.to_string(),
            source: path.to_path_buf(),
        })
    }

    /// Infer the document kind from its location under the content root
    fn infer_kind(&self, relative: &Path) -> DocumentKind {
        let first = relative
            .components()
            .next()
            .and_then(|c| c.as_os_str().to_str())
            .unwrap_or("");

        if first == self.config.blog_dir {
            DocumentKind::Post
        } else if first == self.config.authors_dir {
            DocumentKind::AuthorProfile
        } else if first == self.config.settings_dir {
            DocumentKind::SiteSettings
        } else {
            DocumentKind::Page
        }
    }

    /// Validate one document against its kind's schema.
    ///
    /// Required-key presence, date parseability, and the shape of nested
    /// page/settings structures. An `author` value that matches no author
    /// profile is deliberately accepted: the store does not own referential
    /// integrity across document kinds.
    pub fn validate(&self, doc: &ContentDocument) -> Result<(), ValidationError> {
        let fm = &doc.front_matter;

        for key in doc.kind.required_keys() {
            let present = match *key {
                "title" => fm.title.is_some(),
                "date" => fm.date.is_some(),
                "author" => fm.author.is_some(),
                other => fm.extra.contains_key(other),
            };
            if !present {
                return Err(ValidationError::MissingKey {
                    path: doc.path.clone(),
                    kind: doc.kind,
                    key,
                });
            }
        }

        // An unparsable date is rejected, never silently coerced
        if let Some(date) = &fm.date {
            if fm.parse_date().is_none() {
                return Err(ValidationError::InvalidDate {
                    path: doc.path.clone(),
                    value: date.clone(),
                });
            }
        }

        if matches!(doc.kind, DocumentKind::Page | DocumentKind::SiteSettings) {
            self.validate_sections(doc)?;
        }

        Ok(())
    }

    /// Check the nested banner/features/testimonials structures against
    /// their concrete schemas. The YAML is already well-formed at this
    /// point; a wrong shape is a validation failure, not a parse failure.
    fn validate_sections(&self, doc: &ContentDocument) -> Result<(), ValidationError> {
        let fm = &doc.front_matter;

        if let Some(value) = fm.extra.get("banner") {
            serde_yaml::from_value::<Banner>(value.clone()).map_err(|e| {
                ValidationError::InvalidStructure {
                    path: doc.path.clone(),
                    field: "banner",
                    reason: e.to_string(),
                }
            })?;
        }

        if let Some(value) = fm.extra.get("features") {
            serde_yaml::from_value::<Vec<Feature>>(value.clone()).map_err(|e| {
                ValidationError::InvalidStructure {
                    path: doc.path.clone(),
                    field: "features",
                    reason: e.to_string(),
                }
            })?;
        }

        if let Some(value) = fm.extra.get("testimonials") {
            serde_yaml::from_value::<Vec<Testimonial>>(value.clone()).map_err(|e| {
                ValidationError::InvalidStructure {
                    path: doc.path.clone(),
                    field: "testimonials",
                    reason: e.to_string(),
                }
            })?;
        }

        Ok(())
    }

    fn exclude_patterns(&self) -> Vec<glob::Pattern> {
        self.config
            .exclude
            .iter()
            .filter_map(|p| match glob::Pattern::new(p) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    tracing::warn!("Ignoring bad exclude pattern `{}`: {}", p, e);
                    None
                }
            })
            .collect()
    }

    fn is_skipped(&self, relative: &Path, excludes: &[glob::Pattern]) -> bool {
        // Underscore-prefixed components are editor/partial conventions
        let underscored = relative.components().any(|c| {
            c.as_os_str()
                .to_str()
                .map(|s| s.starts_with('_'))
                .unwrap_or(false)
        });
        if underscored {
            return true;
        }

        excludes.iter().any(|p| p.matches_path(relative))
    }
}

/// Exclude documents flagged as drafts
pub fn filter_published(documents: Vec<ContentDocument>) -> Vec<ContentDocument> {
    documents.into_iter().filter(|d| !d.is_draft()).collect()
}

/// Sort by date descending; equal dates fall back to path ascending so
/// listings are deterministic. Documents without a date sort last.
pub fn sort_by_date(documents: &mut [ContentDocument]) {
    documents.sort_by(|a, b| b.date().cmp(&a.date()).then_with(|| a.path.cmp(&b.path)));
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

/// Store key for a content-root-relative file path: extension stripped,
/// separators normalized to `/`
fn store_path(relative: &Path) -> String {
    let joined = relative
        .components()
        .filter_map(|c| c.as_os_str().to_str())
        .collect::<Vec<_>>()
        .join("/");

    // Strip exactly one extension so `notes.md.md` keys to `notes.md`
    joined
        .strip_suffix(".markdown")
        .or_else(|| joined.strip_suffix(".md"))
        .unwrap_or(&joined)
        .to_string()
}
