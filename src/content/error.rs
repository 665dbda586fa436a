//! Error types for the content store

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use super::document::DocumentKind;

/// A malformed front-matter block. Fatal for the offending document,
/// collected (not aborting) for the batch.
#[derive(Debug, Error)]
#[error("{path}: malformed front matter: {reason}")]
pub struct ParseError {
    /// Store path of the offending document
    pub path: String,
    pub reason: String,
}

/// A document that parsed but does not satisfy its kind's schema.
/// Fatal for the document, collected for the batch.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{path}: missing required key `{key}` for {kind} document")]
    MissingKey {
        path: String,
        kind: DocumentKind,
        key: &'static str,
    },

    #[error("{path}: unparsable date `{value}`")]
    InvalidDate { path: String, value: String },

    #[error("{path}: invalid `{field}` structure: {reason}")]
    InvalidStructure {
        path: String,
        field: &'static str,
        reason: String,
    },
}

impl ValidationError {
    /// Store path of the offending document
    pub fn path(&self) -> &str {
        match self {
            ValidationError::MissingKey { path, .. } => path,
            ValidationError::InvalidDate { path, .. } => path,
            ValidationError::InvalidStructure { path, .. } => path,
        }
    }
}

/// Two source files resolved to the same store path. Fatal for the whole
/// batch: the identity is ambiguous and the renderer cannot pick a winner.
#[derive(Debug, Error)]
#[error("duplicate document path `{path}` (from `{first}` and `{second}`)")]
pub struct DuplicatePathError {
    pub path: String,
    pub first: PathBuf,
    pub second: PathBuf,
}

/// Umbrella error for store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read `{0}`")]
    Io(PathBuf, #[source] io::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    DuplicatePath(#[from] DuplicatePathError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_display() {
        let err = ValidationError::MissingKey {
            path: "blog/post-1".to_string(),
            kind: DocumentKind::Post,
            key: "date",
        };
        let display = format!("{err}");
        assert!(display.contains("blog/post-1"));
        assert!(display.contains("`date`"));
        assert!(display.contains("post"));
    }

    #[test]
    fn test_duplicate_path_display() {
        let err = DuplicatePathError {
            path: "about".to_string(),
            first: PathBuf::from("content/about.md"),
            second: PathBuf::from("content/about.markdown"),
        };
        let display = format!("{err}");
        assert!(display.contains("duplicate document path `about`"));
        assert!(display.contains("about.markdown"));
    }

    #[test]
    fn test_parse_error_display() {
        let err = ParseError {
            path: "blog/bad".to_string(),
            reason: "unterminated front matter".to_string(),
        };
        assert!(format!("{err}").contains("malformed front matter"));
    }
}
