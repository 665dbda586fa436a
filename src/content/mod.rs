//! Content module - documents, front matter, and the content store

mod document;
mod error;
mod frontmatter;
pub mod store;

pub use document::{Banner, Button, ContentDocument, DocumentKind, Feature, Testimonial};
pub use error::{DuplicatePathError, ParseError, StoreError, ValidationError};
pub use frontmatter::FrontMatter;
pub use store::{filter_published, sort_by_date, ContentStore, LoadOutcome};
