//! List store content

use anyhow::Result;

use crate::content::{filter_published, sort_by_date, DocumentKind};
use crate::Folio;

/// List store content by type
pub fn run(folio: &Folio, content_type: &str, include_drafts: bool) -> Result<()> {
    let outcome = folio.store().load_all()?;

    for error in &outcome.errors {
        tracing::warn!("{}", error);
    }

    let mut documents = if include_drafts {
        outcome.documents
    } else {
        filter_published(outcome.documents)
    };
    sort_by_date(&mut documents);

    match content_type {
        "post" | "posts" => {
            let posts: Vec<_> = documents
                .iter()
                .filter(|d| d.kind == DocumentKind::Post)
                .collect();
            println!("Posts ({}):", posts.len());
            for post in posts {
                let date = post
                    .date()
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "????-??-??".to_string());
                let marker = if post.is_draft() { " (draft)" } else { "" };
                println!("  {} - {}{} [{}]", date, post.title(), marker, post.path);
            }
        }
        "page" | "pages" => {
            let pages: Vec<_> = documents
                .iter()
                .filter(|d| d.kind == DocumentKind::Page)
                .collect();
            println!("Pages ({}):", pages.len());
            for page in pages {
                println!("  {} [{}]", page.title(), page.path);
            }
        }
        "author" | "authors" => {
            let authors: Vec<_> = documents
                .iter()
                .filter(|d| d.kind == DocumentKind::AuthorProfile)
                .collect();
            println!("Authors ({}):", authors.len());
            for author in authors {
                println!("  {} [{}]", author.title(), author.path);
            }
        }
        "tag" | "tags" => {
            let mut tags: std::collections::HashMap<String, usize> =
                std::collections::HashMap::new();
            for doc in documents.iter().filter(|d| d.kind == DocumentKind::Post) {
                for tag in &doc.front_matter.tags {
                    *tags.entry(tag.clone()).or_insert(0) += 1;
                }
            }
            println!("Tags ({}):", tags.len());
            let mut tags: Vec<_> = tags.into_iter().collect();
            tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        "category" | "categories" => {
            let mut categories: std::collections::HashMap<String, usize> =
                std::collections::HashMap::new();
            for doc in documents.iter().filter(|d| d.kind == DocumentKind::Post) {
                for cat in &doc.front_matter.categories {
                    *categories.entry(cat.clone()).or_insert(0) += 1;
                }
            }
            println!("Categories ({}):", categories.len());
            let mut categories: Vec<_> = categories.into_iter().collect();
            categories.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            for (cat, count) in categories {
                println!("  {} ({})", cat, count);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, page, author, tag, category",
                content_type
            );
        }
    }

    Ok(())
}
