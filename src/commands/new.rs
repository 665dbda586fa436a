//! Create a new content document

use anyhow::Result;
use std::fs;

use crate::Folio;

/// Create a new post/page/author file with scaffolded front matter
pub fn create_document(
    folio: &Folio,
    title: &str,
    layout: &str,
    path: Option<&str>,
    draft: bool,
) -> Result<()> {
    let now = chrono::Local::now();
    let slug = slug::slugify(title);

    // Determine the target directory based on layout
    let target_dir = match layout {
        "page" => folio.content_dir.join(&slug),
        "author" => folio.content_dir.join(&folio.config.authors_dir),
        _ => folio.content_dir.join(&folio.config.blog_dir),
    };

    fs::create_dir_all(&target_dir)?;

    // Generate filename
    let filename = if let Some(p) = path {
        format!("{}.md", p)
    } else {
        folio
            .config
            .new_post_name
            .replace(":title", &slug)
            .replace(":year", &now.format("%Y").to_string())
            .replace(":month", &now.format("%m").to_string())
            .replace(":day", &now.format("%d").to_string())
    };

    let file_path = if layout == "page" {
        target_dir.join("index.md")
    } else {
        target_dir.join(&filename)
    };

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let content = scaffold(folio, title, layout, &now, draft);
    fs::write(&file_path, content)?;

    println!("Created: {:?}", file_path);

    Ok(())
}

/// Front-matter scaffold for a freshly created file
fn scaffold(
    folio: &Folio,
    title: &str,
    layout: &str,
    now: &chrono::DateTime<chrono::Local>,
    draft: bool,
) -> String {
    let mut lines = vec!["---".to_string(), format!("title: {}", title)];

    if layout != "author" {
        lines.push(format!("date: {}", now.format("%Y-%m-%d %H:%M:%S")));
    }
    if layout == "post" && !folio.config.author.is_empty() {
        lines.push(format!("author: {}", folio.config.author));
    }
    if draft {
        lines.push("draft: true".to_string());
    }

    lines.push("---".to_string());
    lines.push(String::new());
    lines.join("\n")
}

/// Run the new command
pub fn run(folio: &Folio, title: &str, layout: Option<&str>) -> Result<()> {
    let layout = layout.unwrap_or(&folio.config.default_layout);
    create_document(folio, title, layout, None, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_post_scaffold() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("_config.yml"), "author: jane\n").unwrap();
        let folio = Folio::new(dir.path()).unwrap();

        create_document(&folio, "Hello World", "post", None, true).unwrap();

        let created = folio
            .content_dir
            .join(&folio.config.blog_dir)
            .join("hello-world.md");
        let content = std::fs::read_to_string(&created).unwrap();
        assert!(content.starts_with("---\n"));
        assert!(content.contains("title: Hello World"));
        assert!(content.contains("author: jane"));
        assert!(content.contains("draft: true"));
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let folio = Folio::new(dir.path()).unwrap();

        create_document(&folio, "Once", "post", None, false).unwrap();
        assert!(create_document(&folio, "Once", "post", None, false).is_err());
    }
}
