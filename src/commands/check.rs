//! Load and validate the content store, reporting every problem at once

use anyhow::Result;
use serde_json::json;

use crate::Folio;

/// Output format for the check report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

/// Validate all content and report aggregate results.
///
/// Per-document failures are printed together at the end of the pass; a
/// duplicate store path has already aborted the load by the time we get
/// here and propagates as a hard error.
pub fn run(folio: &Folio, format: ReportFormat) -> Result<()> {
    let outcome = folio.store().load_all()?;

    match format {
        ReportFormat::Text => {
            println!("{}", outcome.summary());
            for error in &outcome.errors {
                println!("  error: {}", error);
            }
        }
        ReportFormat::Json => {
            let documents: Vec<_> = outcome
                .documents
                .iter()
                .map(|d| {
                    json!({
                        "path": d.path,
                        "kind": d.kind,
                        "title": d.title(),
                        "draft": d.is_draft(),
                        "date": d.date().map(|t| t.format("%Y-%m-%d").to_string()),
                    })
                })
                .collect();
            let errors: Vec<String> = outcome.errors.iter().map(|e| e.to_string()).collect();

            let report = json!({ "documents": documents, "errors": errors });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    if outcome.has_errors() {
        anyhow::bail!("{} document(s) failed validation", outcome.errors.len());
    }

    Ok(())
}
