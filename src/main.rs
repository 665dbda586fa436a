//! CLI entry point for folio

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio::commands::check::ReportFormat;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "A content collection loader and validator for markdown sites", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate all content, reporting every error
    Check {
        /// Report format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// List store content (post, page, author, tag, category)
    List {
        #[arg(default_value = "post")]
        r#type: String,

        /// Include draft documents
        #[arg(long)]
        drafts: bool,
    },

    /// Create a new post, page, or author file
    New {
        /// Layout to use (post, page, author)
        #[arg(short, long, default_value = "post")]
        layout: String,

        /// Title of the new document
        title: String,

        /// Filename for the new document (without extension)
        #[arg(short, long)]
        path: Option<String>,

        /// Mark the new document as a draft
        #[arg(long)]
        draft: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio=debug,info"
    } else {
        "folio=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = cli.cwd.unwrap_or_else(|| std::env::current_dir().unwrap());

    match cli.command {
        Commands::Check { format } => {
            let folio = folio::Folio::new(&base_dir)?;
            let format = match format.as_str() {
                "json" => ReportFormat::Json,
                _ => ReportFormat::Text,
            };
            folio::commands::check::run(&folio, format)?;
        }

        Commands::List { r#type, drafts } => {
            let folio = folio::Folio::new(&base_dir)?;
            folio::commands::list::run(&folio, &r#type, drafts)?;
        }

        Commands::New {
            layout,
            title,
            path,
            draft,
        } => {
            let folio = folio::Folio::new(&base_dir)?;
            tracing::info!("Creating new {} with title: {}", layout, title);
            folio::commands::new::create_document(&folio, &title, &layout, path.as_deref(), draft)?;
        }

        Commands::Version => {
            println!("folio version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
