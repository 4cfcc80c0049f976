//! # kiji CLI
//!
//! Command-line interface for the kiji blog engine.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kiji")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "kiji.yml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the static site
    Build,

    /// Build, then serve the output locally
    Dev {
        /// Server port (overrides the config value)
        #[arg(long)]
        port: Option<u16>,
    },

    /// List posts, optionally filtered and paginated
    List {
        /// Filter by category (case-insensitive exact match)
        #[arg(long)]
        category: Option<String>,

        /// Free-text search filter
        #[arg(long)]
        search: Option<String>,

        /// 1-based page number (out-of-range values are clamped)
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Return JSON for machine consumption
        #[arg(long)]
        json: bool,
    },

    /// Search posts by case-insensitive substring
    Search {
        /// Search query
        query: String,

        /// Return JSON for machine consumption
        #[arg(long)]
        json: bool,
    },

    /// Show category counts
    Categories {
        /// Return JSON for machine consumption
        #[arg(long)]
        json: bool,
    },

    /// Render a single post (HTML to stdout, or JSON with metadata and TOC)
    Show {
        /// Post slug
        slug: String,

        /// Return JSON instead of bare HTML
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Build => commands::build_site(&cli.config),
        Commands::Dev { port } => commands::dev_server(&cli.config, port).await,
        Commands::List {
            category,
            search,
            page,
            json,
        } => {
            let opts = commands::ListOptions {
                category,
                search,
                page,
                json,
            };
            commands::list_posts(&cli.config, opts)
        }
        Commands::Search { query, json } => commands::search_posts(&cli.config, &query, json),
        Commands::Categories { json } => commands::list_categories(&cli.config, json),
        Commands::Show { slug, json } => commands::show_post(&cli.config, &slug, json),
    }
}
