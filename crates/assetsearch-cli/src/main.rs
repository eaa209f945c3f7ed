use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "assetsearch")]
#[command(about = "Full-text search over structured asset content", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Search query (shorthand for `assetsearch search <QUERY>`)
    #[arg(trailing_var_arg = true, num_args = 0..)]
    pub query: Vec<String>,

    /// Library root (default: current directory)
    #[arg(short = 'C', long, global = true)]
    pub library: Option<PathBuf>,

    /// Output format: compact, json, pretty
    #[arg(short, long, default_value = "compact", global = true)]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search indexed asset content (default command)
    Search {
        /// Search query
        query: String,

        /// Maximum results
        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,

        /// Filter by asset kind (e.g., -k DataTable)
        #[arg(short = 'k', long = "kind")]
        kinds: Vec<String>,

        /// Filter by asset path pattern
        #[arg(short = 'p', long = "path")]
        paths: Vec<String>,

        /// Show relevance scores
        #[arg(long)]
        scores: bool,
    },

    /// Index an asset library
    Index {
        /// Library path (default: current directory)
        path: Option<PathBuf>,

        /// Force complete rebuild
        #[arg(long)]
        rebuild: bool,
    },

    /// Show index status
    Status {
        /// Show detailed statistics
        #[arg(long)]
        detailed: bool,
    },

    /// List registered asset indexers and their versions
    Indexers,

    /// Watch the library and re-index assets as they change
    Watch,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact minimal output (default)
    Compact,
    /// JSON output
    Json,
    /// Human-readable formatted output
    Pretty,
}

fn main() -> Result<()> {
    // Initialize logging
    let filter = if std::env::var("ASSETSEARCH_DEBUG").is_ok() {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Determine library root
    let library = cli
        .library
        .clone()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    // Handle command
    match cli.command {
        Some(Commands::Search {
            query,
            limit,
            kinds,
            paths,
            scores,
        }) => {
            commands::search::run(&library, &query, limit, kinds, paths, scores, cli.format)?;
        }
        Some(Commands::Index { path, rebuild }) => {
            let target = path.unwrap_or(library);
            commands::index::run(&target, rebuild)?;
        }
        Some(Commands::Status { detailed }) => {
            commands::status::run(&library, detailed)?;
        }
        Some(Commands::Indexers) => {
            commands::indexers::run(&library)?;
        }
        Some(Commands::Watch) => {
            commands::watch::run(&library)?;
        }
        None => {
            // Default: treat trailing args as search query
            if cli.query.is_empty() {
                // No query, show help
                use clap::CommandFactory;
                Cli::command().print_help()?;
                println!();
            } else {
                let query = cli.query.join(" ");
                commands::search::run(&library, &query, 10, vec![], vec![], false, cli.format)?;
            }
        }
    }

    Ok(())
}
