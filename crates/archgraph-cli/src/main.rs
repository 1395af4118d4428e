//! archgraph CLI tool.
//!
//! Usage:
//! ```bash
//! archgraph check [--manifest FILE] [--format text|json|compact|pretty]
//! archgraph graph [--manifest FILE] [--format dot|mermaid|mermaid-md]
//! archgraph list-rules
//! archgraph init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;
mod manifest;

/// Default manifest file name.
const DEFAULT_MANIFEST: &str = "archgraph.json";

/// Architecture linter for import graphs: layers, cycles, depth and forbidden dependencies
#[derive(Parser)]
#[command(name = "archgraph")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run architecture checks
    Check {
        /// Project manifest listing files and their imports ("-" for stdin)
        #[arg(short, long, default_value = DEFAULT_MANIFEST)]
        manifest: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Only run specific rules (comma-separated names or codes)
        #[arg(long)]
        rules: Option<String>,
    },

    /// Export the dependency graph
    Graph {
        /// Project manifest listing files and their imports ("-" for stdin)
        #[arg(short, long, default_value = DEFAULT_MANIFEST)]
        manifest: PathBuf,

        /// Graph format
        #[arg(short, long, default_value = "dot")]
        format: GraphFormat,

        /// Only show files of this layer
        #[arg(long)]
        layer: Option<String>,

        /// Only show files within N hops of an entry point
        #[arg(long)]
        max_depth: Option<usize>,

        /// Do not colour nodes by layer
        #[arg(long)]
        no_layers: bool,

        /// Do not highlight cycle edges
        #[arg(long)]
        no_cycles: bool,

        /// Do not highlight layer violations
        #[arg(long)]
        no_violations: bool,

        /// Label nodes with shortened paths
        #[arg(long)]
        simplify: bool,

        /// Graph title
        #[arg(long)]
        title: Option<String>,
    },

    /// List available rules
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
    /// Rich diagnostics.
    Pretty,
}

/// Output format for graph export.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum GraphFormat {
    /// Graphviz DOT.
    #[default]
    Dot,
    /// Mermaid flowchart.
    Mermaid,
    /// Mermaid flowchart in a Markdown code fence.
    MermaidMd,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            manifest,
            format,
            rules,
        } => commands::check::run(&manifest, format, rules, cli.config.as_deref()),
        Commands::Graph {
            manifest,
            format,
            layer,
            max_depth,
            no_layers,
            no_cycles,
            no_violations,
            simplify,
            title,
        } => {
            let options = commands::graph::options(
                title,
                layer,
                max_depth,
                !no_layers,
                !no_cycles,
                !no_violations,
                simplify,
            );
            commands::graph::run(&manifest, format, options, cli.config.as_deref())
        }
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
