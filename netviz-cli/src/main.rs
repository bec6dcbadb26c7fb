//! netviz CLI - render stored network topologies
//!
//! Loads a topology snapshot from a DuckDB store or a JSON records file,
//! renders it into a deterministic scene and presents it as a table, JSON
//! or SVG.

use clap::{CommandFactory, Parser, Subcommand};
use netviz_core::{MissingNeighborPolicy, NeighborResolution};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;
mod source;

use commands::*;
use config::NetvizConfig;
use output::{OutputConfig, OutputFormat};
use source::Source;

/// Parse a neighbor resolution mode (`position` or `id`)
fn parse_resolution(s: &str) -> Result<NeighborResolution, String> {
    NeighborResolution::parse(s)
        .ok_or_else(|| format!("'{}' is not a resolution mode (use 'position' or 'id')", s))
}

/// Parse a missing-neighbor policy (`fail` or `skip`)
fn parse_policy(s: &str) -> Result<MissingNeighborPolicy, String> {
    MissingNeighborPolicy::parse(s)
        .ok_or_else(|| format!("'{}' is not a policy (use 'fail' or 'skip')", s))
}

/// Render stored network topologies.
#[derive(Parser)]
#[command(name = "netviz")]
#[command(author, version)]
#[command(about = "Render stored network topologies")]
#[command(propagate_version = true)]
#[command(after_help = "Examples:
  netviz import nodes.json           Store a snapshot
  netviz render --format svg > t.svg Draw the stored snapshot
  netviz render --input nodes.json   Render straight from a file
  netviz nodes --format json         Dump the loaded node table")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format (overrides config default)
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Minified JSON and borderless tables
    #[arg(long, global = true)]
    compact: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Replace the stored snapshot with a JSON records file
    Import {
        /// JSON array of node records
        input: PathBuf,

        /// Store path (defaults to [store].path or .netviz/topology.duckdb)
        #[arg(long)]
        db: Option<PathBuf>,
    },

    /// Print the loaded node table
    Nodes {
        /// Store path to read from
        #[arg(long)]
        db: Option<PathBuf>,

        /// Read a JSON records file instead of the store
        #[arg(short, long, conflicts_with = "db")]
        input: Option<PathBuf>,
    },

    /// Render the topology scene
    #[command(visible_alias = "r")]
    Render {
        /// Store path to read from
        #[arg(long)]
        db: Option<PathBuf>,

        /// Read a JSON records file instead of the store
        #[arg(short, long, conflicts_with = "db")]
        input: Option<PathBuf>,

        /// How neighbor numbers name nodes: position or id
        #[arg(long, value_parser = parse_resolution)]
        resolve: Option<NeighborResolution>,

        /// What to do with a neighbor that names no node: fail or skip
        #[arg(long, value_parser = parse_policy)]
        on_missing_neighbor: Option<MissingNeighborPolicy>,
    },
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = NetvizConfig::load(std::path::Path::new("."));

    // CLI flag > config default > Table
    let format = cli.format.unwrap_or_else(|| {
        config
            .default_format()
            .and_then(|f| f.parse().ok())
            .unwrap_or(OutputFormat::Table)
    });

    if let Some(use_color) = config.use_color() {
        colored::control::set_override(use_color);
    }

    let output = OutputConfig::auto_detect(format).with_compact(cli.compact);

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            let _ = Cli::command().print_help();
            println!();
            return Ok(());
        }
    };

    match command {
        Commands::Import { input, db } => {
            let db = db.unwrap_or_else(|| config.store_path());
            import::run(&input, &db, &output)
        }
        Commands::Nodes { db, input } => {
            let source = Source::resolve(db, input, &config);
            nodes::run(&source, &output)
        }
        Commands::Render {
            db,
            input,
            resolve,
            on_missing_neighbor,
        } => {
            let source = Source::resolve(db, input, &config);
            let options = config.render_options(resolve, on_missing_neighbor);
            render::run(&source, options, &output)
        }
    }
}
