//! Command line argument parsing for the docindex CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::writer::IndexFormat;

/// docindex - Inspect and validate documentation search indices
#[derive(Parser, Debug, Clone)]
#[command(name = "docindex")]
#[command(about = "Load, validate and convert documentation search indices")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct DocIndexArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Configuration file (JSON) with `loader` and `writer` sections
    #[arg(short, long, env = "DOCINDEX_CONFIG", value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl DocIndexArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Check that an index file follows the record contract
    Validate(ValidateArgs),

    /// Show record counts per category and page
    Stats(StatsArgs),

    /// Print the records of an index
    List(ListArgs),

    /// Re-serialize an index as JS or JSON
    Convert(ConvertArgs),
}

/// Arguments for index validation
#[derive(Parser, Debug, Clone)]
pub struct ValidateArgs {
    /// Path to the index file
    #[arg(value_name = "INDEX_FILE")]
    pub index_file: PathBuf,

    /// Only accept the `page`, `section` and `method` categories
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for index statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// Path to the index file
    #[arg(value_name = "INDEX_FILE")]
    pub index_file: PathBuf,

    /// Include per-page counts
    #[arg(short, long)]
    pub detailed: bool,
}

/// Arguments for listing records
#[derive(Parser, Debug, Clone)]
pub struct ListArgs {
    /// Path to the index file
    #[arg(value_name = "INDEX_FILE")]
    pub index_file: PathBuf,

    /// Only list records with this category
    #[arg(long)]
    pub category: Option<String>,

    /// Only list records on this page
    #[arg(long)]
    pub page: Option<String>,

    /// Maximum number of records to list
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for converting an index
#[derive(Parser, Debug, Clone)]
pub struct ConvertArgs {
    /// Path to the index file
    #[arg(value_name = "INDEX_FILE")]
    pub index_file: PathBuf,

    /// Target layout
    #[arg(short, long, default_value = "js")]
    pub to: ConvertTarget,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Variable name for JS output (overrides the config file)
    #[arg(long)]
    pub variable_name: Option<String>,
}

/// Layouts `convert` can produce
#[derive(ValueEnum, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConvertTarget {
    /// `var documenterSearchIndex = {"docs": [...]}`
    Js,
    /// `{"docs": [...]}`
    Json,
}

impl ConvertArgs {
    /// The writer layout for this conversion.
    pub fn index_format(&self, pretty: bool) -> IndexFormat {
        match (self.to, pretty) {
            (ConvertTarget::Js, _) => IndexFormat::Script,
            (ConvertTarget::Json, false) => IndexFormat::Json,
            (ConvertTarget::Json, true) => IndexFormat::PrettyJson,
        }
    }
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
    /// CSV output (for some commands)
    Csv,
    /// YAML output
    Yaml,
}
