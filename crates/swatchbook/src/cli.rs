// ABOUTME: Command line definition for the swatch binary
// ABOUTME: Subcommands list collections, print a graded report, or serve the host protocol

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "swatch",
    about = "WCAG contrast reports for design color tokens",
    version
)]
pub struct Cli {
    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List variable collections and their modes.
    Collections(CollectionsArgs),

    /// Resolve, pair and grade a collection's color tokens for one mode.
    Report(ReportArgs),

    /// Answer JSON host requests on stdin, one per line.
    Serve(ServeArgs),
}

#[derive(Debug, Clone, clap::Args)]
pub struct CollectionsArgs {
    /// Variable snapshot JSON file
    #[arg(short, long)]
    pub snapshot: PathBuf,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ReportArgs {
    /// Variable snapshot JSON file
    #[arg(short, long)]
    pub snapshot: PathBuf,

    /// Collection id or name
    #[arg(short, long)]
    pub collection: String,

    /// Mode id or name (defaults to the collection's first mode)
    #[arg(short, long)]
    pub mode: Option<String>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Document config TOML file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ServeArgs {
    /// Variable snapshot JSON file
    #[arg(short, long)]
    pub snapshot: PathBuf,

    /// Document config TOML file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text table
    Text,
    /// Report as JSON
    Json,
    /// Document render tree as JSON
    Tree,
}
