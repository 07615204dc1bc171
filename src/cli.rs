use crate::client::Backend;
use clap::Parser;
use std::path::PathBuf;

/// Generates documentation comments for source elements using an LLM
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Source file to document, or a directory to process recursively
    pub path: PathBuf,

    /// Document only the element at this 1-based line (default: whole file)
    #[arg(short, long)]
    pub line: Option<usize>,

    /// Print the element inventory as JSON instead of generating anything
    #[arg(long)]
    pub list: bool,

    /// Show the planned changes as a diff without writing any file
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the confirmation prompt in whole-file mode
    #[arg(short, long)]
    pub yes: bool,

    /// Regenerate documentation for elements that already have it
    #[arg(long)]
    pub replace: bool,

    /// Model override for this run
    #[arg(short, long)]
    pub model: Option<String>,

    /// Backend override for this run
    #[arg(short, long, value_enum)]
    pub backend: Option<Backend>,

    /// Language profile override (default: by file extension)
    #[arg(long)]
    pub language: Option<String>,
}
