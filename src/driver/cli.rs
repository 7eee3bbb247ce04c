//! CLI Argument Parsing
//!
//! CLIの引数解析

use clap::Parser;
use std::path::PathBuf;

/// CSVの各行をGitHub Issueとして登録するCLI
#[derive(Parser, Debug, Clone)]
#[command(name = "issue-import")]
#[command(about = "Create GitHub issues from the rows of a CSV file", long_about = None)]
pub struct Args {
    /// Input CSV file (first non-comment line is the header)
    pub input: PathBuf,

    /// Dry run mode - log the requests instead of sending them
    #[arg(long)]
    pub dry_run: bool,

    /// Config file path
    #[arg(short, long, default_value = "./issue-import.json")]
    pub config: String,
}
