//! issue-import - CSV to GitHub Issues
//!
//! CSVファイルの各行からGitHub Issueを作成

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use anyhow::Result;
use clap::Parser;
use env_logger::Env;

use issue_import::adapter::config::Config;
use issue_import::driver::{Args, ImportWorkflow};

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() -> Result<()> {
    // Failed requests are reported at warn level
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    // Load configuration
    let config = Config::load(&args.config)?;

    // Create workflow with injected dependencies
    let workflow = ImportWorkflow::new(config);

    workflow.execute(args).await?;
    Ok(())
}
