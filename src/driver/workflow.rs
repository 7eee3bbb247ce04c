//! Workflow Orchestration
//!
//! ワークフローのオーケストレーション

use anyhow::Result;
use log::info;

use std::sync::Arc;

use crate::adapter::config::{Config, TOKEN_ENV_VAR};
use crate::adapter::github::client::GitHubClient;
use crate::adapter::repositories::dry_run_tracker_repository::DryRunTrackerRepository;
use crate::adapter::repositories::github_tracker_repository::GitHubTrackerRepository;
use crate::adapter::table::csv_row_repository::CsvRowRepository;
use crate::application::dto::import_config::ImportConfig;
use crate::application::use_cases::import_issues::{ImportIssuesUseCase, ImportSummary};
use crate::application::use_cases::load_rows::LoadRowsUseCase;
use crate::domain::repositories::tracker_repository::IssueTrackerRepository;

use super::cli::Args;

/// Issue Import Workflow
pub struct ImportWorkflow {
    config: Config,
    load_rows_use_case: LoadRowsUseCase<CsvRowRepository>,
}

impl ImportWorkflow {
    /// Create a new workflow instance with dependency injection
    pub fn new(config: Config) -> Self {
        let row_repo = Arc::new(CsvRowRepository::new(config.comment_prefix.clone()));
        let load_rows_use_case = LoadRowsUseCase::new(row_repo);

        Self {
            config,
            load_rows_use_case,
        }
    }

    /// Pick the tracker implementation and pacing for this run
    fn tracker(
        &self,
        args: &Args,
    ) -> Result<(Arc<dyn IssueTrackerRepository>, ImportConfig)> {
        if args.dry_run {
            let tracker: Arc<dyn IssueTrackerRepository> = Arc::new(DryRunTrackerRepository::new());
            return Ok((tracker, ImportConfig::unthrottled()));
        }

        if self.config.token.is_empty() {
            anyhow::bail!(
                "No API token: set \"token\" in {} or the {} environment variable",
                args.config,
                TOKEN_ENV_VAR
            );
        }

        let client = GitHubClient::new(self.config.repo_url(), self.config.token.clone())?;
        let tracker: Arc<dyn IssueTrackerRepository> = Arc::new(GitHubTrackerRepository::new(client));
        Ok((tracker, self.config.import_config()))
    }

    /// Execute the import workflow
    pub async fn execute(&self, args: Args) -> Result<ImportSummary> {
        info!("Starting issue import...");
        info!("Dry run: {}", args.dry_run);

        println!("✓ Using configuration:");
        println!("  Repository: {}/{}", self.config.owner, self.config.repo);
        println!("  API: {}", self.config.api_base);

        // Fail on a missing token before touching the input
        let (tracker, import_config) = self.tracker(&args)?;

        let rows = self.load_rows_use_case.execute(&args.input).await?;
        println!("✓ Read {} rows from {}", rows.len(), args.input.display());

        if rows.is_empty() {
            println!("No rows to import. Exiting.");
            return Ok(ImportSummary::default());
        }

        if args.dry_run {
            println!("✓ Dry-run mode (no requests will be sent)");
        }

        let summary = ImportIssuesUseCase::new(tracker)
            .execute(rows, &import_config)
            .await?;

        println!(
            "✓ Created {} issues ({} skipped rows, {} closed, {} comments, {} new milestones)",
            summary.issues_created,
            summary.rows_skipped,
            summary.issues_closed,
            summary.comments_created,
            summary.milestones_created
        );
        if summary.failed_calls > 0 {
            println!(
                "⚠ {} requests failed; see the warnings above",
                summary.failed_calls
            );
        }
        println!("✓ Import complete!");

        Ok(summary)
    }
}
