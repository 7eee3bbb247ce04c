//! Dry-run Tracker Repository
//!
//! 通信せずに呼び出し内容をログに出すIssueTrackerRepository実装。
//! 作成したマイルストーンは覚えておき、一覧に含めて返す。

use async_trait::async_trait;
use log::info;
use std::sync::Mutex;

use crate::domain::entities::issue::{CreatedIssue, NewIssue};
use crate::domain::entities::milestone::Milestone;
use crate::domain::repositories::tracker_repository::{
    IssueTrackerRepository, MilestonePage, TrackerResult,
};

#[derive(Debug, Default)]
struct DryRunState {
    milestones: Vec<Milestone>,
    issues_created: u64,
}

/// ドライラン用リポジトリ
#[derive(Debug, Default)]
pub struct DryRunTrackerRepository {
    state: Mutex<DryRunState>,
}

impl DryRunTrackerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, DryRunState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl IssueTrackerRepository for DryRunTrackerRepository {
    async fn list_milestones(&self, page: u32) -> TrackerResult<MilestonePage> {
        info!("DRY RUN - Would list milestones (page {})", page);
        let milestones = if page == 1 {
            self.lock().milestones.clone()
        } else {
            Vec::new()
        };
        Ok(MilestonePage {
            milestones,
            has_next: false,
        })
    }

    async fn create_milestone(&self, title: &str) -> TrackerResult<()> {
        info!("DRY RUN - Would create milestone: {}", title);
        let mut state = self.lock();
        let number = state.milestones.len() as u64 + 1;
        state.milestones.push(Milestone::new(number, title));
        Ok(())
    }

    async fn create_issue(&self, issue: &NewIssue) -> TrackerResult<CreatedIssue> {
        info!(
            "DRY RUN - Would create issue: {} | labels: {:?} | milestone: {:?}",
            issue.title, issue.labels, issue.milestone
        );
        let mut state = self.lock();
        state.issues_created += 1;
        Ok(CreatedIssue {
            number: state.issues_created,
            title: issue.title.clone(),
        })
    }

    async fn create_comment(&self, issue_number: u64, body: &str) -> TrackerResult<()> {
        info!("DRY RUN - Would comment on issue #{}: {}", issue_number, body);
        Ok(())
    }

    async fn close_issue(&self, issue_number: u64) -> TrackerResult<()> {
        info!("DRY RUN - Would close issue #{}", issue_number);
        Ok(())
    }
}
