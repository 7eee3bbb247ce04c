//! # Import Issues Use Case
//!
//! 行をIssueとして登録するユースケース
//!
//! 1行につき最大で次の順に呼び出す:
//!
//! 1. マイルストーン作成 + 一覧の再取得（未知のマイルストーンのみ）
//! 2. Issue作成
//! 3. コメント作成（Statusが空でない場合）
//! 4. クローズ（Statusが `DONE` / `CANCEL` で始まる場合）
//!
//! 期待外のステータスコードはログに残して続行する。通信エラーと
//! 解釈できないレスポンスは実行を中断する。

use anyhow::Result;
use log::{debug, info, warn};
use std::sync::Arc;
use tokio::time::sleep;

use crate::application::dto::import_config::ImportConfig;
use crate::domain::entities::issue::StatusAction;
use crate::domain::entities::milestone::MilestoneIndex;
use crate::domain::entities::row::Row;
use crate::domain::repositories::tracker_repository::{IssueTrackerRepository, TrackerError};
use crate::domain::services::row_mapper::RowMapper;
use crate::domain::services::throttle::RequestThrottle;

/// インポート結果のサマリー
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// 読み込んだ行数
    pub rows_read: usize,
    /// タイトルが空でスキップした行数
    pub rows_skipped: usize,
    pub issues_created: usize,
    pub milestones_created: usize,
    pub comments_created: usize,
    pub issues_closed: usize,
    /// 期待外のステータスで失敗した呼び出し数
    pub failed_calls: usize,
}

/// 1回の実行の状態
struct ImportRun {
    throttle: RequestThrottle,
    milestones: MilestoneIndex,
    summary: ImportSummary,
}

impl ImportRun {
    fn new(throttle: RequestThrottle) -> Self {
        Self {
            throttle,
            milestones: MilestoneIndex::new(),
            summary: ImportSummary::default(),
        }
    }

    /// 続行可能なエラーはログに残して `Ok`、それ以外は `Err` で返す
    fn record_failure(&mut self, action: &str, error: TrackerError) -> Result<()> {
        match error {
            TrackerError::UnexpectedStatus {
                expected,
                status,
                headers,
                body,
            } => {
                warn!(
                    "Failed to {}: status {} (expected {})",
                    action, status, expected
                );
                for (name, value) in &headers {
                    warn!("  {}: {}", name, value);
                }
                warn!("  body: {}", body);
                self.summary.failed_calls += 1;
                Ok(())
            }
            fatal => Err(anyhow::Error::new(fatal).context(format!("Failed to {}", action))),
        }
    }
}

/// Issueインポートユースケース
pub struct ImportIssuesUseCase<T: IssueTrackerRepository + ?Sized> {
    tracker: Arc<T>,
}

impl<T: IssueTrackerRepository + ?Sized> ImportIssuesUseCase<T> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `tracker` - Issueトラッカーリポジトリ
    pub fn new(tracker: Arc<T>) -> Self {
        Self { tracker }
    }

    /// 全行をインポートする
    ///
    /// # Arguments
    ///
    /// * `rows` - 入力行
    /// * `config` - インポート設定
    ///
    /// # Errors
    ///
    /// 通信エラー、または解釈できないレスポンスを受け取った場合
    pub async fn execute(&self, rows: Vec<Row>, config: &ImportConfig) -> Result<ImportSummary> {
        let mut run = ImportRun::new(config.throttle());
        run.summary.rows_read = rows.len();

        if let Some(index) = self.fetch_milestones(&mut run).await? {
            run.milestones = index;
        }
        info!("Loaded {} existing milestones", run.milestones.len());

        for row in &rows {
            self.import_row(row, &mut run).await?;
        }

        Ok(run.summary)
    }

    async fn import_row(&self, row: &Row, run: &mut ImportRun) -> Result<()> {
        let mut draft = RowMapper::map(row);
        if draft.is_skipped() {
            debug!("Skipping row without title: {:?}", row);
            run.summary.rows_skipped += 1;
            return Ok(());
        }

        let milestone = match draft.milestone.take() {
            Some(title) => self.resolve_milestone(&title, run).await?,
            None => None,
        };

        let status = std::mem::take(&mut draft.status);
        let action = StatusAction::from_status(&status);
        let issue = draft.into_new_issue(milestone);

        pace(&mut run.throttle).await;
        let created = match self.tracker.create_issue(&issue).await {
            Ok(created) => created,
            Err(e) => {
                return run.record_failure(&format!("create issue \"{}\"", issue.title), e);
            }
        };
        run.summary.issues_created += 1;
        println!("   Created issue #{}: {}", created.number, created.title);

        if action.comments() {
            pace(&mut run.throttle).await;
            match self.tracker.create_comment(created.number, &status).await {
                Ok(()) => {
                    run.summary.comments_created += 1;
                    println!(
                        "     Created comment for issue {}: {}",
                        created.number, status
                    );
                }
                Err(e) => {
                    run.record_failure(&format!("comment on issue #{}", created.number), e)?
                }
            }
        }

        if action.closes() {
            pace(&mut run.throttle).await;
            match self.tracker.close_issue(created.number).await {
                Ok(()) => {
                    run.summary.issues_closed += 1;
                    println!("     Closed issue : {}", created.number);
                }
                Err(e) => run.record_failure(&format!("close issue #{}", created.number), e)?,
            }
        }

        Ok(())
    }

    /// マイルストーン番号を解決する（未知なら作成して一覧を取り直す）
    async fn resolve_milestone(&self, title: &str, run: &mut ImportRun) -> Result<Option<u64>> {
        if !run.milestones.contains(title) {
            pace(&mut run.throttle).await;
            match self.tracker.create_milestone(title).await {
                Ok(()) => {
                    run.summary.milestones_created += 1;
                    println!("     Created milestone : {}", title);
                }
                Err(e) => run.record_failure(&format!("create milestone \"{}\"", title), e)?,
            }

            if let Some(index) = self.fetch_milestones(run).await? {
                run.milestones = index;
            }
        }

        let number = run.milestones.get(title);
        if number.is_none() {
            warn!(
                "Milestone \"{}\" could not be resolved; creating issue without it",
                title
            );
        }
        Ok(number)
    }

    /// 全ページのマイルストーンを取得する。続行可能な失敗では `None`
    async fn fetch_milestones(&self, run: &mut ImportRun) -> Result<Option<MilestoneIndex>> {
        let mut milestones = Vec::new();
        let mut page = 1;

        loop {
            pace(&mut run.throttle).await;
            match self.tracker.list_milestones(page).await {
                Ok(result) => {
                    milestones.extend(result.milestones);
                    if !result.has_next {
                        break;
                    }
                    page += 1;
                }
                Err(e) => {
                    run.record_failure("list milestones", e)?;
                    return Ok(None);
                }
            }
        }

        Ok(Some(milestones.into_iter().collect()))
    }
}

/// スロットルに従って待機する
async fn pace(throttle: &mut RequestThrottle) {
    let wait = throttle.acquire();
    if let Some(cooldown) = wait.cooldown {
        println!(
            " Pausing for {} seconds to avoid triggering GitHub abuse detection mechanism...",
            cooldown.as_secs()
        );
        sleep(cooldown).await;
    }
    if !wait.delay.is_zero() {
        sleep(wait.delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::domain::entities::issue::{CreatedIssue, NewIssue};
    use crate::domain::entities::milestone::Milestone;
    use crate::domain::repositories::tracker_repository::{
        MilestonePage, MockIssueTrackerRepository, TrackerResult,
    };

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        ListMilestones(u32),
        CreateMilestone(String),
        CreateIssue(NewIssue),
        CreateComment(u64, String),
        CloseIssue(u64),
    }

    /// 呼び出しを記録し、リモートの状態を模倣するトラッカー
    struct RecordingTracker {
        calls: Mutex<Vec<Call>>,
        milestones: Mutex<Vec<Milestone>>,
        page_size: usize,
        rejected_titles: Vec<String>,
        next_issue: Mutex<u64>,
    }

    impl RecordingTracker {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                milestones: Mutex::new(Vec::new()),
                page_size: 100,
                rejected_titles: Vec::new(),
                next_issue: Mutex::new(1),
            }
        }

        fn with_milestones(self, milestones: Vec<Milestone>) -> Self {
            *self.milestones.lock().unwrap() = milestones;
            self
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
            self.calls().iter().filter(|c| pred(c)).count()
        }

        fn created_issues(&self) -> Vec<NewIssue> {
            self.calls()
                .into_iter()
                .filter_map(|c| match c {
                    Call::CreateIssue(issue) => Some(issue),
                    _ => None,
                })
                .collect()
        }

        fn unprocessable() -> TrackerError {
            TrackerError::UnexpectedStatus {
                expected: 201,
                status: 422,
                headers: vec![("x-github-request-id".to_string(), "abc".to_string())],
                body: "{\"message\":\"Validation Failed\"}".to_string(),
            }
        }
    }

    #[async_trait]
    impl IssueTrackerRepository for RecordingTracker {
        async fn list_milestones(&self, page: u32) -> TrackerResult<MilestonePage> {
            self.calls.lock().unwrap().push(Call::ListMilestones(page));
            let all = self.milestones.lock().unwrap().clone();
            let start = (page as usize - 1) * self.page_size;
            let milestones: Vec<Milestone> =
                all.iter().skip(start).take(self.page_size).cloned().collect();
            Ok(MilestonePage {
                has_next: start + milestones.len() < all.len(),
                milestones,
            })
        }

        async fn create_milestone(&self, title: &str) -> TrackerResult<()> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::CreateMilestone(title.to_string()));
            let mut milestones = self.milestones.lock().unwrap();
            let number = milestones.len() as u64 + 1;
            milestones.push(Milestone::new(number, title));
            Ok(())
        }

        async fn create_issue(&self, issue: &NewIssue) -> TrackerResult<CreatedIssue> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::CreateIssue(issue.clone()));
            if self.rejected_titles.contains(&issue.title) {
                return Err(Self::unprocessable());
            }
            let mut next = self.next_issue.lock().unwrap();
            let number = *next;
            *next += 1;
            Ok(CreatedIssue {
                number,
                title: issue.title.clone(),
            })
        }

        async fn create_comment(&self, issue_number: u64, body: &str) -> TrackerResult<()> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::CreateComment(issue_number, body.to_string()));
            Ok(())
        }

        async fn close_issue(&self, issue_number: u64) -> TrackerResult<()> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::CloseIssue(issue_number));
            Ok(())
        }
    }

    fn row(cells: &[(&str, &str)]) -> Row {
        cells.iter().copied().collect()
    }

    async fn run_import(tracker: &Arc<RecordingTracker>, rows: Vec<Row>) -> ImportSummary {
        ImportIssuesUseCase::new(tracker.clone())
            .execute(rows, &ImportConfig::unthrottled())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_readme_example_end_to_end() {
        let tracker = Arc::new(RecordingTracker::new());

        let summary = run_import(
            &tracker,
            vec![row(&[
                ("Status", ""),
                ("Category", "bug"),
                ("Milestone", "docs"),
                ("Title", "Make a README"),
                ("Body", "like it says"),
            ])],
        )
        .await;

        assert_eq!(
            tracker.calls(),
            vec![
                Call::ListMilestones(1),
                Call::CreateMilestone("docs".to_string()),
                Call::ListMilestones(1),
                Call::CreateIssue(NewIssue {
                    title: "Make a README".to_string(),
                    body: Some("like it says".to_string()),
                    labels: vec!["bug".to_string()],
                    milestone: Some(1),
                }),
            ]
        );
        assert_eq!(summary.issues_created, 1);
        assert_eq!(summary.milestones_created, 1);
        assert_eq!(summary.comments_created, 0);
        assert_eq!(summary.issues_closed, 0);
    }

    #[tokio::test]
    async fn test_empty_title_makes_no_issue_call() {
        let tracker = Arc::new(RecordingTracker::new());

        let summary = run_import(
            &tracker,
            vec![
                row(&[("Title", ""), ("Body", "orphan"), ("Milestone", "docs")]),
                row(&[("Title", ""), ("Status", "DONE")]),
            ],
        )
        .await;

        assert_eq!(tracker.calls(), vec![Call::ListMilestones(1)]);
        assert_eq!(summary.rows_read, 2);
        assert_eq!(summary.rows_skipped, 2);
        assert_eq!(summary.issues_created, 0);
    }

    #[tokio::test]
    async fn test_shared_milestone_created_once() {
        let tracker = Arc::new(RecordingTracker::new());

        run_import(
            &tracker,
            vec![
                row(&[("Title", "a"), ("Milestone", "v1.0")]),
                row(&[("Title", "b"), ("Milestone", "v1.0")]),
                row(&[("Title", "c"), ("Milestone", "v1.0")]),
            ],
        )
        .await;

        assert_eq!(
            tracker.count(|c| matches!(c, Call::CreateMilestone(_))),
            1
        );
        let numbers: Vec<Option<u64>> = tracker
            .created_issues()
            .iter()
            .map(|i| i.milestone)
            .collect();
        assert_eq!(numbers, vec![Some(1), Some(1), Some(1)]);
    }

    #[tokio::test]
    async fn test_existing_milestone_is_reused() {
        let tracker = Arc::new(
            RecordingTracker::new().with_milestones(vec![Milestone::new(42, "docs")]),
        );

        run_import(&tracker, vec![row(&[("Title", "a"), ("Milestone", "docs")])]).await;

        assert_eq!(
            tracker.count(|c| matches!(c, Call::CreateMilestone(_))),
            0
        );
        assert_eq!(tracker.created_issues()[0].milestone, Some(42));
    }

    #[tokio::test]
    async fn test_milestone_listing_follows_pages() {
        let mut inner = RecordingTracker::new().with_milestones(vec![
            Milestone::new(1, "a"),
            Milestone::new(2, "b"),
            Milestone::new(3, "c"),
        ]);
        inner.page_size = 2;
        let tracker = Arc::new(inner);

        run_import(&tracker, vec![row(&[("Title", "t"), ("Milestone", "c")])]).await;

        assert_eq!(
            tracker.calls()[..2],
            [Call::ListMilestones(1), Call::ListMilestones(2)]
        );
        assert_eq!(
            tracker.count(|c| matches!(c, Call::CreateMilestone(_))),
            0
        );
        assert_eq!(tracker.created_issues()[0].milestone, Some(3));
    }

    #[tokio::test]
    async fn test_status_done_comments_then_closes() {
        let tracker = Arc::new(RecordingTracker::new());

        let summary = run_import(
            &tracker,
            vec![row(&[("Title", "t"), ("Status", "DONE - shipped")])],
        )
        .await;

        let calls = tracker.calls();
        assert_eq!(
            calls[calls.len() - 2..],
            [
                Call::CreateComment(1, "DONE - shipped".to_string()),
                Call::CloseIssue(1),
            ]
        );
        assert_eq!(summary.comments_created, 1);
        assert_eq!(summary.issues_closed, 1);
    }

    #[tokio::test]
    async fn test_status_cancel_comments_then_closes() {
        let tracker = Arc::new(RecordingTracker::new());

        run_import(&tracker, vec![row(&[("Title", "t"), ("Status", "CANCEL")])]).await;

        let calls = tracker.calls();
        assert_eq!(
            calls[calls.len() - 2..],
            [
                Call::CreateComment(1, "CANCEL".to_string()),
                Call::CloseIssue(1),
            ]
        );
    }

    #[tokio::test]
    async fn test_status_in_progress_comments_only() {
        let tracker = Arc::new(RecordingTracker::new());

        run_import(
            &tracker,
            vec![row(&[("Title", "t"), ("Status", "in progress")])],
        )
        .await;

        assert_eq!(
            tracker.count(|c| matches!(c, Call::CreateComment(1, body) if body == "in progress")),
            1
        );
        assert_eq!(tracker.count(|c| matches!(c, Call::CloseIssue(_))), 0);
    }

    #[tokio::test]
    async fn test_status_containing_done_does_not_close() {
        let tracker = Arc::new(RecordingTracker::new());

        run_import(&tracker, vec![row(&[("Title", "t"), ("Status", "not DONE")])]).await;

        assert_eq!(tracker.count(|c| matches!(c, Call::CreateComment(..))), 1);
        assert_eq!(tracker.count(|c| matches!(c, Call::CloseIssue(_))), 0);
    }

    #[tokio::test]
    async fn test_empty_status_no_comment_no_close() {
        let tracker = Arc::new(RecordingTracker::new());

        run_import(&tracker, vec![row(&[("Title", "t"), ("Status", "")])]).await;

        assert_eq!(tracker.count(|c| matches!(c, Call::CreateComment(..))), 0);
        assert_eq!(tracker.count(|c| matches!(c, Call::CloseIssue(_))), 0);
    }

    #[tokio::test]
    async fn test_labels_from_columns() {
        let tracker = Arc::new(RecordingTracker::new());

        run_import(
            &tracker,
            vec![row(&[
                ("Title", "t"),
                ("HelpWanted", "yes"),
                ("Owner", "alice"),
            ])],
        )
        .await;

        assert_eq!(
            tracker.created_issues()[0].labels,
            vec!["help wanted".to_string(), "Owner:alice".to_string()]
        );
    }

    #[tokio::test]
    async fn test_rejected_issue_is_logged_and_run_continues() {
        let mut inner = RecordingTracker::new();
        inner.rejected_titles = vec!["bad".to_string()];
        let tracker = Arc::new(inner);

        let summary = run_import(
            &tracker,
            vec![
                row(&[("Title", "bad"), ("Status", "DONE")]),
                row(&[("Title", "good"), ("Status", "DONE")]),
            ],
        )
        .await;

        assert_eq!(summary.failed_calls, 1);
        assert_eq!(summary.issues_created, 1);
        assert_eq!(tracker.count(|c| matches!(c, Call::CreateComment(..))), 1);
        assert_eq!(tracker.count(|c| matches!(c, Call::CloseIssue(1))), 1);
    }

    #[tokio::test]
    async fn test_transport_error_aborts_run() {
        let mut mock = MockIssueTrackerRepository::new();
        mock.expect_list_milestones()
            .times(1)
            .returning(|_| Ok(MilestonePage::default()));
        mock.expect_create_issue()
            .times(1)
            .returning(|_| Err(TrackerError::Transport("connection refused".to_string())));

        let use_case = ImportIssuesUseCase::new(Arc::new(mock));
        let result = use_case
            .execute(
                vec![row(&[("Title", "a")]), row(&[("Title", "b")])],
                &ImportConfig::unthrottled(),
            )
            .await;

        let err = result.unwrap_err();
        assert!(format!("{:#}", err).contains("connection refused"));
    }

    #[tokio::test]
    async fn test_failed_relist_creates_issue_without_milestone() {
        let mut mock = MockIssueTrackerRepository::new();
        let mut listed = 0;
        mock.expect_list_milestones().times(2).returning(move |_| {
            listed += 1;
            if listed == 1 {
                Ok(MilestonePage::default())
            } else {
                Err(TrackerError::UnexpectedStatus {
                    expected: 200,
                    status: 502,
                    headers: vec![],
                    body: "Bad Gateway".to_string(),
                })
            }
        });
        mock.expect_create_milestone()
            .times(1)
            .returning(|_| Ok(()));
        mock.expect_create_issue()
            .withf(|issue| issue.milestone.is_none())
            .times(1)
            .returning(|issue| {
                Ok(CreatedIssue {
                    number: 9,
                    title: issue.title.clone(),
                })
            });

        let use_case = ImportIssuesUseCase::new(Arc::new(mock));
        let summary = use_case
            .execute(
                vec![row(&[("Title", "a"), ("Milestone", "docs")])],
                &ImportConfig::unthrottled(),
            )
            .await
            .unwrap();

        assert_eq!(summary.failed_calls, 1);
        assert_eq!(summary.milestones_created, 1);
        assert_eq!(summary.issues_created, 1);
    }
}
