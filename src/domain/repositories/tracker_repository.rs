//! # Issue Tracker Repository Trait
//!
//! リモートのIssueトラッカー（マイルストーン・Issue・コメント）を抽象化

use async_trait::async_trait;
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::issue::{CreatedIssue, NewIssue};
use crate::domain::entities::milestone::Milestone;

/// トラッカー呼び出しのエラー
#[derive(Debug, Error)]
pub enum TrackerError {
    /// 期待したステータスコード以外が返った（ログに残して処理を続行）
    #[error("unexpected status {status} (expected {expected}): {body}")]
    UnexpectedStatus {
        expected: u16,
        status: u16,
        headers: Vec<(String, String)>,
        body: String,
    },

    /// 通信そのものに失敗した
    #[error("request failed: {0}")]
    Transport(String),

    /// レスポンスを解釈できなかった
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl TrackerError {
    /// 実行を続けてよいエラーかどうか
    pub fn is_recoverable(&self) -> bool {
        matches!(self, TrackerError::UnexpectedStatus { .. })
    }
}

pub type TrackerResult<T> = std::result::Result<T, TrackerError>;

/// マイルストーン一覧の1ページ
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MilestonePage {
    pub milestones: Vec<Milestone>,
    /// 次のページがあるかどうか
    pub has_next: bool,
}

/// Issueトラッカーリポジトリ
///
/// 1メソッドにつきリモート呼び出し1回
#[cfg_attr(test, automock)]
#[async_trait]
pub trait IssueTrackerRepository: Send + Sync {
    /// マイルストーン一覧を取得（ページは1始まり）
    async fn list_milestones(&self, page: u32) -> TrackerResult<MilestonePage>;

    /// マイルストーンを作成（番号は返さないので呼び出し側で再取得する）
    async fn create_milestone(&self, title: &str) -> TrackerResult<()>;

    /// Issueを作成
    async fn create_issue(&self, issue: &NewIssue) -> TrackerResult<CreatedIssue>;

    /// Issueにコメントを追加
    async fn create_comment(&self, issue_number: u64, body: &str) -> TrackerResult<()>;

    /// Issueをクローズ
    async fn close_issue(&self, issue_number: u64) -> TrackerResult<()>;
}
