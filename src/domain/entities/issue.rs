//! # Issue Entities
//!
//! 行から組み立てるIssueの下書きと、作成済みIssueの表現

/// 行をマッピングした結果（マイルストーン未解決）
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IssueDraft {
    pub title: String,
    /// Body列が存在しない場合は `None`
    pub body: Option<String>,
    pub labels: Vec<String>,
    /// 空でないMilestone列の値
    pub milestone: Option<String>,
    /// Status列の値（作成後のコメント・クローズ判定に使う）
    pub status: String,
}

impl IssueDraft {
    /// タイトルが空の行はスキップ対象
    pub fn is_skipped(&self) -> bool {
        self.title.is_empty()
    }

    /// マイルストーン番号を付けて作成リクエストに変換
    pub fn into_new_issue(self, milestone: Option<u64>) -> NewIssue {
        NewIssue {
            title: self.title,
            body: self.body,
            labels: self.labels,
            milestone,
        }
    }
}

/// Issue作成リクエスト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIssue {
    pub title: String,
    pub body: Option<String>,
    pub labels: Vec<String>,
    pub milestone: Option<u64>,
}

/// リモートで作成されたIssue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedIssue {
    pub number: u64,
    pub title: String,
}

/// Status列から決まる作成後の処理
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusAction {
    /// 何もしない
    None,
    /// コメントのみ
    Comment,
    /// コメントしてからクローズ
    CommentAndClose,
}

impl StatusAction {
    const CLOSING_PREFIXES: [&'static str; 2] = ["DONE", "CANCEL"];

    /// Status文字列を判定する。
    ///
    /// 大文字小文字を区別した前方一致のみ。途中に `DONE` を含むだけでは
    /// クローズしない。
    ///
    /// ```
    /// use issue_import::domain::entities::issue::StatusAction;
    ///
    /// assert_eq!(StatusAction::from_status(""), StatusAction::None);
    /// assert_eq!(StatusAction::from_status("in progress"), StatusAction::Comment);
    /// assert_eq!(StatusAction::from_status("DONE - shipped"), StatusAction::CommentAndClose);
    /// assert_eq!(StatusAction::from_status("not DONE"), StatusAction::Comment);
    /// ```
    pub fn from_status(status: &str) -> Self {
        if status.is_empty() {
            StatusAction::None
        } else if Self::CLOSING_PREFIXES
            .iter()
            .any(|prefix| status.starts_with(prefix))
        {
            StatusAction::CommentAndClose
        } else {
            StatusAction::Comment
        }
    }

    pub fn comments(self) -> bool {
        !matches!(self, StatusAction::None)
    }

    pub fn closes(self) -> bool {
        matches!(self, StatusAction::CommentAndClose)
    }
}
