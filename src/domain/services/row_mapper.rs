//! # Row Mapping Service
//!
//! 行をIssueの下書きに変換するサービス

use crate::domain::entities::issue::IssueDraft;
use crate::domain::entities::row::{Column, Row};

/// HelpWanted列が `yes` のときに付けるラベル
pub const HELP_WANTED_LABEL: &str = "help wanted";

/// 行マッピングサービス
///
/// 列順に各列のルールを適用する。リモート呼び出しは行わない。
pub struct RowMapper;

impl RowMapper {
    /// 行をIssueの下書きに変換する
    ///
    /// | 列 | 効果 |
    /// |---|---|
    /// | Title | タイトル |
    /// | Body | 本文 |
    /// | Status | 作成後のコメント・クローズ判定用に保持 |
    /// | HelpWanted | `yes` なら `help wanted` ラベル |
    /// | Category | セル値をそのままラベルに |
    /// | Milestone | 空でなければマイルストーン名として保持 |
    /// | その他 | `列名:値` ラベル |
    pub fn map(row: &Row) -> IssueDraft {
        let mut draft = IssueDraft::default();

        for (name, value) in row.cells() {
            match Column::parse(name) {
                Column::Title => draft.title = value.clone(),
                Column::Body => draft.body = Some(value.clone()),
                Column::Status => draft.status = value.clone(),
                Column::HelpWanted => {
                    if value == "yes" {
                        draft.labels.push(HELP_WANTED_LABEL.to_string());
                    }
                }
                Column::Category => draft.labels.push(value.clone()),
                Column::Milestone => {
                    if !value.is_empty() {
                        draft.milestone = Some(value.clone());
                    }
                }
                Column::Other(column) => draft.labels.push(format!("{}:{}", column, value)),
            }
        }

        draft
    }
}
