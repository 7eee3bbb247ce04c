//! # Row Entity
//!
//! 入力テーブルの1行と、列名による振り分けキー

/// 入力テーブルの1行
///
/// ヘッダー順に並んだ `(列名, セル値)` のペア
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    cells: Vec<(String, String)>,
}

impl Row {
    /// 新しい行を作成
    pub fn new(cells: Vec<(String, String)>) -> Self {
        Self { cells }
    }

    /// 列名でセル値を取得（同名の列が複数ある場合は最初の値）
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// 全セルへの参照を列順に返す
    pub fn cells(&self) -> &[(String, String)] {
        &self.cells
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

/// 列名の振り分けキー
///
/// 列名は大文字小文字を区別して完全一致で判定する
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column<'a> {
    Title,
    Body,
    Status,
    HelpWanted,
    Category,
    Milestone,
    /// 認識されない列（ラベル `列名:値` になる）
    Other(&'a str),
}

impl<'a> Column<'a> {
    /// 列名をパース
    pub fn parse(name: &'a str) -> Self {
        match name {
            "Title" => Column::Title,
            "Body" => Column::Body,
            "Status" => Column::Status,
            "HelpWanted" => Column::HelpWanted,
            "Category" => Column::Category,
            "Milestone" => Column::Milestone,
            other => Column::Other(other),
        }
    }
}
