//! # Milestone Entity
//!
//! マイルストーンと、実行中のタイトル→番号キャッシュ

use std::collections::HashMap;

/// リモートのマイルストーン
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Milestone {
    pub number: u64,
    pub title: String,
}

impl Milestone {
    pub fn new(number: u64, title: impl Into<String>) -> Self {
        Self {
            number,
            title: title.into(),
        }
    }
}

/// マイルストーンのタイトル→番号インデックス
///
/// 実行中のみ保持する。作成後は必ずリモートから再取得して置き換える。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MilestoneIndex {
    by_title: HashMap<String, u64>,
}

impl MilestoneIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// タイトルに対応する番号
    pub fn get(&self, title: &str) -> Option<u64> {
        self.by_title.get(title).copied()
    }

    pub fn contains(&self, title: &str) -> bool {
        self.by_title.contains_key(title)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.by_title.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_title.is_empty()
    }
}

impl FromIterator<Milestone> for MilestoneIndex {
    fn from_iter<I: IntoIterator<Item = Milestone>>(iter: I) -> Self {
        Self {
            by_title: iter.into_iter().map(|m| (m.title, m.number)).collect(),
        }
    }
}
