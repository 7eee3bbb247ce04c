//! # Row Repository Trait
//!
//! 入力テーブルの読み込みを抽象化

use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

use crate::domain::entities::row::Row;

/// 行リポジトリ
///
/// 入力ファイルから行を読み込むリポジトリ
#[async_trait]
pub trait RowRepository: Send + Sync {
    /// 入力ファイルの全行を読み込む
    ///
    /// # Arguments
    ///
    /// * `path` - 入力ファイルのパス
    ///
    /// # Errors
    ///
    /// ファイルが存在しない・読めない・ヘッダーが不正な場合にエラーを返す
    async fn load_rows(&self, path: &Path) -> Result<Vec<Row>>;
}
