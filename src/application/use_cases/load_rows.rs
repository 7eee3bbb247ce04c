//! # Load Rows Use Case
//!
//! 入力ファイル読み込みユースケース

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use crate::domain::entities::row::Row;
use crate::domain::repositories::row_repository::RowRepository;

/// 入力ファイル読み込みユースケース
pub struct LoadRowsUseCase<R: RowRepository> {
    row_repository: Arc<R>,
}

impl<R: RowRepository> LoadRowsUseCase<R> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `row_repository` - 行リポジトリ
    pub fn new(row_repository: Arc<R>) -> Self {
        Self { row_repository }
    }

    /// 入力ファイルから行を読み込む
    ///
    /// # Errors
    ///
    /// ファイルの読み込みに失敗した場合にエラーを返す
    pub async fn execute(&self, path: &Path) -> Result<Vec<Row>> {
        self.row_repository.load_rows(path).await
    }
}
