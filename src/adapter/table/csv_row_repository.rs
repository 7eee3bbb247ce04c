//! CSV Row Repository Implementation
//!
//! RowRepositoryのCSVファイル実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{info, warn};
use std::fs;
use std::path::Path;

use crate::domain::entities::row::Row;
use crate::domain::repositories::row_repository::RowRepository;

/// Column every input table must have
pub const TITLE_COLUMN: &str = "Title";

/// CSVファイルベースの行リポジトリ
pub struct CsvRowRepository {
    comment_prefix: String,
}

impl CsvRowRepository {
    /// 新しいリポジトリを作成
    pub fn new(comment_prefix: impl Into<String>) -> Self {
        Self {
            comment_prefix: comment_prefix.into(),
        }
    }

    /// Drop comment lines and blank lines, keeping everything else verbatim
    fn strip_comments(content: &str, comment_prefix: &str) -> String {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter(|line| comment_prefix.is_empty() || !line.starts_with(comment_prefix))
            .map(|line| format!("{}\n", line))
            .collect()
    }

    /// Parse filtered CSV text; the first line is the header
    fn parse_rows(content: &str) -> Result<Vec<Row>> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .context("Failed to read header line")?
            .iter()
            .map(str::to_string)
            .collect();

        if headers.is_empty() {
            return Ok(Vec::new());
        }
        if !headers.iter().any(|h| h == TITLE_COLUMN) {
            anyhow::bail!(
                "Header has no '{}' column: {}",
                TITLE_COLUMN,
                headers.join(",")
            );
        }

        let mut rows: Vec<Row> = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record =
                record.with_context(|| format!("Failed to parse record {}", index + 1))?;

            if record.len() > headers.len() {
                warn!(
                    "Record {} has {} fields but the header has {}; extra fields ignored",
                    index + 1,
                    record.len(),
                    headers.len()
                );
            }

            rows.push(
                headers
                    .iter()
                    .enumerate()
                    .map(|(i, name)| (name.clone(), record.get(i).unwrap_or("").to_string()))
                    .collect(),
            );
        }

        Ok(rows)
    }

    fn load_rows_internal(path: &Path, comment_prefix: &str) -> Result<Vec<Row>> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display()))?;

        let rows = Self::parse_rows(&Self::strip_comments(&content, comment_prefix))
            .with_context(|| format!("Failed to parse input file: {}", path.display()))?;

        info!("Read {} rows from {}", rows.len(), path.display());
        Ok(rows)
    }
}

impl Default for CsvRowRepository {
    fn default() -> Self {
        Self::new("#")
    }
}

#[async_trait]
impl RowRepository for CsvRowRepository {
    async fn load_rows(&self, path: &Path) -> Result<Vec<Row>> {
        let path = path.to_path_buf();
        let comment_prefix = self.comment_prefix.clone();
        tokio::task::spawn_blocking(move || Self::load_rows_internal(&path, &comment_prefix))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    }
}
