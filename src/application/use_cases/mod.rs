//! # Use Cases
//!
//! アプリケーションのビジネスフロー（ユースケース）
//!
//! ## ユースケース
//!
//! - **LoadRowsUseCase**: 入力ファイルの読み込み
//! - **ImportIssuesUseCase**: マイルストーン・Issue・コメントの登録

pub mod import_issues;
pub mod load_rows;
