//! # Domain Entities
//!
//! ビジネスエンティティとバリューオブジェクトを定義するモジュール
//!
//! ## エンティティ
//!
//! - **Row**: 入力テーブルの1行（列順を保持）
//! - **IssueDraft / NewIssue / CreatedIssue**: Issueの各段階の表現
//! - **Milestone / MilestoneIndex**: マイルストーンとそのキャッシュ

pub mod issue;
pub mod milestone;
pub mod row;
