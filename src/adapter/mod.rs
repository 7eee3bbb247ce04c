//! Adapter Layer
//!
//! 外部システム（GitHub REST API, ファイルシステム）との統合

pub mod config;
pub mod github;
pub mod repositories;
pub mod table;
