//! GitHub Adapter Modules
//!
//! GitHub REST API統合のためのアダプターモジュール

pub mod client;
pub mod models;
