//! Repository Implementations
//!
//! Domain層のRepositoryトレイトの実装

pub mod dry_run_tracker_repository;
pub mod github_tracker_repository;
