//! Table Adapter Modules
//!
//! 入力テーブル（CSV）の読み込み

pub mod csv_row_repository;
