//! # Domain Services
//!
//! エンティティに属さないビジネスルール
//!
//! - **RowMapper**: 行→Issue下書きの列ルール
//! - **RequestThrottle**: リモート呼び出しのペース制御

pub mod row_mapper;
pub mod throttle;
