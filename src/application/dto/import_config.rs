//! # Import Configuration DTO
//!
//! インポート実行時の設定のData Transfer Object

use std::time::Duration;

use crate::domain::services::throttle::{
    RequestThrottle, DEFAULT_BURST_LIMIT, DEFAULT_COOLDOWN, DEFAULT_REQUEST_DELAY,
};

/// インポート設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    /// 毎回の呼び出し前の待機
    pub request_delay: Duration,
    /// 長い待機を入れるまでの呼び出し数
    pub burst_limit: u32,
    /// 長い待機の長さ
    pub cooldown: Duration,
}

impl ImportConfig {
    /// 新しいインポート設定を作成します。
    ///
    /// ```
    /// use std::time::Duration;
    /// use issue_import::application::dto::import_config::ImportConfig;
    ///
    /// let config = ImportConfig::new(Duration::from_millis(500), 20, Duration::from_secs(30));
    /// assert_eq!(config.burst_limit, 20);
    /// ```
    pub fn new(request_delay: Duration, burst_limit: u32, cooldown: Duration) -> Self {
        Self {
            request_delay,
            burst_limit,
            cooldown,
        }
    }

    /// 待機なしの設定（ドライラン用）
    pub fn unthrottled() -> Self {
        Self::new(Duration::ZERO, u32::MAX, Duration::ZERO)
    }

    /// 設定からスロットルを作る
    pub fn throttle(&self) -> RequestThrottle {
        RequestThrottle::new(self.request_delay, self.burst_limit, self.cooldown)
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self::new(DEFAULT_REQUEST_DELAY, DEFAULT_BURST_LIMIT, DEFAULT_COOLDOWN)
    }
}
