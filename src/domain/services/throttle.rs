//! # Request Throttle
//!
//! リモート呼び出しのペース制御
//!
//! 呼び出しごとに短い待機を入れ、前回リセット以降の呼び出し数が上限を
//! 超えたら次の呼び出しの前に長い待機を入れてカウンタを戻す。
//! トークンバケットではなく単純な回数予算。

use std::time::Duration;

pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_secs(1);
pub const DEFAULT_BURST_LIMIT: u32 = 20;
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(30);

/// 1回の呼び出し前に入れる待機
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottleDelay {
    /// 回数予算を使い切ったときの長い待機
    pub cooldown: Option<Duration>,
    /// 毎回の短い待機
    pub delay: Duration,
}

impl ThrottleDelay {
    pub fn total(&self) -> Duration {
        self.cooldown.unwrap_or_default() + self.delay
    }
}

/// リクエストスロットル
#[derive(Debug, Clone)]
pub struct RequestThrottle {
    delay: Duration,
    burst_limit: u32,
    cooldown: Duration,
    calls: u32,
}

impl RequestThrottle {
    pub fn new(delay: Duration, burst_limit: u32, cooldown: Duration) -> Self {
        Self {
            delay,
            burst_limit,
            cooldown,
            calls: 0,
        }
    }

    /// 次の呼び出しの前に入れる待機を返し、呼び出し数を数える
    pub fn acquire(&mut self) -> ThrottleDelay {
        let cooldown = if self.calls > self.burst_limit {
            self.calls = 0;
            Some(self.cooldown)
        } else {
            None
        };
        self.calls += 1;

        ThrottleDelay {
            cooldown,
            delay: self.delay,
        }
    }

    /// 前回リセット以降の呼び出し数
    pub fn calls(&self) -> u32 {
        self.calls
    }
}

impl Default for RequestThrottle {
    fn default() -> Self {
        Self::new(DEFAULT_REQUEST_DELAY, DEFAULT_BURST_LIMIT, DEFAULT_COOLDOWN)
    }
}
