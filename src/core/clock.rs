//! 현재 시각 공급자
//!
//! 토큰 만료(`exp`) 비교에 사용할 현재 시각을 추상화합니다.

use chrono::{DateTime, Utc};

/// 현재 시각을 제공하는 trait
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// 현재 시각 (Unix timestamp, 초)
    fn timestamp(&self) -> i64 {
        self.now().timestamp()
    }
}

/// 시스템 시계
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 항상 같은 시각을 돌려주는 시계
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn at_timestamp(secs: i64) -> Self {
        FixedClock(DateTime::from_timestamp(secs, 0).unwrap_or_default())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
