//! 按分钟分桶的请求限流器。
//!
//! 每个调用方在每个自然分钟内拥有独立的计数器。过期的计数器不会被立即清理，
//! 而是每放行若干次请求后统一清理一次。

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use tracing::debug;

/// 默认每分钟允许的请求数。
pub const DEFAULT_LIMIT_PER_MINUTE: u32 = 30;
/// 默认每多少次准入判断清理一次过期窗口。
pub const DEFAULT_PURGE_EVERY: u64 = 100;

const WINDOW_MS: i64 = 60_000;
const PURGE_GRACE_MS: i64 = 1_000;
const MIN_LIMIT: u32 = 1;
const MAX_LIMIT: u32 = 1_000;

/// 某个调用方在某个分钟内的计数窗口。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RateWindow {
    count: u32,
    reset_at_ms: i64,
}

/// 一次准入判断的结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateDecision {
    /// 是否放行。
    pub allowed: bool,
    /// 每分钟的请求上限。
    pub limit: u32,
    /// 当前窗口内剩余的请求数。
    pub remaining: u32,
    /// 当前窗口的重置时间（毫秒时间戳）。
    pub reset_at_ms: i64,
}

impl RateDecision {
    /// 重置时间，单位为秒，用于 `X-RateLimit-Reset` 响应头。
    pub fn reset_at_secs(&self) -> i64 {
        self.reset_at_ms.div_euclid(1000)
    }
}

/// 限流器。由调用方持有并注入，不存在全局实例。
#[derive(Debug)]
pub struct RateLimiter {
    limit: u32,
    purge_every: u64,
    windows: DashMap<(String, i64), RateWindow>,
    admissions: AtomicU64,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT_PER_MINUTE, DEFAULT_PURGE_EVERY)
    }
}

impl RateLimiter {
    /// 创建限流器。`limit` 会被限制在 1 到 1000 之间，`purge_every` 至少为 1。
    pub fn new(limit: u32, purge_every: u64) -> Self {
        Self {
            limit: limit.clamp(MIN_LIMIT, MAX_LIMIT),
            purge_every: purge_every.max(1),
            windows: DashMap::new(),
            admissions: AtomicU64::new(0),
        }
    }

    /// 每分钟的请求上限。
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// 以当前时间为调用方做一次准入判断。
    pub fn admit(&self, identity: &str) -> RateDecision {
        self.admit_at(identity, chrono::Utc::now().timestamp_millis())
    }

    /// 以给定的时间（毫秒时间戳）为调用方做一次准入判断。
    pub fn admit_at(&self, identity: &str, now_ms: i64) -> RateDecision {
        let bucket = now_ms.div_euclid(WINDOW_MS);
        let reset_at_ms = (bucket + 1) * WINDOW_MS;

        let count = {
            let mut window = self
                .windows
                .entry((identity.to_string(), bucket))
                .or_insert(RateWindow {
                    count: 0,
                    reset_at_ms,
                });
            window.count = window.count.saturating_add(1);
            window.count
        };

        let admissions = self.admissions.fetch_add(1, Ordering::Relaxed) + 1;
        if admissions % self.purge_every == 0 {
            self.purge(now_ms);
        }

        RateDecision {
            allowed: count <= self.limit,
            limit: self.limit,
            remaining: self.limit.saturating_sub(count),
            reset_at_ms,
        }
    }

    /// 当前保存的窗口数量。
    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    fn purge(&self, now_ms: i64) {
        let before = self.windows.len();
        self.windows
            .retain(|_, window| window.reset_at_ms >= now_ms - PURGE_GRACE_MS);
        let removed = before.saturating_sub(self.windows.len());
        if removed > 0 {
            debug!("清理了 {} 个过期的限流窗口", removed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: i64 = 1_700_000_040_000;

    #[test]
    fn test_limit_within_one_window() {
        let limiter = RateLimiter::new(2, DEFAULT_PURGE_EVERY);
        let decisions: Vec<_> = (0..3).map(|i| limiter.admit_at("1.2.3.4", T0 + i)).collect();

        assert_eq!(
            decisions.iter().map(|d| d.allowed).collect::<Vec<_>>(),
            vec![true, true, false]
        );
        assert_eq!(decisions[0].remaining, 1);
        assert_eq!(decisions[1].remaining, 0);
        assert_eq!(decisions[2].remaining, 0);
        assert_eq!(decisions[2].limit, 2);
        assert_eq!(decisions[0].reset_at_ms, (T0 / 60_000 + 1) * 60_000);
    }

    #[test]
    fn test_windows_are_independent() {
        let limiter = RateLimiter::new(1, DEFAULT_PURGE_EVERY);
        assert!(limiter.admit_at("a", T0).allowed);
        assert!(!limiter.admit_at("a", T0).allowed);
        assert!(limiter.admit_at("b", T0).allowed);

        let next_minute = (T0 / 60_000 + 1) * 60_000;
        let decision = limiter.admit_at("a", next_minute);
        assert!(decision.allowed);
        assert_eq!(decision.reset_at_ms, next_minute + 60_000);
    }

    #[test]
    fn test_expired_windows_are_purged() {
        let limiter = RateLimiter::new(10, 3);
        limiter.admit_at("a", T0);
        limiter.admit_at("b", T0);
        assert_eq!(limiter.window_count(), 2);

        // 第三次准入触发清理，此时前两个窗口已结束超过一秒。
        let later = T0 + 5 * 60_000;
        limiter.admit_at("c", later);
        assert_eq!(limiter.window_count(), 1);
    }

    #[test]
    fn test_recent_window_survives_purge() {
        let limiter = RateLimiter::new(10, 2);
        let bucket_end = (T0 / 60_000 + 1) * 60_000;
        limiter.admit_at("a", bucket_end - 1);
        limiter.admit_at("b", bucket_end + 500);
        assert_eq!(limiter.window_count(), 2);
    }

    #[test]
    fn test_limit_is_clamped() {
        assert_eq!(RateLimiter::new(0, 1).limit(), 1);
        assert_eq!(RateLimiter::new(5_000, 1).limit(), 1_000);
        assert_eq!(RateLimiter::default().limit(), 30);
    }

    #[test]
    fn test_reset_in_seconds() {
        let decision = RateLimiter::default().admit_at("x", T0);
        assert_eq!(decision.reset_at_secs(), decision.reset_at_ms / 1000);
    }
}
