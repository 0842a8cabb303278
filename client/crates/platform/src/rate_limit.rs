//! Rate Limiting Infrastructure
//!
//! In-memory login-attempt tracking per identifier. Records live for the
//! process lifetime only; there is no persistence and no teardown beyond
//! process exit.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::time::Instant;

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum attempts allowed in the window
    pub max_attempts: u32,
    /// Time window duration
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            window: Duration::from_secs(15 * 60),
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_attempts: u32, window_secs: u64) -> Self {
        Self {
            max_attempts,
            window: Duration::from_secs(window_secs),
        }
    }

    pub fn window_ms(&self) -> i64 {
        self.window.as_millis() as i64
    }
}

/// Per-identifier attempt record. One record per identifier.
#[derive(Debug)]
struct AttemptRecord {
    count: u32,
    window_started_at: Instant,
}

/// Tracks sign-in attempts per identifier and decides when to block.
///
/// An explicitly constructed object, never a process-wide global: each guard
/// instance owns its own tracker so tests cannot leak counters into each
/// other.
///
/// Counting is attempt-based, not failure-based: callers consult the tracker
/// before the credential check, so successful sign-ins consume budget too.
#[derive(Debug)]
pub struct LoginAttemptTracker {
    config: RateLimitConfig,
    records: Mutex<HashMap<String, AttemptRecord>>,
}

impl LoginAttemptTracker {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            records: Mutex::new(HashMap::new()),
        }
    }

    /// Decide whether an attempt for `identifier` must be blocked.
    ///
    /// The whole check-and-increment sits under one lock acquisition with no
    /// suspension point, so two logically concurrent attempts can never both
    /// observe the same pre-threshold count.
    ///
    /// - First attempt for an identifier starts a fresh window and passes.
    /// - A window older than `config.window` is reset and the attempt passes.
    /// - Once the attempt count reaches `max_attempts` the attempt is blocked;
    ///   blocked attempts do not consume further budget.
    pub fn should_block(&self, identifier: &str) -> bool {
        let now = Instant::now();
        let mut records = self
            .records
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let Some(record) = records.get_mut(identifier) else {
            records.insert(
                identifier.to_string(),
                AttemptRecord {
                    count: 1,
                    window_started_at: now,
                },
            );
            return false;
        };

        if now.duration_since(record.window_started_at) > self.config.window {
            record.count = 1;
            record.window_started_at = now;
            return false;
        }

        // Already at budget: block without counting.
        if record.count >= self.config.max_attempts {
            return true;
        }

        // This attempt counts itself, then checks whether it crossed the
        // threshold: the attempt that reaches the budget is the first one
        // blocked.
        record.count += 1;
        record.count >= self.config.max_attempts
    }

    /// Remaining window time for a currently-blocked identifier.
    ///
    /// `None` when the identifier is not blocked (unknown, under budget, or
    /// its window already expired).
    pub fn retry_after(&self, identifier: &str) -> Option<Duration> {
        let now = Instant::now();
        let records = self
            .records
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let record = records.get(identifier)?;
        if record.count < self.config.max_attempts {
            return None;
        }
        self.config
            .window
            .checked_sub(now.duration_since(record.window_started_at))
    }

    /// Further attempts that will pass before blocking starts.
    pub fn remaining_attempts(&self, identifier: &str) -> u32 {
        let now = Instant::now();
        let records = self
            .records
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        match records.get(identifier) {
            Some(record) if now.duration_since(record.window_started_at) <= self.config.window => {
                self.config.max_attempts.saturating_sub(record.count + 1)
            }
            _ => self.config.max_attempts.saturating_sub(1),
        }
    }
}

impl Default for LoginAttemptTracker {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifth_attempt_is_first_to_block() {
        let tracker = LoginAttemptTracker::default();

        assert!(!tracker.should_block("user@example.com"));
        assert!(!tracker.should_block("user@example.com"));
        assert!(!tracker.should_block("user@example.com"));
        assert!(!tracker.should_block("user@example.com"));
        assert!(tracker.should_block("user@example.com"));
        // Stays blocked inside the window.
        assert!(tracker.should_block("user@example.com"));
    }

    #[test]
    fn test_identifiers_do_not_interfere() {
        let tracker = LoginAttemptTracker::default();

        for _ in 0..4 {
            assert!(!tracker.should_block("a@example.com"));
        }
        assert!(tracker.should_block("a@example.com"));

        // Exhausting A's budget leaves B untouched.
        assert!(!tracker.should_block("b@example.com"));
        assert_eq!(tracker.remaining_attempts("b@example.com"), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_window_expiry_resets_count() {
        let tracker = LoginAttemptTracker::default();

        for _ in 0..4 {
            assert!(!tracker.should_block("user@example.com"));
        }

        tokio::time::advance(Duration::from_secs(15 * 60 + 1)).await;

        // Fifth call lands in a fresh window with count=1 again.
        assert!(!tracker.should_block("user@example.com"));
        for _ in 0..3 {
            assert!(!tracker.should_block("user@example.com"));
        }
        assert!(tracker.should_block("user@example.com"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_blocked_attempts_do_not_extend_block() {
        let tracker = LoginAttemptTracker::default();

        for _ in 0..5 {
            tracker.should_block("user@example.com");
        }
        // Hammering a blocked identifier must not push the window forward.
        for _ in 0..10 {
            assert!(tracker.should_block("user@example.com"));
        }

        tokio::time::advance(Duration::from_secs(15 * 60 + 1)).await;
        assert!(!tracker.should_block("user@example.com"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_after_reports_remaining_window() {
        let tracker = LoginAttemptTracker::default();

        assert_eq!(tracker.retry_after("user@example.com"), None);

        for _ in 0..5 {
            tracker.should_block("user@example.com");
        }

        tokio::time::advance(Duration::from_secs(5 * 60)).await;
        let remaining = tracker.retry_after("user@example.com").unwrap();
        assert!(remaining <= Duration::from_secs(10 * 60));
        assert!(remaining > Duration::from_secs(9 * 60));

        tokio::time::advance(Duration::from_secs(11 * 60)).await;
        assert_eq!(tracker.retry_after("user@example.com"), None);
    }
}
