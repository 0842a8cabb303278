//! Application Configuration
//!
//! Configuration for the guard's application layer.

use std::time::Duration;

/// Re-export RateLimitConfig from platform
pub use platform::rate_limit::RateLimitConfig;

/// Guard application configuration
#[derive(Debug, Clone)]
pub struct GuardConfig {
    /// Sign-in attempt budget and window (5 attempts / 15 minutes)
    pub rate_limit: RateLimitConfig,
    /// Idle period after which an authenticated session is force-ended
    pub idle_timeout: Duration,
    /// Soft timeout for the session probe; elapsed means "no session"
    pub session_check_timeout: Duration,
    /// Where the password-recovery link sends the user back into the app
    pub password_reset_redirect: String,
    /// Whether startup performs the one-time public-IP discovery used to
    /// annotate device registration
    pub discover_public_ip: bool,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            rate_limit: RateLimitConfig::default(),
            idle_timeout: Duration::from_secs(30 * 60), // 30 minutes
            session_check_timeout: Duration::from_secs(3),
            password_reset_redirect: "http://localhost:3000/update-password".to_string(),
            discover_public_ip: true,
        }
    }
}

impl GuardConfig {
    /// Create config for development (short windows for manual testing)
    pub fn development() -> Self {
        Self {
            rate_limit: RateLimitConfig::new(5, 60),
            idle_timeout: Duration::from_secs(2 * 60),
            ..Default::default()
        }
    }

    /// Get idle timeout in milliseconds
    pub fn idle_timeout_ms(&self) -> i64 {
        self.idle_timeout.as_millis() as i64
    }

    /// Get session check timeout in milliseconds
    pub fn session_check_timeout_ms(&self) -> i64 {
        self.session_check_timeout.as_millis() as i64
    }
}
