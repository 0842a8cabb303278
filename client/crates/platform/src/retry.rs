//! Retry with Backoff
//!
//! Bounded exponential backoff with jitter for idempotent calls. Only
//! failures the caller classifies as transient are retried; everything else
//! returns on the first attempt.

use std::future::Future;
use std::time::Duration;

use rand::Rng;

/// Retry policy for idempotent operations
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries after the initial attempt
    pub max_retries: u32,
    /// Delay before the first retry
    pub base_delay: Duration,
    /// Upper bound for any single delay
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
            ..Self::default()
        }
    }

    /// Exponential delay for the given retry, with up to 50% added jitter.
    fn delay_for(&self, retry: u32) -> Duration {
        let exp = self
            .base_delay
            .saturating_mul(1u32 << retry.min(16))
            .min(self.max_delay);
        let jitter_ms = rand::rng().random_range(0..=exp.as_millis() as u64 / 2);
        (exp + Duration::from_millis(jitter_ms)).min(self.max_delay)
    }

    /// Run `op`, retrying failures that `transient` accepts.
    pub async fn run<T, E, F, Fut, P>(&self, mut transient: P, mut op: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        P: FnMut(&E) -> bool,
    {
        let mut retry = 0;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    if retry >= self.max_retries || !transient(&err) {
                        return Err(err);
                    }
                    let delay = self.delay_for(retry);
                    tracing::debug!(
                        retry,
                        delay_ms = delay.as_millis() as u64,
                        "Retrying after transient failure"
                    );
                    tokio::time::sleep(delay).await;
                    retry += 1;
                }
            }
        }
    }
}
