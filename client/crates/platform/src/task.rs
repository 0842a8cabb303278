//! Best-Effort Task Spawning
//!
//! Non-critical side effects (device registration, security logging, IP
//! lookup) are submitted through [`spawn_best_effort`] so the split between
//! critical and best-effort paths is structural: a submitted task can log its
//! failure but has no way to fail the submitting flow.

use std::fmt::Display;
use std::future::Future;

use tokio::task::JoinHandle;

/// Spawn a fire-and-forget task whose failure is logged, never propagated.
///
/// The `task` label names the side effect in the log stream.
pub fn spawn_best_effort<F, E>(task: &'static str, fut: F) -> JoinHandle<()>
where
    F: Future<Output = Result<(), E>> + Send + 'static,
    E: Display + Send + 'static,
{
    tokio::spawn(async move {
        if let Err(err) = fut.await {
            tracing::warn!(task, error = %err, "Best-effort task failed");
        } else {
            tracing::trace!(task, "Best-effort task completed");
        }
    })
}
