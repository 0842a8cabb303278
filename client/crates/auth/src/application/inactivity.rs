//! Inactivity Guard
//!
//! Forces sign-out after a fixed idle period while a session is active. One
//! watcher task owns one deadline; activity events rearm it. The structure
//! guarantees the cancel-before-schedule invariant: there is no code path
//! that can leave two countdowns pending.
//!
//! Teardown is scoped: dropping the guard aborts the watcher, releasing the
//! pending timer and the activity channel together, so navigation in the
//! host UI cannot leak timers.

use std::sync::Arc;

use derive_more::Display;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use platform::notify::{Notice, Notifier};

use crate::application::session_store::SessionStore;
use crate::domain::provider::IdentityProvider;

/// User-activity event types that rearm the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ActivityKind {
    #[display("pointer_down")]
    PointerDown,

    #[display("key_press")]
    KeyPress,

    #[display("scroll")]
    Scroll,

    #[display("touch_start")]
    TouchStart,
}

/// Scoped idle-timeout watcher
#[derive(Debug)]
pub struct InactivityGuard {
    activity: mpsc::UnboundedSender<ActivityKind>,
    watcher: JoinHandle<()>,
}

impl InactivityGuard {
    /// Start watching. Called when a session becomes active.
    pub fn spawn<P>(
        provider: Arc<P>,
        store: Arc<SessionStore>,
        notifier: Arc<dyn Notifier>,
        idle_timeout: std::time::Duration,
    ) -> Self
    where
        P: IdentityProvider + Send + Sync + 'static,
    {
        let (activity, mut events) = mpsc::unbounded_channel::<ActivityKind>();

        // The countdown starts the moment the session becomes active, not
        // when the watcher task first gets polled.
        let initial_deadline = Instant::now() + idle_timeout;

        let watcher = tokio::spawn(async move {
            let mut deadline = initial_deadline;
            loop {
                tokio::select! {
                    received = events.recv() => match received {
                        Some(kind) => {
                            tracing::trace!(activity = %kind, "Activity; countdown rearmed");
                            deadline = Instant::now() + idle_timeout;
                        }
                        None => break,
                    },
                    _ = tokio::time::sleep_until(deadline) => {
                        // Firing with no active session is a no-op.
                        if store.is_authenticated() {
                            let minutes = idle_timeout.as_secs() / 60;
                            tracing::info!(idle_minutes = minutes, "Idle timeout reached; signing out");
                            notifier.notify(Notice::warning(
                                "Session expired",
                                format!("You were signed out after {minutes} minutes of inactivity."),
                            ));
                            if let Err(err) = provider.sign_out().await {
                                tracing::warn!(error = %err, "Sign-out after idle timeout failed");
                            }
                        }
                        // Rearm a full period; at most one sign-out per idle
                        // period with zero activity.
                        deadline = Instant::now() + idle_timeout;
                    }
                }
            }
        });

        Self { activity, watcher }
    }

    /// Report a qualifying user-activity event.
    pub fn record_activity(&self, kind: ActivityKind) {
        // The watcher outlives every sender unless we are mid-teardown, in
        // which case dropping the event is exactly right.
        let _ = self.activity.send(kind);
    }
}

impl Drop for InactivityGuard {
    fn drop(&mut self) {
        self.watcher.abort();
        tracing::debug!("Inactivity watcher stopped");
    }
}
