//! Session State Store
//!
//! Single source of truth for "who is logged in". State changes flow through
//! exactly two entry points: the one-time [`SessionStore::initialize`] and
//! [`SessionStore::apply`] for provider events. Everything else reads
//! snapshots or subscribes.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;

use crate::domain::entity::session::SessionState;
use crate::domain::event::AuthEvent;
use crate::domain::provider::IdentityProvider;

/// Session state store with subscribe semantics
#[derive(Debug)]
pub struct SessionStore {
    state: watch::Sender<SessionState>,
    initialized: AtomicBool,
}

impl SessionStore {
    pub fn new() -> Self {
        let (state, _) = watch::channel(SessionState::Uninitialized);
        Self {
            state,
            initialized: AtomicBool::new(false),
        }
    }

    /// Current state, cloned out of the channel.
    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// Watch for state changes. Receivers see the latest value on await.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Resolve `Uninitialized` by asking the provider for an existing
    /// session. Exactly one call per store lifetime; later calls are ignored.
    ///
    /// Any failure resolves to `Unauthenticated` - startup never hangs on a
    /// broken provider, it just treats the user as signed out.
    pub async fn initialize<P>(&self, provider: &P)
    where
        P: IdentityProvider + Sync,
    {
        if self.initialized.swap(true, Ordering::SeqCst) {
            tracing::warn!("Session store initialize called twice; ignoring");
            return;
        }

        let next = match provider.get_session().await {
            Ok(Some(identity)) => {
                tracing::info!(user_id = %identity.user_id, "Existing session restored");
                SessionState::Authenticated(identity)
            }
            Ok(None) => SessionState::Unauthenticated,
            Err(err) => {
                tracing::warn!(error = %err, "Initial session check failed; treating as signed out");
                SessionState::Unauthenticated
            }
        };
        self.state.send_replace(next);
    }

    /// Apply a provider event, synchronously and unconditionally.
    ///
    /// Last writer wins; ordering is whatever order the provider emitted.
    /// `PasswordRecovery` never flips the authenticated flag by itself.
    pub fn apply(&self, event: &AuthEvent) {
        match event {
            AuthEvent::SignedIn(identity) => {
                tracing::info!(user_id = %identity.user_id, "Session state: authenticated");
                self.state
                    .send_replace(SessionState::Authenticated(identity.clone()));
            }
            AuthEvent::SignedOut => {
                tracing::info!("Session state: unauthenticated");
                self.state.send_replace(SessionState::Unauthenticated);
            }
            AuthEvent::PasswordRecovery => {
                tracing::debug!("Password recovery event; session state unchanged");
            }
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
