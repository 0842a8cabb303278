//! Sign In Use Case
//!
//! Public entry point for credential-based sign-in. The rate-limit check is
//! a local, synchronous short-circuit: a blocked attempt never contacts the
//! provider.

use std::sync::Arc;

use platform::notify::Notifier;
use platform::rate_limit::LoginAttemptTracker;
use platform::task::spawn_best_effort;

use crate::domain::hooks::{SecurityEventKind, SecurityHooks};
use crate::domain::provider::IdentityProvider;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Sign in use case
pub struct SignInUseCase<P, H>
where
    P: IdentityProvider,
    H: SecurityHooks,
{
    provider: Arc<P>,
    hooks: Arc<H>,
    tracker: Arc<LoginAttemptTracker>,
    notifier: Arc<dyn Notifier>,
}

impl<P, H> SignInUseCase<P, H>
where
    P: IdentityProvider + Send + Sync + 'static,
    H: SecurityHooks + Send + Sync + 'static,
{
    pub fn new(
        provider: Arc<P>,
        hooks: Arc<H>,
        tracker: Arc<LoginAttemptTracker>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            provider,
            hooks,
            tracker,
            notifier,
        }
    }

    /// Attempt a credential sign-in.
    ///
    /// On success the session transition itself happens when the provider's
    /// `SignedIn` event reaches the store; callers must not assume the
    /// session is available the moment this resolves.
    pub async fn execute(&self, identifier: &str, password: &str) -> AuthResult<()> {
        // One check-and-increment per call, before anything else. Attempts
        // are counted regardless of outcome, so a quick burst of successful
        // sign-ins exhausts the budget just like failures do.
        if self.tracker.should_block(identifier) {
            let err = AuthError::RateLimited {
                retry_after: self.tracker.retry_after(identifier),
            };
            err.log();
            self.notifier.notify(err.notice());
            return Err(err);
        }

        let email = Email::new(identifier).map_err(|_| {
            let err = AuthError::InvalidCredentials;
            self.notifier.notify(err.notice());
            err
        })?;

        match self.provider.sign_in_with_password(&email, password).await {
            Ok(()) => {
                tracing::info!(
                    email = %email,
                    remaining_attempts = self.tracker.remaining_attempts(identifier),
                    "Credentials accepted; awaiting provider session event"
                );
                Ok(())
            }
            Err(provider_err) => {
                let err = AuthError::classify_provider(&provider_err);
                err.log();
                self.notifier.notify(err.notice());

                let hooks = self.hooks.clone();
                let details = format!("identifier={identifier}");
                spawn_best_effort("failed-login-event", async move {
                    hooks
                        .log_security_event(SecurityEventKind::FailedLogin, None, &details)
                        .await
                });

                Err(err)
            }
        }
    }
}
