//! Reset Password Use Case
//!
//! Requests a password-recovery email. The outcome notice is deliberately
//! neutral so the flow cannot be used to probe which emails have accounts.

use std::sync::Arc;

use platform::notify::{Notice, Notifier};

use crate::application::config::GuardConfig;
use crate::domain::provider::IdentityProvider;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Reset password use case
pub struct ResetPasswordUseCase<P>
where
    P: IdentityProvider,
{
    provider: Arc<P>,
    notifier: Arc<dyn Notifier>,
    config: Arc<GuardConfig>,
}

impl<P> ResetPasswordUseCase<P>
where
    P: IdentityProvider + Send + Sync + 'static,
{
    pub fn new(provider: Arc<P>, notifier: Arc<dyn Notifier>, config: Arc<GuardConfig>) -> Self {
        Self {
            provider,
            notifier,
            config,
        }
    }

    pub async fn execute(&self, email: &str) -> AuthResult<()> {
        let email = Email::new(email).map_err(|e| {
            let err = AuthError::from(e);
            self.notifier.notify(err.notice());
            err
        })?;

        if let Err(err) = self
            .provider
            .reset_password_for_email(&email, &self.config.password_reset_redirect)
            .await
        {
            // Swallowed: the neutral notice below goes out either way.
            tracing::warn!(error = %err, "Password reset request failed");
        }

        self.notifier.notify(Notice::info(
            "Check your email",
            "If an account exists for that address, a reset link is on its way.",
        ));
        Ok(())
    }
}
