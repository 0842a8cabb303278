//! Sign Out Use Case
//!
//! Ends the current provider session. The store transition and the
//! navigation back to the sign-in view ride on the provider's `SignedOut`
//! event.

use std::sync::Arc;

use platform::notify::Notifier;

use crate::domain::provider::IdentityProvider;
use crate::error::{AuthError, AuthResult};

/// Sign out use case
pub struct SignOutUseCase<P>
where
    P: IdentityProvider,
{
    provider: Arc<P>,
    notifier: Arc<dyn Notifier>,
}

impl<P> SignOutUseCase<P>
where
    P: IdentityProvider + Send + Sync + 'static,
{
    pub fn new(provider: Arc<P>, notifier: Arc<dyn Notifier>) -> Self {
        Self { provider, notifier }
    }

    pub async fn execute(&self) -> AuthResult<()> {
        match self.provider.sign_out().await {
            Ok(()) => {
                tracing::info!("User signed out");
                Ok(())
            }
            Err(provider_err) => {
                let err = AuthError::classify_provider(&provider_err);
                err.log();
                self.notifier.notify(err.notice());
                Err(err)
            }
        }
    }
}
