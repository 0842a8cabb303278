//! Update Profile Use Case
//!
//! Writes profile metadata to the current user record.

use std::sync::Arc;

use platform::notify::{Notice, Notifier};

use crate::domain::provider::{IdentityProvider, Profile};
use crate::error::{AuthError, AuthResult};

/// Update profile use case
pub struct UpdateProfileUseCase<P>
where
    P: IdentityProvider,
{
    provider: Arc<P>,
    notifier: Arc<dyn Notifier>,
}

impl<P> UpdateProfileUseCase<P>
where
    P: IdentityProvider + Send + Sync + 'static,
{
    pub fn new(provider: Arc<P>, notifier: Arc<dyn Notifier>) -> Self {
        Self { provider, notifier }
    }

    pub async fn execute(&self, profile: &Profile) -> AuthResult<()> {
        match self.provider.update_user(profile).await {
            Ok(()) => {
                tracing::info!("Profile updated");
                self.notifier
                    .notify(Notice::success("Profile updated", "Your changes were saved."));
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
