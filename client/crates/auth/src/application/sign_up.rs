//! Sign Up Use Case
//!
//! Creates a new account with the provider after local validation. Policy
//! failures propagate to the caller; the breach check rejects compromised
//! passwords but an unreachable breach API only logs.

use std::sync::Arc;

use platform::notify::{Notice, Notifier};
use platform::password::{ClearTextPassword, PasswordPolicyError};

use crate::domain::provider::{IdentityProvider, Profile};
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub email: String,
    pub password: String,
    pub profile: Profile,
}

/// Sign up use case
pub struct SignUpUseCase<P>
where
    P: IdentityProvider,
{
    provider: Arc<P>,
    notifier: Arc<dyn Notifier>,
    http: reqwest::Client,
}

impl<P> SignUpUseCase<P>
where
    P: IdentityProvider + Send + Sync + 'static,
{
    pub fn new(provider: Arc<P>, notifier: Arc<dyn Notifier>, http: reqwest::Client) -> Self {
        Self {
            provider,
            notifier,
            http,
        }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<()> {
        let email = Email::new(&input.email).map_err(|e| {
            let err = AuthError::from(e);
            self.notifier.notify(err.notice());
            err
        })?;

        let password = ClearTextPassword::new(input.password).map_err(|e| {
            let err = AuthError::from(e);
            self.notifier.notify(err.notice());
            err
        })?;

        match password.check_breach(&self.http).await {
            Ok(true) => {
                let err = AuthError::PasswordPolicy(PasswordPolicyError::Compromised);
                self.notifier.notify(err.notice());
                return Err(err);
            }
            Ok(false) => {}
            Err(err) => {
                // Reachability problems must not block account creation.
                tracing::warn!(error = %err, "Breach check unavailable; continuing sign-up");
            }
        }

        match self
            .provider
            .sign_up(&email, password.as_str(), &input.profile)
            .await
        {
            Ok(()) => {
                tracing::info!(email = %email, "Sign-up submitted");
                self.notifier.notify(Notice::success(
                    "Account created",
                    "Check your inbox to confirm your email address.",
                ));
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
