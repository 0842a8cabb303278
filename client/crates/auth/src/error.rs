//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system and with the
//! toast boundary via [`AuthError::notice`].

use std::time::Duration;

use thiserror::Error;

use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::notify::Notice;
use platform::password::PasswordPolicyError;

use crate::domain::provider::ProviderError;
use crate::domain::value_object::email::EmailError;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Local rate limiter rejected the attempt before any provider contact
    #[error("Too many sign-in attempts")]
    RateLimited { retry_after: Option<Duration> },

    /// Provider rejected the credentials
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The account exists but its email is not confirmed yet
    #[error("Email address not confirmed")]
    EmailNotConfirmed,

    /// Sign-up hit an already-registered email
    #[error("Email address already registered")]
    EmailTaken,

    /// Email failed local validation
    #[error("Invalid email address: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Password failed local policy validation
    #[error("Password validation failed: {0}")]
    PasswordPolicy(#[from] PasswordPolicyError),

    /// Provider failure we could not classify further
    #[error("Authentication failed: {0}")]
    Provider(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Classify a provider failure into a user-facing category.
    ///
    /// The provider reports failures as message strings, so classification is
    /// substring matching with the HTTP status as a fallback hint.
    pub fn classify_provider(err: &ProviderError) -> Self {
        let message = err.message.to_lowercase();

        if message.contains("invalid login credentials") || message.contains("invalid credentials")
        {
            return AuthError::InvalidCredentials;
        }
        if message.contains("email not confirmed") {
            return AuthError::EmailNotConfirmed;
        }
        if message.contains("already registered") || message.contains("already exists") {
            return AuthError::EmailTaken;
        }

        match err.status {
            Some(401) => AuthError::InvalidCredentials,
            Some(409) => AuthError::EmailTaken,
            _ => AuthError::Provider(err.message.clone()),
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::RateLimited { .. } => ErrorKind::RateLimited,
            AuthError::InvalidCredentials => ErrorKind::Unauthorized,
            AuthError::EmailNotConfirmed => ErrorKind::Precondition,
            AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::InvalidEmail(_) | AuthError::PasswordPolicy(_) => ErrorKind::Validation,
            AuthError::Provider(_) => ErrorKind::Unavailable,
            AuthError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// The toast shown when this error reaches the UI boundary.
    pub fn notice(&self) -> Notice {
        match self {
            AuthError::RateLimited { retry_after } => {
                let description = match retry_after {
                    Some(wait) => format!(
                        "Too many sign-in attempts. Try again in about {} minutes.",
                        wait.as_secs().div_ceil(60).max(1)
                    ),
                    None => "Too many sign-in attempts. Try again later.".to_string(),
                };
                Notice::destructive("Sign-in blocked", description)
            }
            AuthError::InvalidCredentials => Notice::destructive(
                "Sign-in failed",
                "The email or password you entered is incorrect.",
            ),
            AuthError::EmailNotConfirmed => Notice::warning(
                "Email not confirmed",
                "Please confirm your email address before signing in.",
            ),
            AuthError::EmailTaken => Notice::warning(
                "Account exists",
                "An account with this email already exists. Try signing in instead.",
            ),
            AuthError::InvalidEmail(err) => Notice::warning("Invalid email", err.to_string()),
            AuthError::PasswordPolicy(err) => Notice::warning("Weak password", err.to_string()),
            AuthError::Provider(_) | AuthError::Internal(_) => Notice::destructive(
                "Something went wrong",
                "We could not complete the request. Please try again.",
            ),
        }
    }

    /// Log the error with appropriate level
    pub(crate) fn log(&self) {
        match self {
            AuthError::RateLimited { .. } => {
                tracing::warn!("Sign-in attempt blocked by rate limiter");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::Provider(message) => {
                tracing::error!(message = %message, "Unclassified provider error");
            }
            AuthError::Internal(message) => {
                tracing::error!(message = %message, "Auth internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}
