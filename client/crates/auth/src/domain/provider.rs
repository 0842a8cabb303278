//! Identity Provider Port
//!
//! Interface to the hosted identity provider. Implementation is in the
//! infrastructure layer; tests substitute mocks.
//!
//! Calls and push events are causally related but temporally decoupled: a
//! successful `sign_in_with_password` resolves first and the corresponding
//! [`AuthEvent::SignedIn`] arrives "eventually" (usually immediately after).
//! Callers must never assume the session store is updated synchronously.

use serde::Serialize;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::domain::entity::identity::Identity;
use crate::domain::event::AuthEvent;
use crate::domain::value_object::email::Email;
use kernel::error::kind::ErrorKind;

/// Provider-reported failure
///
/// `status` carries the HTTP status when the failure came from the provider
/// API; transport failures (DNS, connect, TLS) have none.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ProviderError {
    pub message: String,
    pub status: Option<u16>,
}

impl ProviderError {
    pub fn new(message: impl Into<String>, status: u16) -> Self {
        Self {
            message: message.into(),
            status: Some(status),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    /// Whether retrying the same call may succeed without user action.
    pub fn is_transient(&self) -> bool {
        match self.status {
            Some(status) => ErrorKind::from_status(status).is_transient(),
            // Transport failures are worth one more try.
            None => true,
        }
    }
}

/// Provider-specific result type alias
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Profile metadata stored with the user record
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Profile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Free-form application fields (company, role, phone, ...)
    #[serde(flatten)]
    pub data: serde_json::Map<String, serde_json::Value>,
}

impl Profile {
    pub fn with_display_name(display_name: impl Into<String>) -> Self {
        Self {
            display_name: Some(display_name.into()),
            data: serde_json::Map::new(),
        }
    }
}

/// Identity provider port
///
/// The provider owns credential verification, token issuance, and session
/// persistence. All methods suspend on network I/O.
#[trait_variant::make(IdentityProvider: Send)]
pub trait LocalIdentityProvider {
    /// Verify credentials and establish a session
    async fn sign_in_with_password(&self, email: &Email, password: &str) -> ProviderResult<()>;

    /// Register a new account; confirmation usually happens out-of-band
    async fn sign_up(&self, email: &Email, password: &str, profile: &Profile)
    -> ProviderResult<()>;

    /// End the current session
    async fn sign_out(&self) -> ProviderResult<()>;

    /// Fetch the identity behind the current session, if one exists
    async fn get_session(&self) -> ProviderResult<Option<Identity>>;

    /// Send a password-reset email with a redirect back into the app
    async fn reset_password_for_email(
        &self,
        email: &Email,
        redirect_to: &str,
    ) -> ProviderResult<()>;

    /// Update profile metadata on the current user
    async fn update_user(&self, profile: &Profile) -> ProviderResult<()>;

    /// Subscribe to push events; each call returns an independent stream
    fn subscribe(&self) -> mpsc::UnboundedReceiver<AuthEvent>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(ProviderError::transport("connection refused").is_transient());
        assert!(ProviderError::new("bad gateway", 502).is_transient());
        assert!(!ProviderError::new("invalid login credentials", 400).is_transient());
        assert!(!ProviderError::new("unauthorized", 401).is_transient());
    }

    #[test]
    fn test_profile_serialization_flattens_data() {
        let mut profile = Profile::with_display_name("Alex");
        profile
            .data
            .insert("company".into(), serde_json::json!("Acme Haulage"));

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["display_name"], "Alex");
        assert_eq!(json["company"], "Acme Haulage");
    }
}
