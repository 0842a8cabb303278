//! Identity Entity
//!
//! The authenticated principal as reported by the identity provider. The
//! provider owns the canonical record; this is the client-side projection
//! carried inside the session state.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::email::Email;

/// Authenticated user identity
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    /// Provider-issued user ID
    pub user_id: UserId,
    /// Sign-in email address
    pub email: Email,
    /// Display name from profile metadata, if set
    pub display_name: Option<String>,
    /// Last sign-in timestamp as reported by the provider
    pub last_sign_in_at: Option<DateTime<Utc>>,
}

impl Identity {
    pub fn new(user_id: UserId, email: Email) -> Self {
        Self {
            user_id,
            email,
            display_name: None,
            last_sign_in_at: None,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Name to greet the user with: display name when set, email otherwise.
    pub fn salutation(&self) -> &str {
        self.display_name
            .as_deref()
            .unwrap_or_else(|| self.email.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_salutation_prefers_display_name() {
        let email = Email::new("dispatcher@example.com").unwrap();
        let identity = Identity::new(UserId::new(), email.clone());
        assert_eq!(identity.salutation(), "dispatcher@example.com");

        let identity = identity.with_display_name("Alex");
        assert_eq!(identity.salutation(), "Alex");
    }
}
