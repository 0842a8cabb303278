//! Session State Entity
//!
//! The client-side view of "who is logged in". Owned exclusively by the
//! session store; every other module reads snapshots.
//!
//! State machine: `Uninitialized -> Authenticated | Unauthenticated`, then
//! `Authenticated <-> Unauthenticated` for the rest of the application
//! lifetime. `Uninitialized` exists only before the initial provider session
//! check resolves and is never re-entered.

use crate::domain::entity::identity::Identity;

/// Session state tagged union
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    /// Before the initial provider session check has resolved
    #[default]
    Uninitialized,
    /// A provider session is active for this identity
    Authenticated(Identity),
    /// No active session
    Unauthenticated,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    pub fn is_uninitialized(&self) -> bool {
        matches!(self, SessionState::Uninitialized)
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            SessionState::Authenticated(identity) => Some(identity),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::email::Email;
    use kernel::id::UserId;

    #[test]
    fn test_state_accessors() {
        let state = SessionState::default();
        assert!(state.is_uninitialized());
        assert!(!state.is_authenticated());
        assert!(state.identity().is_none());

        let identity = Identity::new(UserId::new(), Email::new("a@b.example").unwrap());
        let state = SessionState::Authenticated(identity.clone());
        assert!(state.is_authenticated());
        assert_eq!(state.identity(), Some(&identity));

        assert!(!SessionState::Unauthenticated.is_authenticated());
    }
}
