//! Provider Auth Events
//!
//! The push-events the identity provider emits, as an explicit tagged union
//! so the session state machine is exhaustively matchable. Provider event
//! names the client does not care about are dropped by the adapter before
//! they reach this type.

use derive_more::Display;

use crate::domain::entity::identity::Identity;

/// Auth event pushed by the identity provider
#[derive(Debug, Clone, PartialEq, Display)]
pub enum AuthEvent {
    /// A session became active for this identity
    #[display("signed_in")]
    SignedIn(Identity),

    /// The session ended
    #[display("signed_out")]
    SignedOut,

    /// The user followed a password-recovery link; the session state is
    /// unaffected by this event alone
    #[display("password_recovery")]
    PasswordRecovery,
}
