//! Auth Guard - Client-Side Session Core
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, events, provider/collaborator ports
//! - `application/` - Use cases, session store, inactivity guard, config
//! - `infra/` - Identity provider adapters
//!
//! ## Features
//! - Credential sign-in with local attempt rate limiting
//! - Session state store with subscribe semantics (single source of truth)
//! - Provider push-event handling (signed-in / signed-out / password-recovery)
//! - 30-minute inactivity sign-out with scoped timer ownership
//! - Best-effort post-login hooks (device registration, suspicious-activity
//!   check, security event logging)
//!
//! ## Boundary Model
//! Credential verification, token issuance, and session persistence belong to
//! the hosted identity provider behind [`domain::provider::IdentityProvider`].
//! The UI layer consumes the guard through plain function calls and the
//! session watch channel; nothing here renders or routes by itself.

pub mod application;
pub mod domain;
pub mod error;
pub mod guard;
pub mod infra;

mod tests;

// Re-exports for convenience
pub use application::config::GuardConfig;
pub use error::{AuthError, AuthResult};
pub use guard::AuthGuard;
pub use infra::http::HttpIdentityProvider;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::event::*;
    pub use crate::domain::value_object::*;
}

pub mod ports {
    pub use crate::domain::hooks::*;
    pub use crate::domain::provider::*;
}
