//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations for the client core:
//! - Login-attempt rate limiting
//! - Password policy validation (NIST SP 800-63B) and breach checking
//! - User-facing notices (toast boundary)
//! - Retry with backoff for idempotent calls
//! - Best-effort task spawning
//! - Client environment discovery (public IP, platform label)

pub mod client;
pub mod notify;
pub mod password;
pub mod rate_limit;
pub mod retry;
pub mod task;
