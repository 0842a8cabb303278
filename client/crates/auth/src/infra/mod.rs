//! Infrastructure Layer
//!
//! Identity provider adapters.

pub mod http;
