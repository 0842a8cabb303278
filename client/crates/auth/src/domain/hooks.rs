//! Security and UI Collaborator Ports
//!
//! Fire-and-forget collaborators consumed around session transitions. Every
//! call site treats these as best-effort: failures are logged by the
//! submitting task and never block a session flow.

use std::net::IpAddr;

use derive_more::Display;
use thiserror::Error;

use kernel::id::UserId;

/// Failure inside a best-effort hook
#[derive(Debug, Error)]
#[error("{0}")]
pub struct HookError(pub String);

impl HookError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Device details captured at sign-in for the device registry
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceInfo {
    /// Public IP discovered at startup, when the lookup succeeded
    pub ip: Option<IpAddr>,
    /// Coarse platform label (os/arch)
    pub platform: String,
}

/// Security event categories forwarded to the audit trail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SecurityEventKind {
    #[display("failed_login")]
    FailedLogin,

    #[display("suspicious_activity")]
    SuspiciousActivity,
}

/// Security collaborator port
#[trait_variant::make(SecurityHooks: Send)]
pub trait LocalSecurityHooks {
    /// Record the signing-in device in the device registry
    async fn register_device(&self, user_id: &UserId, device: &DeviceInfo)
    -> Result<(), HookError>;

    /// Append a security event to the audit trail
    async fn log_security_event(
        &self,
        kind: SecurityEventKind,
        user_id: Option<&UserId>,
        details: &str,
    ) -> Result<(), HookError>;

    /// Post-login anomaly check; `true` means the user should be warned
    async fn check_suspicious_activity(&self, user_id: &UserId) -> Result<bool, HookError>;
}

/// No-op hooks for headless or test use
#[derive(Debug, Default, Clone)]
pub struct NoopSecurityHooks;

impl SecurityHooks for NoopSecurityHooks {
    async fn register_device(
        &self,
        _user_id: &UserId,
        _device: &DeviceInfo,
    ) -> Result<(), HookError> {
        Ok(())
    }

    async fn log_security_event(
        &self,
        _kind: SecurityEventKind,
        _user_id: Option<&UserId>,
        _details: &str,
    ) -> Result<(), HookError> {
        Ok(())
    }

    async fn check_suspicious_activity(&self, _user_id: &UserId) -> Result<bool, HookError> {
        Ok(false)
    }
}

/// Views the guard can send the UI to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Route {
    #[display("home")]
    Home,

    #[display("sign_in")]
    SignIn,

    #[display("update_password")]
    UpdatePassword,
}

/// UI navigation port
///
/// UX-only redirection; real access control stays with the provider.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Default headless navigator: records intent in the log stream only.
#[derive(Debug, Default, Clone)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn navigate(&self, route: Route) {
        tracing::debug!(route = %route, "Navigation requested");
    }
}
