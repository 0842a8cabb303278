//! Check Session Use Case
//!
//! Boolean session probe for route guards. Races the provider call against a
//! short timer and fails closed: a slow or broken provider reads as "signed
//! out", never as an indeterminate state.

use std::sync::Arc;

use crate::application::config::GuardConfig;
use crate::domain::provider::IdentityProvider;

/// Check session use case
pub struct CheckSessionUseCase<P>
where
    P: IdentityProvider,
{
    provider: Arc<P>,
    config: Arc<GuardConfig>,
}

impl<P> CheckSessionUseCase<P>
where
    P: IdentityProvider + Send + Sync + 'static,
{
    pub fn new(provider: Arc<P>, config: Arc<GuardConfig>) -> Self {
        Self { provider, config }
    }

    /// `true` iff the provider confirms a session within the deadline.
    ///
    /// The timer winning abandons the in-flight call (the future is dropped,
    /// the request is not aborted provider-side); a soft timeout, not a
    /// cancellation.
    pub async fn execute(&self) -> bool {
        let deadline = self.config.session_check_timeout;
        match tokio::time::timeout(deadline, self.provider.get_session()).await {
            Ok(Ok(session)) => session.is_some(),
            Ok(Err(err)) => {
                tracing::warn!(error = %err, "Session check failed; treating as signed out");
                false
            }
            Err(_elapsed) => {
                tracing::warn!(
                    timeout_ms = self.config.session_check_timeout_ms(),
                    "Session check timed out; treating as signed out"
                );
                false
            }
        }
    }
}
