//! Auth Guard Facade
//!
//! The assembled component: session store, rate limiter, use cases, provider
//! event pump, and inactivity lifecycle behind one explicitly constructed
//! object. Collaborators come in through dependency injection; there is no
//! module-level state anywhere, so two guards in one process (or one per
//! test) never share counters or timers.

use std::net::IpAddr;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use platform::client::detect_public_ip;
use platform::client::platform_label;
use platform::notify::{Notice, Notifier};
use platform::rate_limit::LoginAttemptTracker;
use platform::task::spawn_best_effort;

use crate::application::config::GuardConfig;
use crate::application::inactivity::{ActivityKind, InactivityGuard};
use crate::application::session_store::SessionStore;
use crate::application::{
    CheckSessionUseCase, ResetPasswordUseCase, SignInUseCase, SignOutUseCase, SignUpInput,
    SignUpUseCase, UpdateProfileUseCase,
};
use crate::domain::entity::session::SessionState;
use crate::domain::event::AuthEvent;
use crate::domain::hooks::{
    DeviceInfo, HookError, Navigator, Route, SecurityEventKind, SecurityHooks,
};
use crate::domain::provider::{IdentityProvider, Profile};
use crate::error::{AuthError, AuthResult};

/// Shared context for the provider event pump
struct EventContext<P, H>
where
    P: IdentityProvider,
    H: SecurityHooks,
{
    provider: Arc<P>,
    hooks: Arc<H>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    config: Arc<GuardConfig>,
    store: Arc<SessionStore>,
    client_ip: Arc<OnceLock<IpAddr>>,
    inactivity: Arc<Mutex<Option<InactivityGuard>>>,
}

/// Client-side auth guard
pub struct AuthGuard<P, H>
where
    P: IdentityProvider + Send + Sync + 'static,
    H: SecurityHooks + Send + Sync + 'static,
{
    provider: Arc<P>,
    hooks: Arc<H>,
    notifier: Arc<dyn Notifier>,
    config: Arc<GuardConfig>,
    store: Arc<SessionStore>,
    tracker: Arc<LoginAttemptTracker>,
    http: reqwest::Client,
    inactivity: Arc<Mutex<Option<InactivityGuard>>>,
    pump: JoinHandle<()>,
}

impl<P, H> AuthGuard<P, H>
where
    P: IdentityProvider + Send + Sync + 'static,
    H: SecurityHooks + Send + Sync + 'static,
{
    /// Build the guard and resolve the initial session state.
    ///
    /// Performs the one-time startup work: subscribes to provider events,
    /// kicks off the best-effort public-IP discovery, and queries the
    /// provider for an existing session. When `start` returns, the store has
    /// left `Uninitialized`.
    pub async fn start(
        provider: Arc<P>,
        hooks: Arc<H>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
        config: GuardConfig,
    ) -> AuthResult<Self> {
        let config = Arc::new(config);
        let store = Arc::new(SessionStore::new());
        let tracker = Arc::new(LoginAttemptTracker::new(config.rate_limit.clone()));
        let inactivity = Arc::new(Mutex::new(None));
        let client_ip = Arc::new(OnceLock::new());

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AuthError::Internal(format!("HTTP client construction failed: {e}")))?;

        if config.discover_public_ip {
            let http = http.clone();
            let client_ip = client_ip.clone();
            spawn_best_effort("client-ip-lookup", async move {
                let ip = detect_public_ip(&http).await?;
                tracing::debug!(%ip, "Public IP discovered");
                let _ = client_ip.set(ip);
                Ok::<_, platform::client::ClientInfoError>(())
            });
        }

        // Subscribe before the initial session check so no event can fall
        // between the two.
        let events = provider.subscribe();
        store.initialize(provider.as_ref()).await;

        let context = EventContext {
            provider: provider.clone(),
            hooks: hooks.clone(),
            notifier: notifier.clone(),
            navigator,
            config: config.clone(),
            store: store.clone(),
            client_ip,
            inactivity: inactivity.clone(),
        };

        // A session restored at startup is already active: arm the idle
        // countdown now, not on the next sign-in.
        if store.is_authenticated() {
            let guard = InactivityGuard::spawn(
                provider.clone(),
                store.clone(),
                notifier.clone(),
                config.idle_timeout,
            );
            *lock_slot(&inactivity) = Some(guard);
        }

        let pump = Self::spawn_event_pump(events, context);

        Ok(Self {
            provider,
            hooks,
            notifier,
            config,
            store,
            tracker,
            http,
            inactivity,
            pump,
        })
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Credential sign-in (rate limited locally before any provider contact).
    pub async fn sign_in(&self, email: &str, password: &str) -> AuthResult<()> {
        SignInUseCase::new(
            self.provider.clone(),
            self.hooks.clone(),
            self.tracker.clone(),
            self.notifier.clone(),
        )
        .execute(email, password)
        .await
    }

    /// Create a new account.
    pub async fn sign_up(&self, input: SignUpInput) -> AuthResult<()> {
        SignUpUseCase::new(
            self.provider.clone(),
            self.notifier.clone(),
            self.http.clone(),
        )
        .execute(input)
        .await
    }

    /// End the current session.
    pub async fn sign_out(&self) -> AuthResult<()> {
        SignOutUseCase::new(self.provider.clone(), self.notifier.clone())
            .execute()
            .await
    }

    /// Request a password-recovery email.
    pub async fn reset_password(&self, email: &str) -> AuthResult<()> {
        ResetPasswordUseCase::new(
            self.provider.clone(),
            self.notifier.clone(),
            self.config.clone(),
        )
        .execute(email)
        .await
    }

    /// Update profile metadata on the current user.
    pub async fn update_profile(&self, profile: &Profile) -> AuthResult<()> {
        UpdateProfileUseCase::new(self.provider.clone(), self.notifier.clone())
            .execute(profile)
            .await
    }

    /// Soft-timeout session probe for route guards.
    pub async fn check_session(&self) -> bool {
        CheckSessionUseCase::new(self.provider.clone(), self.config.clone())
            .execute()
            .await
    }

    // ========================================================================
    // State access
    // ========================================================================

    /// Current session state snapshot.
    pub fn session(&self) -> SessionState {
        self.store.snapshot()
    }

    pub fn is_authenticated(&self) -> bool {
        self.store.is_authenticated()
    }

    /// Watch session state changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.store.subscribe()
    }

    /// Report a qualifying user-activity event to the idle countdown.
    ///
    /// No-op while no session is active.
    pub fn record_activity(&self, kind: ActivityKind) {
        if let Some(guard) = lock_slot(&self.inactivity).as_ref() {
            guard.record_activity(kind);
        }
    }

    // ========================================================================
    // Event handling
    // ========================================================================

    fn spawn_event_pump(
        mut events: mpsc::UnboundedReceiver<AuthEvent>,
        context: EventContext<P, H>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                tracing::debug!(event = %event, "Provider event received");
                Self::handle_event(&context, event);
            }
            tracing::debug!("Provider event stream closed");
        })
    }

    /// The single transition point for provider events.
    ///
    /// The store update is synchronous and unconditional; side effects are
    /// submitted as best-effort tasks and can never roll back or delay the
    /// transition.
    fn handle_event(context: &EventContext<P, H>, event: AuthEvent) {
        context.store.apply(&event);

        match event {
            AuthEvent::SignedIn(identity) => {
                // Replacing the slot drops (and thereby cancels) any previous
                // watcher before the new one starts counting.
                let guard = InactivityGuard::spawn(
                    context.provider.clone(),
                    context.store.clone(),
                    context.notifier.clone(),
                    context.config.idle_timeout,
                );
                *lock_slot(&context.inactivity) = Some(guard);

                context.notifier.notify(Notice::success(
                    "Signed in",
                    format!("Welcome back, {}.", identity.salutation()),
                ));

                let user_id = identity.user_id;
                let device = DeviceInfo {
                    ip: context.client_ip.get().copied(),
                    platform: platform_label(),
                };
                let hooks = context.hooks.clone();
                spawn_best_effort("device-registration", async move {
                    hooks.register_device(&user_id, &device).await
                });

                let hooks = context.hooks.clone();
                let notifier = context.notifier.clone();
                spawn_best_effort("suspicious-activity-check", async move {
                    if hooks.check_suspicious_activity(&user_id).await? {
                        notifier.notify(Notice::warning(
                            "Security alert",
                            "Unusual sign-in activity was detected on your account.",
                        ));
                        hooks
                            .log_security_event(
                                SecurityEventKind::SuspiciousActivity,
                                Some(&user_id),
                                "post-login check",
                            )
                            .await?;
                    }
                    Ok::<_, HookError>(())
                });

                context.navigator.navigate(Route::Home);
            }
            AuthEvent::SignedOut => {
                // Scoped release: watcher and pending timeout go together.
                *lock_slot(&context.inactivity) = None;
                context.navigator.navigate(Route::SignIn);
            }
            AuthEvent::PasswordRecovery => {
                context.navigator.navigate(Route::UpdatePassword);
            }
        }
    }
}

impl<P, H> Drop for AuthGuard<P, H>
where
    P: IdentityProvider + Send + Sync + 'static,
    H: SecurityHooks + Send + Sync + 'static,
{
    fn drop(&mut self) {
        self.pump.abort();
    }
}

fn lock_slot(
    slot: &Mutex<Option<InactivityGuard>>,
) -> std::sync::MutexGuard<'_, Option<InactivityGuard>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}
