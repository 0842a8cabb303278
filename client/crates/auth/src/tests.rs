//! Unit and scenario tests for the auth guard
//!
//! Provider, hooks, and UI collaborators are mocked with call counters so
//! the tests can assert not just outcomes but which boundaries were (and
//! were not) contacted.

#[cfg(test)]
mod support {
    use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};

    use tokio::sync::mpsc;

    use kernel::id::UserId;
    use platform::notify::{Notice, Notifier};

    use crate::application::config::GuardConfig;
    use crate::domain::entity::identity::Identity;
    use crate::domain::event::AuthEvent;
    use crate::domain::hooks::{
        DeviceInfo, HookError, Navigator, Route, SecurityEventKind, SecurityHooks,
    };
    use crate::domain::provider::{IdentityProvider, Profile, ProviderError, ProviderResult};
    use crate::domain::value_object::email::Email;
    use crate::guard::AuthGuard;

    pub fn identity(email: &str) -> Identity {
        Identity::new(UserId::new(), Email::new(email).unwrap())
    }

    /// Scriptable identity provider with call counters
    #[derive(Default)]
    pub struct MockProvider {
        pub sign_in_calls: AtomicU32,
        pub sign_up_calls: AtomicU32,
        pub sign_out_calls: AtomicU32,
        pub get_session_calls: AtomicU32,
        sign_in_error: Mutex<Option<ProviderError>>,
        session_error: Mutex<Option<ProviderError>>,
        session: Mutex<Option<Identity>>,
        hang_get_session: AtomicBool,
        subscribers: Mutex<Vec<mpsc::UnboundedSender<AuthEvent>>>,
    }

    impl MockProvider {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn failing_sign_in(self, message: &str, status: u16) -> Self {
            *self.sign_in_error.lock().unwrap() = Some(ProviderError::new(message, status));
            self
        }

        pub fn failing_get_session(self, message: &str, status: u16) -> Self {
            *self.session_error.lock().unwrap() = Some(ProviderError::new(message, status));
            self
        }

        pub fn with_session(self, identity: Identity) -> Self {
            *self.session.lock().unwrap() = Some(identity);
            self
        }

        pub fn hanging_get_session(self) -> Self {
            self.hang_get_session.store(true, Ordering::SeqCst);
            self
        }

        pub fn emit(&self, event: AuthEvent) {
            let mut subscribers = self.subscribers.lock().unwrap();
            subscribers.retain(|sender| sender.send(event.clone()).is_ok());
        }
    }

    impl IdentityProvider for MockProvider {
        async fn sign_in_with_password(
            &self,
            email: &Email,
            _password: &str,
        ) -> ProviderResult<()> {
            self.sign_in_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(err) = self.sign_in_error.lock().unwrap().clone() {
                return Err(err);
            }
            let identity = Identity::new(UserId::new(), email.clone());
            *self.session.lock().unwrap() = Some(identity.clone());
            self.emit(AuthEvent::SignedIn(identity));
            Ok(())
        }

        async fn sign_up(
            &self,
            _email: &Email,
            _password: &str,
            _profile: &Profile,
        ) -> ProviderResult<()> {
            self.sign_up_calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn sign_out(&self) -> ProviderResult<()> {
            self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
            *self.session.lock().unwrap() = None;
            self.emit(AuthEvent::SignedOut);
            Ok(())
        }

        async fn get_session(&self) -> ProviderResult<Option<Identity>> {
            self.get_session_calls.fetch_add(1, Ordering::SeqCst);
            if self.hang_get_session.load(Ordering::SeqCst) {
                return std::future::pending().await;
            }
            if let Some(err) = self.session_error.lock().unwrap().clone() {
                return Err(err);
            }
            Ok(self.session.lock().unwrap().clone())
        }

        async fn reset_password_for_email(
            &self,
            _email: &Email,
            _redirect_to: &str,
        ) -> ProviderResult<()> {
            Ok(())
        }

        async fn update_user(&self, _profile: &Profile) -> ProviderResult<()> {
            Ok(())
        }

        fn subscribe(&self) -> mpsc::UnboundedReceiver<AuthEvent> {
            let (sender, receiver) = mpsc::unbounded_channel();
            self.subscribers.lock().unwrap().push(sender);
            receiver
        }
    }

    /// Security hooks with call counters and a scriptable failure mode
    #[derive(Default)]
    pub struct MockHooks {
        pub register_device_calls: AtomicU32,
        pub suspicious_checks: AtomicU32,
        pub security_events: Mutex<Vec<(SecurityEventKind, String)>>,
        pub fail: AtomicBool,
        pub suspicious: AtomicBool,
    }

    impl MockHooks {
        pub fn failing() -> Self {
            let hooks = Self::default();
            hooks.fail.store(true, Ordering::SeqCst);
            hooks
        }

        pub fn suspicious() -> Self {
            let hooks = Self::default();
            hooks.suspicious.store(true, Ordering::SeqCst);
            hooks
        }
    }

    impl SecurityHooks for MockHooks {
        async fn register_device(
            &self,
            _user_id: &UserId,
            _device: &DeviceInfo,
        ) -> Result<(), HookError> {
            self.register_device_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                return Err(HookError::new("device registry down"));
            }
            Ok(())
        }

        async fn log_security_event(
            &self,
            kind: SecurityEventKind,
            _user_id: Option<&UserId>,
            details: &str,
        ) -> Result<(), HookError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(HookError::new("audit trail down"));
            }
            self.security_events
                .lock()
                .unwrap()
                .push((kind, details.to_string()));
            Ok(())
        }

        async fn check_suspicious_activity(&self, _user_id: &UserId) -> Result<bool, HookError> {
            self.suspicious_checks.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                return Err(HookError::new("anomaly service down"));
            }
            Ok(self.suspicious.load(Ordering::SeqCst))
        }
    }

    /// Notifier that records every notice
    #[derive(Default)]
    pub struct CollectingNotifier {
        pub notices: Mutex<Vec<Notice>>,
    }

    impl CollectingNotifier {
        pub fn titles(&self) -> Vec<String> {
            self.notices
                .lock()
                .unwrap()
                .iter()
                .map(|notice| notice.title.clone())
                .collect()
        }
    }

    impl Notifier for CollectingNotifier {
        fn notify(&self, notice: Notice) {
            self.notices.lock().unwrap().push(notice);
        }
    }

    /// Navigator that records every route
    #[derive(Default)]
    pub struct RecordingNavigator {
        pub routes: Mutex<Vec<Route>>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, route: Route) {
            self.routes.lock().unwrap().push(route);
        }
    }

    pub type TestGuard = AuthGuard<MockProvider, MockHooks>;

    /// Wire a guard against mocks; IP discovery off so tests stay offline.
    pub async fn start_guard(
        provider: Arc<MockProvider>,
        hooks: Arc<MockHooks>,
    ) -> (TestGuard, Arc<CollectingNotifier>, Arc<RecordingNavigator>) {
        let notifier = Arc::new(CollectingNotifier::default());
        let navigator = Arc::new(RecordingNavigator::default());
        let config = GuardConfig {
            discover_public_ip: false,
            ..GuardConfig::default()
        };
        let guard = AuthGuard::start(
            provider,
            hooks,
            notifier.clone(),
            navigator.clone(),
            config,
        )
        .await
        .expect("guard start");
        (guard, notifier, navigator)
    }

    /// Give the event pump and best-effort tasks a chance to run.
    pub async fn settle() {
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
}

#[cfg(test)]
mod sign_in_tests {
    use std::sync::Arc;
    use std::sync::atomic::Ordering;

    use super::support::*;
    use crate::domain::hooks::SecurityEventKind;
    use crate::error::AuthError;

    #[tokio::test]
    async fn test_fifth_attempt_rejected_locally_with_provider_at_four() {
        let provider =
            Arc::new(MockProvider::new().failing_sign_in("Invalid login credentials", 400));
        let hooks = Arc::new(MockHooks::default());
        let (guard, notifier, _) = start_guard(provider.clone(), hooks).await;

        for _ in 0..4 {
            let err = guard
                .sign_in("user@example.com", "wrong-horse-battery")
                .await
                .unwrap_err();
            assert!(matches!(err, AuthError::InvalidCredentials));
        }

        let err = guard
            .sign_in("user@example.com", "wrong-horse-battery")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::RateLimited { .. }));

        // Calls 1-4 reached the provider; call 5 was a local short-circuit.
        assert_eq!(provider.sign_in_calls.load(Ordering::SeqCst), 4);
        assert!(notifier.titles().contains(&"Sign-in blocked".to_string()));
    }

    #[tokio::test]
    async fn test_rate_limit_counts_successful_attempts() {
        // Five quick successes lock the identifier just like failures would.
        // Deliberate: the budget is attempt-based, not failure-based.
        let provider = Arc::new(MockProvider::new());
        let hooks = Arc::new(MockHooks::default());
        let (guard, _, _) = start_guard(provider.clone(), hooks).await;

        for _ in 0..4 {
            guard
                .sign_in("user@example.com", "correct-horse-battery")
                .await
                .unwrap();
        }

        let err = guard
            .sign_in("user@example.com", "correct-horse-battery")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::RateLimited { .. }));
        assert_eq!(provider.sign_in_calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_provider_error_classification() {
        let provider =
            Arc::new(MockProvider::new().failing_sign_in("Email not confirmed", 400));
        let hooks = Arc::new(MockHooks::default());
        let (guard, notifier, _) = start_guard(provider, hooks).await;

        let err = guard
            .sign_in("user@example.com", "some-password")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::EmailNotConfirmed));
        assert!(notifier.titles().contains(&"Email not confirmed".to_string()));
    }

    #[tokio::test]
    async fn test_failed_login_security_event_recorded() {
        let provider =
            Arc::new(MockProvider::new().failing_sign_in("Invalid login credentials", 400));
        let hooks = Arc::new(MockHooks::default());
        let (guard, _, _) = start_guard(provider, hooks.clone()).await;

        guard
            .sign_in("user@example.com", "wrong")
            .await
            .unwrap_err();
        settle().await;

        let events = hooks.security_events.lock().unwrap();
        assert!(
            events
                .iter()
                .any(|(kind, details)| *kind == SecurityEventKind::FailedLogin
                    && details.contains("user@example.com"))
        );
    }

    #[tokio::test]
    async fn test_malformed_email_never_reaches_provider() {
        let provider = Arc::new(MockProvider::new());
        let hooks = Arc::new(MockHooks::default());
        let (guard, _, _) = start_guard(provider.clone(), hooks).await;

        let err = guard
            .sign_in("not-an-email", "irrelevant-pass")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert_eq!(provider.sign_in_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_hook_failures_do_not_block_sign_in() {
        let provider = Arc::new(MockProvider::new());
        let hooks = Arc::new(MockHooks::failing());
        let (guard, _, _) = start_guard(provider, hooks.clone()).await;

        guard
            .sign_in("user@example.com", "correct-horse-battery")
            .await
            .unwrap();
        settle().await;

        // Both hooks ran and failed, the session transition still happened.
        assert!(guard.is_authenticated());
        assert!(hooks.register_device_calls.load(Ordering::SeqCst) >= 1);
        assert!(hooks.suspicious_checks.load(Ordering::SeqCst) >= 1);
    }
}

#[cfg(test)]
mod session_store_tests {
    use std::sync::Arc;

    use super::support::*;
    use crate::application::session_store::SessionStore;
    use crate::domain::entity::session::SessionState;
    use crate::domain::event::AuthEvent;

    #[tokio::test]
    async fn test_initialize_restores_existing_session() {
        let provider = MockProvider::new().with_session(identity("boss@example.com"));
        let store = SessionStore::new();

        assert!(store.snapshot().is_uninitialized());
        store.initialize(&provider).await;
        assert!(store.is_authenticated());
    }

    #[tokio::test]
    async fn test_initialize_failure_resolves_to_unauthenticated() {
        let provider = MockProvider::new().failing_get_session("boom", 500);
        let store = SessionStore::new();

        store.initialize(&provider).await;
        assert_eq!(store.snapshot(), SessionState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_initialize_is_one_shot() {
        let provider = MockProvider::new();
        let store = SessionStore::new();
        store.initialize(&provider).await;

        // A session appearing later must not be picked up by a second call.
        let provider = MockProvider::new().with_session(identity("late@example.com"));
        store.initialize(&provider).await;
        assert_eq!(store.snapshot(), SessionState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_transitions_only_via_their_events() {
        let store = SessionStore::new();
        let user = identity("user@example.com");

        // PasswordRecovery never flips the flag, in either direction.
        store.apply(&AuthEvent::PasswordRecovery);
        assert!(!store.is_authenticated());

        store.apply(&AuthEvent::SignedIn(user.clone()));
        assert!(store.is_authenticated());
        assert_eq!(store.snapshot().identity(), Some(&user));

        store.apply(&AuthEvent::PasswordRecovery);
        assert!(store.is_authenticated());

        store.apply(&AuthEvent::SignedOut);
        assert_eq!(store.snapshot(), SessionState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_subscribers_observe_transitions() {
        let store = Arc::new(SessionStore::new());
        let mut watcher = store.subscribe();

        store.apply(&AuthEvent::SignedIn(identity("user@example.com")));
        watcher.changed().await.unwrap();
        assert!(watcher.borrow().is_authenticated());
    }
}

#[cfg(test)]
mod check_session_tests {
    use std::sync::Arc;

    use super::support::*;
    use crate::application::check_session::CheckSessionUseCase;
    use crate::application::config::GuardConfig;

    fn use_case(provider: MockProvider) -> CheckSessionUseCase<MockProvider> {
        CheckSessionUseCase::new(Arc::new(provider), Arc::new(GuardConfig::default()))
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_provider_fails_closed() {
        // A provider that never answers must read as "signed out" once the
        // three-second race is lost.
        let probe = use_case(MockProvider::new().hanging_get_session());
        assert!(!probe.execute().await);
    }

    #[tokio::test]
    async fn test_reports_provider_answer() {
        let probe = use_case(MockProvider::new().with_session(identity("user@example.com")));
        assert!(probe.execute().await);

        let probe = use_case(MockProvider::new());
        assert!(!probe.execute().await);
    }

    #[tokio::test]
    async fn test_provider_error_fails_closed() {
        let probe = use_case(MockProvider::new().failing_get_session("bad gateway", 502));
        assert!(!probe.execute().await);
    }
}

#[cfg(test)]
mod inactivity_tests {
    use std::sync::Arc;
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    use super::support::*;
    use crate::application::inactivity::{ActivityKind, InactivityGuard};
    use crate::application::session_store::SessionStore;
    use crate::domain::event::AuthEvent;

    const IDLE: Duration = Duration::from_secs(30 * 60);

    fn authenticated_store() -> Arc<SessionStore> {
        let store = Arc::new(SessionStore::new());
        store.apply(&AuthEvent::SignedIn(identity("user@example.com")));
        store
    }

    #[tokio::test(start_paused = true)]
    async fn test_activity_rearms_countdown() {
        let provider = Arc::new(MockProvider::new());
        let store = authenticated_store();
        let notifier = Arc::new(CollectingNotifier::default());
        let guard = InactivityGuard::spawn(provider.clone(), store, notifier, IDLE);

        tokio::time::advance(Duration::from_secs(29 * 60)).await;
        assert_eq!(provider.sign_out_calls.load(Ordering::SeqCst), 0);

        guard.record_activity(ActivityKind::KeyPress);
        settle().await;

        // 29 more minutes: only 29 since the key press, so still signed in.
        tokio::time::advance(Duration::from_secs(29 * 60)).await;
        assert_eq!(provider.sign_out_calls.load(Ordering::SeqCst), 0);

        // One more minute crosses the 30-minute idle mark.
        tokio::time::advance(Duration::from_secs(60)).await;
        settle().await;
        assert_eq!(provider.sign_out_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_exactly_once_per_idle_period() {
        let provider = Arc::new(MockProvider::new());
        let store = authenticated_store();
        let notifier = Arc::new(CollectingNotifier::default());
        let _guard = InactivityGuard::spawn(provider.clone(), store, notifier.clone(), IDLE);

        tokio::time::advance(IDLE).await;
        settle().await;
        assert_eq!(provider.sign_out_calls.load(Ordering::SeqCst), 1);
        assert!(notifier.titles().contains(&"Session expired".to_string()));

        // Shortly after firing nothing else happens; the next sign-out would
        // need another full idle period.
        tokio::time::advance(Duration::from_secs(60)).await;
        settle().await;
        assert_eq!(provider.sign_out_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_firing_without_session_is_noop() {
        let provider = Arc::new(MockProvider::new());
        let store = Arc::new(SessionStore::new());
        store.apply(&AuthEvent::SignedOut);
        let notifier = Arc::new(CollectingNotifier::default());
        let _guard = InactivityGuard::spawn(provider.clone(), store, notifier.clone(), IDLE);

        tokio::time::advance(IDLE + Duration::from_secs(60)).await;
        settle().await;
        assert_eq!(provider.sign_out_calls.load(Ordering::SeqCst), 0);
        assert!(notifier.titles().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_releases_timer() {
        let provider = Arc::new(MockProvider::new());
        let store = authenticated_store();
        let notifier = Arc::new(CollectingNotifier::default());
        let guard = InactivityGuard::spawn(provider.clone(), store, notifier, IDLE);

        drop(guard);
        tokio::time::advance(IDLE + Duration::from_secs(60)).await;
        settle().await;
        assert_eq!(provider.sign_out_calls.load(Ordering::SeqCst), 0);
    }
}

#[cfg(test)]
mod event_flow_tests {
    use std::sync::Arc;
    use std::sync::atomic::Ordering;

    use super::support::*;
    use crate::domain::event::AuthEvent;
    use crate::domain::hooks::{Route, SecurityEventKind};

    #[tokio::test]
    async fn test_signed_in_event_drives_side_effects() {
        let provider = Arc::new(MockProvider::new());
        let hooks = Arc::new(MockHooks::default());
        let (guard, notifier, navigator) = start_guard(provider.clone(), hooks.clone()).await;

        provider.emit(AuthEvent::SignedIn(identity("boss@example.com")));
        settle().await;

        assert!(guard.is_authenticated());
        assert!(navigator.routes.lock().unwrap().contains(&Route::Home));
        assert!(notifier.titles().contains(&"Signed in".to_string()));
        assert_eq!(hooks.register_device_calls.load(Ordering::SeqCst), 1);
        assert_eq!(hooks.suspicious_checks.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_suspicious_activity_warns_user() {
        let provider = Arc::new(MockProvider::new());
        let hooks = Arc::new(MockHooks::suspicious());
        let (_guard, notifier, _) = start_guard(provider.clone(), hooks.clone()).await;

        provider.emit(AuthEvent::SignedIn(identity("boss@example.com")));
        settle().await;

        assert!(notifier.titles().contains(&"Security alert".to_string()));
        let events = hooks.security_events.lock().unwrap();
        assert!(
            events
                .iter()
                .any(|(kind, _)| *kind == SecurityEventKind::SuspiciousActivity)
        );
    }

    #[tokio::test]
    async fn test_signed_out_event_navigates_to_sign_in() {
        let provider = Arc::new(MockProvider::new());
        let hooks = Arc::new(MockHooks::default());
        let (guard, _, navigator) = start_guard(provider.clone(), hooks).await;

        guard
            .sign_in("user@example.com", "correct-horse-battery")
            .await
            .unwrap();
        settle().await;
        assert!(guard.is_authenticated());

        guard.sign_out().await.unwrap();
        settle().await;

        assert!(!guard.is_authenticated());
        assert!(navigator.routes.lock().unwrap().contains(&Route::SignIn));
    }

    #[tokio::test]
    async fn test_password_recovery_navigates_without_authenticating() {
        let provider = Arc::new(MockProvider::new());
        let hooks = Arc::new(MockHooks::default());
        let (guard, _, navigator) = start_guard(provider.clone(), hooks).await;

        provider.emit(AuthEvent::PasswordRecovery);
        settle().await;

        assert!(!guard.is_authenticated());
        assert!(
            navigator
                .routes
                .lock()
                .unwrap()
                .contains(&Route::UpdatePassword)
        );
    }

    #[tokio::test]
    async fn test_startup_restores_session_before_returning() {
        let provider =
            Arc::new(MockProvider::new().with_session(identity("returning@example.com")));
        let hooks = Arc::new(MockHooks::default());
        let (guard, _, _) = start_guard(provider, hooks).await;

        // No event needed: start() resolved Uninitialized itself.
        assert!(guard.is_authenticated());
    }
}

#[cfg(test)]
mod account_tests {
    use std::sync::Arc;
    use std::sync::atomic::Ordering;

    use super::support::*;
    use crate::application::sign_up::SignUpInput;
    use crate::domain::provider::Profile;
    use crate::error::AuthError;

    #[tokio::test]
    async fn test_sign_up_rejects_weak_password_locally() {
        let provider = Arc::new(MockProvider::new());
        let hooks = Arc::new(MockHooks::default());
        let (guard, notifier, _) = start_guard(provider.clone(), hooks).await;

        let err = guard
            .sign_up(SignUpInput {
                email: "new@example.com".to_string(),
                password: "short".to_string(),
                profile: Profile::with_display_name("New Dispatcher"),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::PasswordPolicy(_)));
        assert_eq!(provider.sign_up_calls.load(Ordering::SeqCst), 0);
        assert!(notifier.titles().contains(&"Weak password".to_string()));
    }

    #[tokio::test]
    async fn test_sign_up_rejects_malformed_email_locally() {
        let provider = Arc::new(MockProvider::new());
        let hooks = Arc::new(MockHooks::default());
        let (guard, _, _) = start_guard(provider.clone(), hooks).await;

        let err = guard
            .sign_up(SignUpInput {
                email: "definitely not an email".to_string(),
                password: "correct-horse-battery".to_string(),
                profile: Profile::default(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::InvalidEmail(_)));
        assert_eq!(provider.sign_up_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_reset_password_notice_is_neutral() {
        let provider = Arc::new(MockProvider::new());
        let hooks = Arc::new(MockHooks::default());
        let (guard, notifier, _) = start_guard(provider, hooks).await;

        guard.reset_password("user@example.com").await.unwrap();

        let notices = notifier.notices.lock().unwrap();
        let notice = notices.last().unwrap();
        assert_eq!(notice.title, "Check your email");
        // Phrasing must not reveal whether the account exists.
        assert!(notice.description.contains("If an account exists"));
    }

    #[tokio::test]
    async fn test_update_profile_confirms() {
        let provider = Arc::new(MockProvider::new());
        let hooks = Arc::new(MockHooks::default());
        let (guard, notifier, _) = start_guard(provider, hooks).await;

        guard
            .update_profile(&Profile::with_display_name("Alex"))
            .await
            .unwrap();
        assert!(notifier.titles().contains(&"Profile updated".to_string()));
    }
}
