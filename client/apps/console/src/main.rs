//! Console Driver Entry Point
//!
//! Wires the auth guard against a live identity provider and walks one full
//! session lifecycle: sign in, wait for the session event, probe the
//! session, sign out. Meant for manual verification against a project;
//! credentials and endpoints come from the environment.
//!
//! Uses `anyhow` for startup errors; application-level failures surface as
//! `auth::AuthError` with notices routed to the log stream.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

use auth::application::inactivity::ActivityKind;
use auth::domain::hooks::{NoopNavigator, NoopSecurityHooks};
use auth::{AuthGuard, GuardConfig, HttpIdentityProvider};
use platform::notify::TracingNotifier;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "console=info,auth=info,platform=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base = env::var("TMS_AUTH_URL")
        .context("TMS_AUTH_URL must be set (e.g. https://<project>.example.co/auth/v1)")?;
    let api_key = env::var("TMS_AUTH_ANON_KEY").context("TMS_AUTH_ANON_KEY must be set")?;
    let email = env::var("TMS_DEMO_EMAIL").context("TMS_DEMO_EMAIL must be set")?;
    let password = env::var("TMS_DEMO_PASSWORD").context("TMS_DEMO_PASSWORD must be set")?;

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()?;
    let provider = Arc::new(HttpIdentityProvider::new(
        Url::parse(&base).context("TMS_AUTH_URL is not a valid URL")?,
        api_key,
        http,
    ));

    let guard = AuthGuard::start(
        provider,
        Arc::new(NoopSecurityHooks),
        Arc::new(TracingNotifier),
        Arc::new(NoopNavigator),
        GuardConfig::development(),
    )
    .await?;

    tracing::info!(
        authenticated = guard.is_authenticated(),
        "Guard started; initial session state resolved"
    );

    let mut session = guard.subscribe();

    guard.sign_in(&email, &password).await?;

    // The SignedIn event is asynchronous; wait for the store to flip rather
    // than assuming the session is available the moment sign_in resolves.
    while !session.borrow_and_update().is_authenticated() {
        session.changed().await?;
    }

    let session = guard.session();
    if let Some(identity) = session.identity() {
        tracing::info!(user_id = %identity.user_id, email = %identity.email, "Session active");
    }

    // Simulate some activity so the idle countdown rearms.
    guard.record_activity(ActivityKind::KeyPress);

    let confirmed = guard.check_session().await;
    tracing::info!(confirmed, "Session probe");

    guard.sign_out().await?;
    tracing::info!("Session lifecycle complete");

    Ok(())
}
