//! HTTP Identity Provider Adapter
//!
//! Speaks the REST surface of a hosted GoTrue-style auth service:
//! `token?grant_type=password`, `signup`, `logout`, `user`, `recover`,
//! `verify`. The adapter owns the access token for the current session and
//! emits [`AuthEvent`]s on its subscription channels after the corresponding
//! call resolves; provider event names with no client meaning are never
//! emitted.

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tokio::sync::mpsc;
use url::Url;

use kernel::id::UserId;
use platform::retry::RetryPolicy;

use crate::domain::entity::identity::Identity;
use crate::domain::event::AuthEvent;
use crate::domain::provider::{
    IdentityProvider, Profile, ProviderError, ProviderResult,
};
use crate::domain::value_object::email::Email;

/// Hosted identity provider over HTTP
pub struct HttpIdentityProvider {
    base: Url,
    api_key: String,
    http: reqwest::Client,
    retry: RetryPolicy,
    access_token: Mutex<Option<String>>,
    subscribers: Mutex<Vec<mpsc::UnboundedSender<AuthEvent>>>,
}

impl HttpIdentityProvider {
    /// `base` is the auth root, e.g. `https://project.example.co/auth/v1`.
    pub fn new(base: Url, api_key: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            base,
            api_key: api_key.into(),
            http,
            retry: RetryPolicy::default(),
            access_token: Mutex::new(None),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Exchange a password-recovery token from an emailed link.
    ///
    /// Establishes a session scoped to updating the password and emits
    /// [`AuthEvent::PasswordRecovery`]; the session state itself is not
    /// flipped by this event.
    pub async fn exchange_recovery_token(&self, token: &str) -> ProviderResult<()> {
        let response = self
            .http
            .post(self.endpoint("verify"))
            .header("apikey", &self.api_key)
            .json(&serde_json::json!({ "type": "recovery", "token": token }))
            .send()
            .await
            .map_err(transport)?;

        let token: TokenResponse = Self::parse_success(response).await?;
        self.store_token(token.access_token);
        self.emit(AuthEvent::PasswordRecovery);
        Ok(())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base.as_str().trim_end_matches('/'), path)
    }

    fn store_token(&self, token: String) {
        *self
            .access_token
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    fn take_token(&self) -> Option<String> {
        self.access_token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    fn current_token(&self) -> Option<String> {
        self.access_token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn emit(&self, event: AuthEvent) {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        subscribers.retain(|sender| sender.send(event.clone()).is_ok());
    }

    async fn parse_success<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> ProviderResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::new(
                error_message_from_body(&body, status.as_u16()),
                status.as_u16(),
            ));
        }
        response
            .json()
            .await
            .map_err(|e| malformed(&format!("response body: {e}")))
    }

    async fn expect_success(response: reqwest::Response) -> ProviderResult<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(ProviderError::new(
            error_message_from_body(&body, status.as_u16()),
            status.as_u16(),
        ))
    }

    async fn fetch_user(&self, token: &str) -> ProviderResult<Option<Identity>> {
        let response = self
            .http
            .get(self.endpoint("user"))
            .header("apikey", &self.api_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(transport)?;

        if response.status().as_u16() == 401 {
            return Ok(None);
        }
        let user: ApiUser = Self::parse_success(response).await?;
        identity_from_user(user).map(Some)
    }
}

impl IdentityProvider for HttpIdentityProvider {
    async fn sign_in_with_password(&self, email: &Email, password: &str) -> ProviderResult<()> {
        let response = self
            .http
            .post(self.endpoint("token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.api_key)
            .json(&serde_json::json!({
                "email": email.as_str(),
                "password": password,
            }))
            .send()
            .await
            .map_err(transport)?;

        let token: TokenResponse = Self::parse_success(response).await?;
        let identity = identity_from_user(token.user)?;

        self.store_token(token.access_token);
        self.emit(AuthEvent::SignedIn(identity));
        Ok(())
    }

    async fn sign_up(
        &self,
        email: &Email,
        password: &str,
        profile: &Profile,
    ) -> ProviderResult<()> {
        let response = self
            .http
            .post(self.endpoint("signup"))
            .header("apikey", &self.api_key)
            .json(&serde_json::json!({
                "email": email.as_str(),
                "password": password,
                "data": profile,
            }))
            .send()
            .await
            .map_err(transport)?;

        Self::expect_success(response).await
    }

    async fn sign_out(&self) -> ProviderResult<()> {
        // The local session ends no matter what the revocation call does.
        let token = self.take_token();
        self.emit(AuthEvent::SignedOut);

        if let Some(token) = token {
            let result = self
                .http
                .post(self.endpoint("logout"))
                .header("apikey", &self.api_key)
                .bearer_auth(token)
                .send()
                .await;
            match result {
                Ok(response) => {
                    if let Err(err) = Self::expect_success(response).await {
                        tracing::warn!(error = %err, "Server-side session revocation failed");
                    }
                }
                Err(err) => {
                    tracing::warn!(error = %err, "Server-side session revocation unreachable");
                }
            }
        }
        Ok(())
    }

    async fn get_session(&self) -> ProviderResult<Option<Identity>> {
        let Some(token) = self.current_token() else {
            return Ok(None);
        };

        let session = self
            .retry
            .run(ProviderError::is_transient, || self.fetch_user(&token))
            .await?;

        if session.is_none() {
            // Token no longer honored; forget it.
            self.take_token();
        }
        Ok(session)
    }

    async fn reset_password_for_email(
        &self,
        email: &Email,
        redirect_to: &str,
    ) -> ProviderResult<()> {
        let response = self
            .http
            .post(self.endpoint("recover"))
            .query(&[("redirect_to", redirect_to)])
            .header("apikey", &self.api_key)
            .json(&serde_json::json!({ "email": email.as_str() }))
            .send()
            .await
            .map_err(transport)?;

        Self::expect_success(response).await
    }

    async fn update_user(&self, profile: &Profile) -> ProviderResult<()> {
        let Some(token) = self.current_token() else {
            return Err(ProviderError::new("No active session", 401));
        };

        let response = self
            .http
            .put(self.endpoint("user"))
            .header("apikey", &self.api_key)
            .bearer_auth(token)
            .json(&serde_json::json!({ "data": profile }))
            .send()
            .await
            .map_err(transport)?;

        Self::expect_success(response).await
    }

    fn subscribe(&self) -> mpsc::UnboundedReceiver<AuthEvent> {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(sender);
        receiver
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: ApiUser,
}

#[derive(Debug, Deserialize)]
struct ApiUser {
    id: String,
    email: Option<String>,
    #[serde(default)]
    user_metadata: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    last_sign_in_at: Option<DateTime<Utc>>,
}

fn identity_from_user(user: ApiUser) -> ProviderResult<Identity> {
    let user_id = UserId::parse(&user.id).map_err(|_| malformed("user id"))?;
    let email = user
        .email
        .as_deref()
        .ok_or_else(|| malformed("missing email"))
        .and_then(|raw| Email::new(raw).map_err(|_| malformed("email")))?;

    let display_name = user
        .user_metadata
        .get("display_name")
        .or_else(|| user.user_metadata.get("full_name"))
        .and_then(|value| value.as_str())
        .map(str::to_string);

    Ok(Identity {
        user_id,
        email,
        display_name,
        last_sign_in_at: user.last_sign_in_at,
    })
}

fn transport(err: reqwest::Error) -> ProviderError {
    ProviderError::transport(err.to_string())
}

fn malformed(what: &str) -> ProviderError {
    ProviderError::new(format!("Malformed provider payload: {what}"), 422)
}

/// Pull the human-readable message out of a provider error body.
///
/// The service has used several shapes over time (`error_description`,
/// `msg`, `message`); fall back to the bare status.
fn error_message_from_body(body: &str, status: u16) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["error_description", "msg", "message", "error"]
                .iter()
                .find_map(|key| value.get(key)?.as_str().map(str::to_string))
        })
        .unwrap_or_else(|| format!("Provider returned status {status}"))
}
