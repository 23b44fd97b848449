use super::{AuthError, AuthProvider, SignUpOutcome};
use crate::forms::{Credentials, SignUpForm};
use crate::models::User;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::Mutex;

const LOGIN_ENDPOINT: &str = "/auth/login";
const REGISTER_ENDPOINT: &str = "/auth/register";
const LOGOUT_ENDPOINT: &str = "/auth/logout";

/// Token reply of the identity service.
#[derive(Debug, Clone, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    #[serde(default)]
    user_id: Option<String>,
}

/// Provider backed by a remote identity service. The token lives in memory
/// only and is dropped on sign-out.
pub struct RemoteAuthProvider {
    base_url: String,
    http_client: reqwest::Client,
    current: Mutex<Option<User>>,
}

impl RemoteAuthProvider {
    pub fn new(base_url: &str) -> Result<Self, AuthError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|err| AuthError::Backend(format!("HTTP client error: {}", err)))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
            current: Mutex::new(None),
        })
    }

    async fn post_credentials(
        &self,
        path: &str,
        credentials: &Credentials,
    ) -> Result<(StatusCode, String), AuthError> {
        let resp = self
            .http_client
            .post(format!("{}{}", self.base_url, path))
            .form(&[
                ("email", credentials.email.as_str()),
                ("password", credentials.password.as_str()),
            ])
            .send()
            .await
            .map_err(|err| AuthError::Backend(format!("Network error: {}", err)))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|err| AuthError::Backend(format!("Failed to read response: {}", err)))?;
        Ok((status, body))
    }

    fn user_from_token(email: &str, token: TokenResponse) -> Option<User> {
        let access_token = token.access_token.filter(|t| !t.is_empty())?;
        let id = token.user_id.unwrap_or_else(|| email.to_string());
        Some(User::new(id, email).with_access_token(access_token))
    }
}

#[async_trait]
impl AuthProvider for RemoteAuthProvider {
    #[tracing::instrument(name = "Remote sign in.", skip_all)]
    async fn sign_in(&self, credentials: &Credentials) -> Result<User, AuthError> {
        credentials.check()?;

        let (status, body) = self.post_credentials(LOGIN_ENDPOINT, credentials).await?;
        if status.is_client_error() {
            tracing::info!(%status, "Sign in rejected by identity service");
            return Err(AuthError::InvalidCredentials);
        }
        if !status.is_success() {
            let preview: String = body.chars().take(240).collect();
            return Err(AuthError::Backend(format!("HTTP {}: {}", status, preview)));
        }

        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|err| AuthError::Backend(format!("Invalid token response: {}", err)))?;
        let user = Self::user_from_token(&credentials.email, token)
            .ok_or_else(|| AuthError::Backend("Token response without access_token".to_string()))?;

        *self.current.lock().await = Some(user.clone());
        tracing::info!(user_id = %user.id, "User authenticated");
        Ok(user)
    }

    #[tracing::instrument(name = "Remote sign up.", skip_all)]
    async fn sign_up(&self, form: &SignUpForm) -> Result<SignUpOutcome, AuthError> {
        form.check()?;

        let (status, body) = self
            .post_credentials(REGISTER_ENDPOINT, &form.credentials)
            .await?;
        if status == StatusCode::CONFLICT {
            return Err(AuthError::AlreadyRegistered);
        }
        if status.is_client_error() {
            return Err(AuthError::SignUpRejected(format!("HTTP {}", status)));
        }
        if !status.is_success() {
            let preview: String = body.chars().take(240).collect();
            return Err(AuthError::Backend(format!("HTTP {}: {}", status, preview)));
        }

        // Services that require email confirmation answer without a token.
        let user = serde_json::from_str::<TokenResponse>(&body)
            .ok()
            .and_then(|token| Self::user_from_token(&form.credentials.email, token));

        match user {
            Some(user) => {
                *self.current.lock().await = Some(user.clone());
                Ok(SignUpOutcome::SignedIn(user))
            }
            None => Ok(SignUpOutcome::ConfirmationSent),
        }
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let user = self.current.lock().await.take();
        let Some(token) = user.and_then(|u| u.access_token) else {
            return Ok(());
        };

        // Local state is already cleared; revocation is best effort.
        let result = self
            .http_client
            .post(format!("{}{}", self.base_url, LOGOUT_ENDPOINT))
            .bearer_auth(token)
            .send()
            .await;
        if let Err(err) = result {
            tracing::warn!(error = %err, "Token revocation failed");
        }
        Ok(())
    }

    async fn current_user(&self) -> Option<User> {
        self.current.lock().await.clone()
    }
}
