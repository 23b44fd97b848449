//! Authentication gate
//!
//! One capability interface, two interchangeable backends: an in-memory demo
//! provider that accepts any well-formed credentials and an HTTP provider that
//! talks to a remote identity service. The chat session only needs to know
//! whether somebody is signed in.

pub mod demo;
pub mod remote;

use crate::forms::{Credentials, SignUpForm};
use crate::i18n::Locale;
use crate::models::User;
use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

pub use demo::DemoAuthProvider;
pub use remote::RemoteAuthProvider;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("email and password are required")]
    FieldsRequired,
    #[error("email address is malformed")]
    InvalidEmail,
    #[error("password is shorter than the minimum length")]
    PasswordTooShort,
    #[error("password is longer than the maximum length")]
    PasswordTooLong,
    #[error("password confirmation does not match")]
    PasswordMismatch,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("account already exists")]
    AlreadyRegistered,
    #[error("sign-up rejected: {0}")]
    SignUpRejected(String),
    #[error("auth backend error: {0}")]
    Backend(String),
}

impl AuthError {
    /// Fixed localized message for the user; backend detail stays in the logs.
    pub fn user_message(&self, locale: Locale) -> &'static str {
        let texts = locale.texts();
        match self {
            Self::FieldsRequired => texts.fields_required,
            Self::InvalidEmail => texts.invalid_email,
            Self::PasswordTooShort => texts.password_too_short,
            Self::PasswordTooLong => texts.password_too_long,
            Self::PasswordMismatch => texts.password_mismatch,
            Self::InvalidCredentials => texts.sign_in_failed,
            Self::AlreadyRegistered | Self::SignUpRejected(_) => texts.sign_up_failed,
            Self::Backend(_) => texts.sign_in_failed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpOutcome {
    /// Account created and the user is signed in right away.
    SignedIn(User),
    /// Account created; the user has to confirm the email before signing in.
    ConfirmationSent,
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in(&self, credentials: &Credentials) -> Result<User, AuthError>;
    async fn sign_up(&self, form: &SignUpForm) -> Result<SignUpOutcome, AuthError>;
    async fn sign_out(&self) -> Result<(), AuthError>;
    async fn current_user(&self) -> Option<User>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthBackend {
    #[default]
    Demo,
    Remote,
}

impl fmt::Display for AuthBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Demo => write!(f, "demo"),
            Self::Remote => write!(f, "remote"),
        }
    }
}

impl FromStr for AuthBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "demo" => Ok(Self::Demo),
            "remote" => Ok(Self::Remote),
            other => Err(format!("unknown auth backend: {}", other)),
        }
    }
}

/// Pick the auth provider implementation.
pub fn init(backend: AuthBackend, auth_url: Option<String>) -> Arc<dyn AuthProvider> {
    match (backend, auth_url.filter(|url| !url.trim().is_empty())) {
        (AuthBackend::Remote, Some(url)) => match RemoteAuthProvider::new(&url) {
            Ok(provider) => {
                tracing::info!("Remote auth provider initialized ({})", url);
                Arc::new(provider)
            }
            Err(err) => {
                tracing::error!(
                    error = %err,
                    "Failed to initialize remote auth provider, falling back to demo"
                );
                Arc::new(DemoAuthProvider::default())
            }
        },
        (AuthBackend::Remote, None) => {
            tracing::warn!("Remote auth selected without an auth URL - using demo provider");
            Arc::new(DemoAuthProvider::default())
        }
        (AuthBackend::Demo, _) => {
            tracing::debug!("Using demo auth provider");
            Arc::new(DemoAuthProvider::default())
        }
    }
}
