use super::{AuthError, AuthProvider, SignUpOutcome};
use crate::forms::{Credentials, SignUpForm};
use crate::models::User;
use async_trait::async_trait;
use std::collections::HashSet;
use tokio::sync::Mutex;
use uuid::Uuid;

/// In-memory provider for demos. Sign-in accepts any well-formed credentials;
/// nothing is verified or persisted.
#[derive(Default)]
pub struct DemoAuthProvider {
    current: Mutex<Option<User>>,
    registered: Mutex<HashSet<String>>,
}

impl DemoAuthProvider {
    fn new_user(email: &str) -> User {
        User::new(format!("demo-{}", Uuid::new_v4().simple()), email)
    }
}

#[async_trait]
impl AuthProvider for DemoAuthProvider {
    #[tracing::instrument(name = "Demo sign in.", skip_all)]
    async fn sign_in(&self, credentials: &Credentials) -> Result<User, AuthError> {
        credentials.check()?;

        let user = Self::new_user(&credentials.email);
        *self.current.lock().await = Some(user.clone());
        tracing::info!(user_id = %user.id, "User authenticated");
        Ok(user)
    }

    #[tracing::instrument(name = "Demo sign up.", skip_all)]
    async fn sign_up(&self, form: &SignUpForm) -> Result<SignUpOutcome, AuthError> {
        form.check()?;

        let email = form.credentials.email.to_lowercase();
        if !self.registered.lock().await.insert(email) {
            return Err(AuthError::AlreadyRegistered);
        }

        let user = Self::new_user(&form.credentials.email);
        *self.current.lock().await = Some(user.clone());
        tracing::info!(user_id = %user.id, "User registered");
        Ok(SignUpOutcome::SignedIn(user))
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        if let Some(user) = self.current.lock().await.take() {
            tracing::info!(user_id = %user.id, "User logged out");
        }
        Ok(())
    }

    async fn current_user(&self) -> Option<User> {
        self.current.lock().await.clone()
    }
}
