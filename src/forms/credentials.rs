use crate::auth::AuthError;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;

pub const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Credentials {
    #[validate(max_length = 255)]
    #[validate(pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$")]
    pub email: String,
    #[validate(max_length = 1024)]
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_string(),
            password: password.into(),
        }
    }

    fn check_presence(&self) -> Result<(), AuthError> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(AuthError::FieldsRequired);
        }
        Ok(())
    }

    /// Presence, email shape, then password length, in that order.
    pub fn check(&self) -> Result<(), AuthError> {
        self.check_presence()?;

        // Field rules from the derive; the error tree is keyed by field name.
        let failed = match self.validate() {
            Ok(()) => serde_json::Value::Null,
            Err(errors) => serde_json::to_value(&errors).unwrap_or_default(),
        };
        if failed.pointer("/properties/email").is_some() {
            return Err(AuthError::InvalidEmail);
        }
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::PasswordTooShort);
        }
        if failed.pointer("/properties/password").is_some() {
            return Err(AuthError::PasswordTooLong);
        }
        Ok(())
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignUpForm {
    #[serde(flatten)]
    pub credentials: Credentials,
    pub confirm_password: String,
}

impl SignUpForm {
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            credentials: Credentials::new(email, password),
            confirm_password: confirm_password.into(),
        }
    }

    /// A mismatch is reported before any rule on the password itself.
    pub fn check(&self) -> Result<(), AuthError> {
        self.credentials.check_presence()?;
        if self.credentials.password != self.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        self.credentials.check()
    }
}
