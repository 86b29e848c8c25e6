// File: ./src/controller/auth.rs
//! Sign-in and sign-up screens: local validation, then the auth flow.
use crate::client::{BookClient, Credentials, SignupOutcome, SignupPayload};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthFormError {
    #[error("Email is required")]
    MissingEmail,
    #[error("Email address is not valid")]
    InvalidEmail,
    #[error("Password is required")]
    MissingPassword,
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
    #[error("Password and confirmation do not match")]
    PasswordMismatch,
    #[error("Username is required")]
    MissingUsername,
    #[error("Username must be at least 3 characters")]
    UsernameTooShort,
}

fn email_looks_valid(email: &str) -> bool {
    // Deliberately lax: something@something.something
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain
            .char_indices()
            .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

#[derive(Debug, Clone, Default)]
pub struct SignInController {
    pub email: String,
    pub password: String,
    busy: bool,
}

impl SignInController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Email and password must both be present before any network call.
    pub fn validate(&self) -> Result<Credentials, AuthFormError> {
        if self.email.trim().is_empty() {
            return Err(AuthFormError::MissingEmail);
        }
        if self.password.is_empty() {
            return Err(AuthFormError::MissingPassword);
        }
        Ok(Credentials {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }

    /// On success the token is stored in the session by the auth flow.
    pub async fn submit(&mut self, client: &BookClient) -> Result<(), String> {
        let creds = self.validate().map_err(|e| e.to_string())?;
        self.busy = true;
        let result = client.sign_in(&creds).await;
        self.busy = false;
        result.map_err(|e| e.to_string())
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignUpController {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm: String,
    busy: bool,
}

impl SignUpController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn validate(&self) -> Result<SignupPayload, AuthFormError> {
        let username = self.username.trim();
        if username.is_empty() {
            return Err(AuthFormError::MissingUsername);
        }
        if username.chars().count() < 3 {
            return Err(AuthFormError::UsernameTooShort);
        }
        let email = self.email.trim();
        if email.is_empty() {
            return Err(AuthFormError::MissingEmail);
        }
        if !email_looks_valid(email) {
            return Err(AuthFormError::InvalidEmail);
        }
        if self.password.is_empty() {
            return Err(AuthFormError::MissingPassword);
        }
        if self.password.chars().count() < 6 {
            return Err(AuthFormError::PasswordTooShort);
        }
        if self.password != self.confirm {
            return Err(AuthFormError::PasswordMismatch);
        }
        Ok(SignupPayload {
            username: username.to_string(),
            email: email.to_string(),
            password: self.password.clone(),
        })
    }

    pub async fn submit(&mut self, client: &BookClient) -> Result<SignupOutcome, String> {
        let payload = self.validate().map_err(|e| e.to_string())?;
        self.busy = true;
        let result = client.sign_up(&payload).await;
        self.busy = false;
        result.map_err(|e| e.to_string())
    }
}
