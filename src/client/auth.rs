// File: ./src/client/auth.rs
//! Sign-in / sign-up flows: ordered endpoint fallback and token extraction.
//!
//! The backend's auth routes differ between deployments, so each flow tries
//! a fixed, ordered list of candidate paths and short-circuits on the first
//! success; if every path fails, the last error is propagated.
use crate::client::core::{BookClient, RequestOptions};
use crate::client::error::ApiError;
use serde::Serialize;
use serde_json::Value;

pub const SIGNIN_PATHS: [&str; 2] = ["/api/auth/login", "/api/auth/signin"];
pub const SIGNUP_PATHS: [&str; 2] = ["/api/auth/register", "/api/auth/signup"];

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignupPayload {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupOutcome {
    /// The backend returned a token; it is stored and the user is signed in.
    SignedIn,
    /// Account created but no token returned; the user signs in manually.
    RedirectToSignIn,
}

/// Extract the token from whichever field this deployment uses:
/// `token`, `accessToken`, `jwt`, or `data.token`, in that order.
pub fn extract_token(value: &Value) -> Option<String> {
    ["token", "accessToken", "jwt"]
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .or_else(|| {
            value
                .get("data")
                .and_then(|data| data.get("token"))
                .and_then(Value::as_str)
        })
        .map(str::to_string)
}

impl BookClient {
    async fn post_with_fallback(&self, paths: &[&str], body: &str) -> Result<Value, ApiError> {
        let mut last_err = None;
        for path in paths {
            match self
                .api_json(path, RequestOptions::post(body.to_string()))
                .await
            {
                Ok(json) => return Ok(json),
                Err(e) => {
                    log::debug!("auth endpoint {} failed: {}", path, e);
                    last_err = Some(e);
                }
            }
        }
        Err(last_err
            .unwrap_or_else(|| ApiError::Network("no auth endpoint configured".to_string())))
    }

    /// Sign in and store the returned token in the session.
    ///
    /// An HTTP success without any recognizable token field is a failure
    /// (`ApiError::TokenNotFound`): the caller cannot proceed authenticated.
    pub async fn sign_in(&self, creds: &Credentials) -> Result<(), ApiError> {
        let body = serde_json::to_string(creds).map_err(|e| ApiError::Network(e.to_string()))?;
        let json = self.post_with_fallback(&SIGNIN_PATHS, &body).await?;

        let token = extract_token(&json).ok_or(ApiError::TokenNotFound)?;
        self.session()
            .write()
            .map_err(|_| ApiError::Network("session lock poisoned".to_string()))?
            .set_token(&token);
        Ok(())
    }

    /// Sign up. Unlike sign-in, a missing token is a normal outcome: the
    /// account exists and the user is redirected to sign in.
    pub async fn sign_up(&self, payload: &SignupPayload) -> Result<SignupOutcome, ApiError> {
        let body =
            serde_json::to_string(payload).map_err(|e| ApiError::Network(e.to_string()))?;
        let json = self.post_with_fallback(&SIGNUP_PATHS, &body).await?;

        match extract_token(&json) {
            Some(token) => {
                self.session()
                    .write()
                    .map_err(|_| ApiError::Network("session lock poisoned".to_string()))?
                    .set_token(&token);
                Ok(SignupOutcome::SignedIn)
            }
            None => Ok(SignupOutcome::RedirectToSignIn),
        }
    }
}
