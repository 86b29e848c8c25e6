// File: ./src/session.rs
//! Process-wide mutable endpoint state: the API base URL and the bearer token.
//!
//! The request helper reads this store on every call, so a changed base URL
//! or token is observed by the next request immediately. A request already
//! in flight keeps the credential it was issued with. Nothing here is
//! persisted: the token lives only for the lifetime of the process.
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone)]
pub struct Session {
    base_url: String,
    token: Option<String>,
}

impl Session {
    pub fn new(base_url: &str) -> Self {
        let mut session = Self {
            base_url: String::new(),
            token: None,
        };
        session.set_base_url(base_url);
        session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Replace the base URL. Empty input is a no-op; one trailing slash is
    /// stripped. The URL is not otherwise validated.
    pub fn set_base_url(&mut self, url: &str) {
        if url.is_empty() {
            return;
        }
        self.base_url = url.strip_suffix('/').unwrap_or(url).to_string();
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Store a token; an empty token clears the stored one.
    pub fn set_token(&mut self, token: &str) {
        if token.is_empty() {
            self.token = None;
        } else {
            self.token = Some(token.to_string());
        }
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }
}

/// Shared handle passed to the client and written by auth/config actions.
pub type SharedSession = Arc<RwLock<Session>>;

pub fn shared(base_url: &str) -> SharedSession {
    Arc::new(RwLock::new(Session::new(base_url)))
}
