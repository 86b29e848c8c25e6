// File: ./src/client/mod.rs
pub mod auth;
pub mod core;
pub mod error;
pub mod middleware;

pub use crate::client::auth::{Credentials, SignupOutcome, SignupPayload};
pub use crate::client::core::{ApiResponse, BookClient, RequestOptions};
pub use crate::client::error::ApiError;
