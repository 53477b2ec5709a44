//! The seam between the session lifecycle and the backend's auth endpoints.

use healthlink_api::{request as req, response as res};
use std::future::Future;
use thiserror::Error;

/// Failure modes of a backend call, normalized at the HTTP layer.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The backend rejected the bearer token (HTTP 401).
    #[error("Unauthorized")]
    Unauthorized,
    /// Any other HTTP failure, with the message already extracted from the
    /// backend's error payload (validation arrays concatenated).
    #[error("{message}")]
    Api { status: u16, message: String },
    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(String),
}

impl ApiError {
    /// The display-ready message shown to the user, with a generic fallback
    /// for failures that carry nothing human-readable.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Api { message, .. } if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// The auth endpoints the session lifecycle depends on.
///
/// Implemented over fetch in the web crate and stubbed in tests.
pub trait AuthApi {
    fn login(
        &self,
        login: &req::Login<'_>,
    ) -> impl Future<Output = Result<res::AuthResponse, ApiError>>;

    fn register(
        &self,
        register: &req::Register<'_>,
    ) -> impl Future<Output = Result<res::AuthResponse, ApiError>>;

    /// `GET /auth/me`, the authoritative profile for the current token.
    fn me(&self) -> impl Future<Output = Result<res::User, ApiError>>;
}
