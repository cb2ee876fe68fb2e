//! Error taxonomy for the HTTP and session layer.
//!
//! Session-level failures (`InvalidCredentials`, `SessionExpired`) are handled
//! once, centrally, by the client wrapper and the session store. Everything
//! else stays with the call site.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Sign-in was rejected by the backend. The session stays signed out.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The backend answered 401 on an authenticated request. A global
    /// sign-out has already been published when this is returned.
    #[error("session expired or no longer authorized")]
    SessionExpired,

    /// The request never produced a server response. Does not affect
    /// session state.
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered with a non-401 error status.
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },

    /// Input rejected before any request was made.
    #[error("invalid input: {0}")]
    Validation(String),
}

impl ApiError {
    /// True when retrying with the same session cannot succeed and the
    /// caller should send the user back to sign-in.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, ApiError::SessionExpired)
    }
}
