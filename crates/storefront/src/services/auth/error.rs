//! Authentication error types.

use thiserror::Error;

/// Errors that can occur while signing a moderator in or out.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] bloom_haven_core::EmailError),

    /// Wrong email or password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// HTTP request to the auth service failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Auth service answered with an unexpected status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}
