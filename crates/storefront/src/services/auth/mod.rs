//! Moderator authentication.
//!
//! Sign-in is delegated to an external identity service. The site only
//! keeps the returned access token in the moderator's session and checks
//! for its presence.

mod error;

use std::fmt;

use async_trait::async_trait;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use bloom_haven_core::Email;

pub use error::AuthError;

/// Bearer token issued by the identity service.
///
/// Serializable so it can live in the session; `Debug` never prints it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    #[must_use]
    pub const fn new(token: String) -> Self {
        Self(token)
    }

    /// The raw token, for an `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}

/// Identity service used for moderator sign-in.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Exchange an email and password for an access token.
    async fn sign_in(&self, email: &Email, password: &SecretString)
    -> Result<AccessToken, AuthError>;

    /// Revoke a token. Callers treat failures as non-fatal.
    async fn sign_out(&self, token: &AccessToken) -> Result<(), AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_debug_is_redacted() {
        let token = AccessToken::new("eyJ.secret.token".to_string());
        let debug_output = format!("{token:?}");
        assert!(!debug_output.contains("secret"));
        assert_eq!(token.expose(), "eyJ.secret.token");
    }
}
