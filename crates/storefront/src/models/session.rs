//! Session-related types.
//!
//! Types stored in the session for moderator authentication state.

use serde::{Deserialize, Serialize};

use bloom_haven_core::Email;

use crate::services::auth::AccessToken;

/// Session-stored moderator identity.
///
/// Holds the collaborator's access token so moderation calls can be made on
/// the moderator's behalf. The token is redacted from `Debug` output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentModerator {
    /// Moderator's email address.
    pub email: Email,
    /// Access token issued at sign-in.
    pub access_token: AccessToken,
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the signed-in moderator.
    pub const CURRENT_MODERATOR: &str = "current_moderator";
}
