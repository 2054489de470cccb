//! Moderator authentication extractors.
//!
//! The moderation screens and actions take [`OptionalModerator`] and hand the
//! token (or its absence) to the review service, which refuses signed-out
//! callers itself. [`RequireModerator`] is for handlers that have nothing to
//! show a signed-out visitor.

use axum::{extract::FromRequestParts, http::request::Parts, response::Redirect};
use tower_sessions::Session;

use crate::models::{CurrentModerator, session_keys};

/// Where signed-out visitors are sent.
pub const LOGIN_PATH: &str = "/admin/login";

/// Extractor that requires a signed-in moderator.
///
/// If nobody is signed in, returns a redirect to the login page.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireModerator(moderator): RequireModerator,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", moderator.email)
/// }
/// ```
pub struct RequireModerator(pub CurrentModerator);

impl<S> FromRequestParts<S> for RequireModerator
where
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let OptionalModerator(moderator) = OptionalModerator::from_request_parts(parts, state)
            .await
            .unwrap_or(OptionalModerator(None));

        moderator.map(Self).ok_or_else(|| Redirect::to(LOGIN_PATH))
    }
}

/// Extractor that optionally gets the signed-in moderator.
///
/// Unlike `RequireModerator`, this does not reject the request.
pub struct OptionalModerator(pub Option<CurrentModerator>);

impl<S> FromRequestParts<S> for OptionalModerator
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let moderator = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<CurrentModerator>(session_keys::CURRENT_MODERATOR)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        Ok(Self(moderator))
    }
}

/// Helper to store the signed-in moderator in the session.
///
/// The session id is cycled first so a pre-login cookie cannot be reused.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_moderator(
    session: &Session,
    moderator: &CurrentModerator,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session
        .insert(session_keys::CURRENT_MODERATOR, moderator)
        .await
}

/// Helper to clear the moderator from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_moderator(
    session: &Session,
) -> Result<Option<CurrentModerator>, tower_sessions::session::Error> {
    let moderator = session
        .remove::<CurrentModerator>(session_keys::CURRENT_MODERATOR)
        .await?;
    session.flush().await?;
    Ok(moderator)
}
