//! Moderator sign-in and review moderation.
//!
//! Results of actions come back to the dashboard as `?notice=` or `?error=`
//! codes, which are turned into messages here.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use secrecy::SecretString;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use bloom_haven_core::review::ModerationStats;
use bloom_haven_core::{Email, ReviewFilter, ReviewId};

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::auth::LOGIN_PATH;
use crate::middleware::{
    OptionalModerator, RequireModerator, clear_current_moderator, set_current_moderator,
};
use crate::models::CurrentModerator;
use crate::services::auth::AuthError;
use crate::services::reviews::ModerationError;
use crate::services::store::StoreError;
use crate::state::AppState;

use super::empty_string_as_none;
use super::views::{ReviewCard, Tab};

// =============================================================================
// Form and Query Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Query parameters for error/notice display.
#[derive(Debug, Default, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub notice: Option<String>,
}

/// Dashboard query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub filter: Option<ReviewFilter>,
    pub error: Option<String>,
    pub notice: Option<String>,
}

/// Filter to come back to after an action.
#[derive(Debug, Default, Deserialize)]
pub struct ReturnQuery {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub filter: Option<ReviewFilter>,
}

const fn filter_label(filter: ReviewFilter) -> &'static str {
    match filter {
        ReviewFilter::All => "All",
        ReviewFilter::Pending => "Pending",
        ReviewFilter::Approved => "Approved",
    }
}

fn notice_text(code: &str) -> Option<&'static str> {
    match code {
        "approved" => Some("Review approved."),
        "deleted" => Some("Review deleted."),
        "signed_out" => Some("You have been signed out."),
        _ => None,
    }
}

fn error_text(code: &str) -> &'static str {
    match code {
        "credentials" => "Invalid email or password.",
        "expired" => "Your session has expired. Please sign in again.",
        "not_found" => "That review no longer exists.",
        "unavailable" => "The review service is temporarily unavailable.",
        "session" => "Could not start your session. Please try again.",
        _ => "Something went wrong. Please try again.",
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/login.html")]
pub struct LoginTemplate {
    pub error: Option<&'static str>,
    pub notice: Option<&'static str>,
}

/// Moderation dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub moderator: String,
    pub reviews: Vec<ReviewCard>,
    pub stats: ModerationStats,
    pub filter: ReviewFilter,
    pub filter_tabs: Vec<Tab>,
    pub error: Option<&'static str>,
    pub notice: Option<&'static str>,
}

/// Delete confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/confirm_delete.html")]
pub struct ConfirmDeleteTemplate {
    pub id: ReviewId,
    pub filter: ReviewFilter,
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(
    OptionalModerator(moderator): OptionalModerator,
    Query(query): Query<MessageQuery>,
) -> Response {
    if moderator.is_some() {
        return Redirect::to("/admin").into_response();
    }

    LoginTemplate {
        error: query.error.as_deref().map(error_text),
        notice: query.notice.as_deref().and_then(notice_text),
    }
    .into_response()
}

/// Handle login form submission.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Redirect {
    let Ok(email) = Email::parse(&form.email) else {
        return Redirect::to(&format!("{LOGIN_PATH}?error=credentials"));
    };
    let password = SecretString::from(form.password);

    match state.auth().sign_in(&email, &password).await {
        Ok(access_token) => {
            let moderator = CurrentModerator {
                email,
                access_token,
            };
            if let Err(e) = set_current_moderator(&session, &moderator).await {
                tracing::error!("Failed to set session: {}", e);
                return Redirect::to(&format!("{LOGIN_PATH}?error=session"));
            }
            set_sentry_user(moderator.email.as_str());
            tracing::info!(email = %moderator.email, "Moderator signed in");
            Redirect::to("/admin")
        }
        Err(AuthError::InvalidCredentials | AuthError::InvalidEmail(_)) => {
            tracing::warn!("Moderator sign-in rejected");
            Redirect::to(&format!("{LOGIN_PATH}?error=credentials"))
        }
        Err(e) => {
            tracing::error!(error = %e, "Moderator sign-in failed");
            Redirect::to(&format!("{LOGIN_PATH}?error=unavailable"))
        }
    }
}

/// Sign out. The session is cleared even if the identity service cannot be
/// reached.
#[instrument(skip(state, session))]
pub async fn logout(State(state): State<AppState>, session: Session) -> Redirect {
    match clear_current_moderator(&session).await {
        Ok(Some(moderator)) => {
            if let Err(e) = state.auth().sign_out(&moderator.access_token).await {
                tracing::warn!(error = %e, "Failed to revoke moderator token");
            }
        }
        Ok(None) => {}
        Err(e) => tracing::error!("Failed to clear session: {}", e),
    }
    clear_sentry_user();
    Redirect::to(&format!("{LOGIN_PATH}?notice=signed_out"))
}

// =============================================================================
// Moderation Routes
// =============================================================================

fn dashboard_url(filter: ReviewFilter, param: &str, code: &str) -> String {
    format!("/admin?filter={filter}&{param}={code}")
}

/// Where to send the moderator after a failed action.
async fn failure_redirect(
    session: &Session,
    filter: ReviewFilter,
    err: &ModerationError,
) -> Redirect {
    match err {
        ModerationError::NotSignedIn => Redirect::to(LOGIN_PATH),
        ModerationError::Store(StoreError::Unauthorized) => {
            // Token expired or revoked upstream; the session is useless now.
            if let Err(e) = clear_current_moderator(session).await {
                tracing::error!("Failed to clear session: {}", e);
            }
            Redirect::to(&format!("{LOGIN_PATH}?error=expired"))
        }
        ModerationError::Store(StoreError::NotFound(_)) => {
            Redirect::to(&dashboard_url(filter, "error", "not_found"))
        }
        ModerationError::Store(e) => {
            tracing::error!(error = %e, "Moderation action failed");
            Redirect::to(&dashboard_url(filter, "error", "unavailable"))
        }
    }
}

/// Display the moderation dashboard.
#[instrument(skip(state, session, moderator))]
pub async fn dashboard(
    State(state): State<AppState>,
    session: Session,
    OptionalModerator(moderator): OptionalModerator,
    Query(query): Query<DashboardQuery>,
) -> Response {
    let filter = query.filter.unwrap_or_default();
    let token = moderator.as_ref().map(|m| &m.access_token);

    let (list, error) = match state.reviews().moderation_list(token, filter).await {
        Ok(list) => (Some(list), query.error.as_deref().map(error_text)),
        Err(
            e @ (ModerationError::NotSignedIn | ModerationError::Store(StoreError::Unauthorized)),
        ) => return failure_redirect(&session, filter, &e).await.into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load moderation list");
            (None, Some(error_text("unavailable")))
        }
    };

    let (reviews, stats) = list.map_or_else(
        || (Vec::new(), ModerationStats::default()),
        |l| (l.reviews.iter().map(ReviewCard::from).collect(), l.stats),
    );
    let filter_tabs = ReviewFilter::ALL
        .into_iter()
        .map(|f| Tab::new(format!("/admin?filter={f}"), filter_label(f), f == filter))
        .collect();

    DashboardTemplate {
        moderator: moderator.map(|m| m.email.to_string()).unwrap_or_default(),
        reviews,
        stats,
        filter,
        filter_tabs,
        error,
        notice: query.notice.as_deref().and_then(notice_text),
    }
    .into_response()
}

/// Approve a review.
#[instrument(skip(state, session, moderator))]
pub async fn approve(
    State(state): State<AppState>,
    session: Session,
    OptionalModerator(moderator): OptionalModerator,
    Path(id): Path<i64>,
    Query(query): Query<ReturnQuery>,
) -> Redirect {
    let filter = query.filter.unwrap_or_default();
    let token = moderator.as_ref().map(|m| &m.access_token);

    match state.reviews().approve(token, ReviewId::new(id)).await {
        Ok(_) => Redirect::to(&dashboard_url(filter, "notice", "approved")),
        Err(e) => failure_redirect(&session, filter, &e).await,
    }
}

/// Ask for confirmation before deleting.
pub async fn confirm_delete(
    RequireModerator(_moderator): RequireModerator,
    Path(id): Path<i64>,
    Query(query): Query<ReturnQuery>,
) -> impl IntoResponse {
    ConfirmDeleteTemplate {
        id: ReviewId::new(id),
        filter: query.filter.unwrap_or_default(),
    }
}

/// Delete (reject) a review.
#[instrument(skip(state, session, moderator))]
pub async fn delete(
    State(state): State<AppState>,
    session: Session,
    OptionalModerator(moderator): OptionalModerator,
    Path(id): Path<i64>,
    Query(query): Query<ReturnQuery>,
) -> Redirect {
    let filter = query.filter.unwrap_or_default();
    let token = moderator.as_ref().map(|m| &m.access_token);

    match state.reviews().reject(token, ReviewId::new(id)).await {
        Ok(()) => Redirect::to(&dashboard_url(filter, "notice", "deleted")),
        Err(e) => failure_redirect(&session, filter, &e).await,
    }
}
