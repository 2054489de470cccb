//! Public review routes.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use tracing::instrument;

use bloom_haven_core::Review;
use bloom_haven_core::review::ReviewSubmission;

use crate::error::Result;
use crate::services::reviews::SubmitError;
use crate::state::AppState;

/// Response for a review submission.
#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Latest approved reviews.
///
/// GET /api/reviews
///
/// # Errors
///
/// Returns an error if the store cannot be read.
#[instrument(skip(state))]
pub async fn published(State(state): State<AppState>) -> Result<Json<Vec<Review>>> {
    let reviews = state.reviews().published().await?;
    Ok(Json(reviews.as_ref().clone()))
}

/// Submit a review for moderation.
///
/// POST /reviews
#[instrument(skip(state, submission))]
pub async fn submit(
    State(state): State<AppState>,
    Json(submission): Json<ReviewSubmission>,
) -> (StatusCode, Json<ReviewResponse>) {
    match state.reviews().submit(submission).await {
        Ok(_) => (
            StatusCode::CREATED,
            Json(ReviewResponse {
                success: true,
                message: Some(
                    "Thank you! Your review will appear once it has been approved.".to_string(),
                ),
            }),
        ),
        Err(SubmitError::Invalid(e)) => (
            StatusCode::BAD_REQUEST,
            Json(ReviewResponse {
                success: false,
                message: Some(e.to_string()),
            }),
        ),
        Err(SubmitError::Store(e)) => {
            tracing::error!(error = %e, "Failed to store review");
            (
                StatusCode::BAD_GATEWAY,
                Json(ReviewResponse {
                    success: false,
                    message: Some("Something went wrong. Please try again.".to_string()),
                }),
            )
        }
    }
}
