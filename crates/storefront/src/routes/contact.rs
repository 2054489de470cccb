//! Contact form route handler.
//!
//! Inquiries are validated and handed to the form relay, which emails them
//! to the business.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use tracing::instrument;

use bloom_haven_core::inquiry::{Inquiry, InquiryError, InquiryForm};

use crate::state::AppState;

/// Response for form submission.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn reply(status: StatusCode, success: bool, message: &str) -> (StatusCode, Json<ContactResponse>) {
    (
        status,
        Json(ContactResponse {
            success,
            message: Some(message.to_string()),
        }),
    )
}

/// Submit an inquiry.
///
/// POST /contact
#[instrument(skip(state, form), fields(service = ?form.service))]
pub async fn submit(
    State(state): State<AppState>,
    Json(form): Json<InquiryForm>,
) -> (StatusCode, Json<ContactResponse>) {
    let inquiry = match Inquiry::parse(form) {
        Ok(inquiry) => inquiry,
        Err(InquiryError::Email(_)) => {
            return reply(
                StatusCode::BAD_REQUEST,
                false,
                "Please enter a valid email address.",
            );
        }
        Err(e) => return reply(StatusCode::BAD_REQUEST, false, &e.to_string()),
    };

    let Some(relay) = state.relay() else {
        tracing::error!("Form relay not configured");
        return reply(
            StatusCode::SERVICE_UNAVAILABLE,
            false,
            "Service temporarily unavailable.",
        );
    };

    match relay.submit(&inquiry).await {
        Ok(()) => {
            tracing::info!(service = %inquiry.service, "Inquiry relayed");
            reply(
                StatusCode::OK,
                true,
                "Thank you! We'll get back to you shortly.",
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to relay inquiry");
            reply(
                StatusCode::BAD_GATEWAY,
                false,
                "Something went wrong. Please try again.",
            )
        }
    }
}
