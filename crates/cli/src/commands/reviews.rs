//! Review moderation commands.
//!
//! # Environment Variables
//!
//! - `SUPABASE_URL` - Supabase project URL
//! - `SUPABASE_ANON_KEY` - Supabase anon (public) API key
//! - `BH_MODERATOR_EMAIL` - Moderator account email
//! - `BH_MODERATOR_PASSWORD` - Moderator account password

use std::sync::Arc;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use bloom_haven_core::{Email, EmailError, ReviewFilter, ReviewId};
use bloom_haven_storefront::config::SupabaseConfig;
use bloom_haven_storefront::services::supabase::SupabaseSetupError;
use bloom_haven_storefront::services::{
    AccessToken, AuthError, AuthProvider, ModerationError, ReviewService, SupabaseClient,
};

/// Errors that can occur during moderation commands.
#[derive(Debug, Error)]
pub enum ReviewsError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// `SUPABASE_URL` is not a URL.
    #[error("Invalid SUPABASE_URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Moderator email is malformed.
    #[error("Invalid BH_MODERATOR_EMAIL: {0}")]
    Email(#[from] EmailError),

    /// Supabase client could not be built.
    #[error(transparent)]
    Setup(#[from] SupabaseSetupError),

    /// Sign-in failed.
    #[error("Sign-in failed: {0}")]
    Auth(#[from] AuthError),

    /// Listing or moderation failed.
    #[error(transparent)]
    Moderation(#[from] ModerationError),

    /// Deletion was not confirmed.
    #[error("Refusing to delete review {0} without --yes")]
    NotConfirmed(ReviewId),
}

/// A signed-in moderation session.
struct Moderator {
    client: Arc<SupabaseClient>,
    reviews: ReviewService,
    token: AccessToken,
}

fn required(name: &'static str) -> Result<String, ReviewsError> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or(ReviewsError::MissingEnvVar(name))
}

impl Moderator {
    async fn sign_in() -> Result<Self, ReviewsError> {
        dotenvy::dotenv().ok();

        let config = SupabaseConfig {
            url: Url::parse(&required("SUPABASE_URL")?)?,
            anon_key: SecretString::from(required("SUPABASE_ANON_KEY")?),
        };
        let email = Email::parse(&required("BH_MODERATOR_EMAIL")?)?;
        let password = SecretString::from(required("BH_MODERATOR_PASSWORD")?);

        let client = Arc::new(SupabaseClient::new(&config)?);
        tracing::info!(email = %email, "Signing in...");
        let token = client.sign_in(&email, &password).await?;

        Ok(Self {
            reviews: ReviewService::new(client.clone()),
            client,
            token,
        })
    }

    async fn sign_out(self) {
        if let Err(e) = self.client.sign_out(&self.token).await {
            tracing::warn!(error = %e, "Failed to revoke token");
        }
    }
}

/// List reviews matching `filter` with totals.
///
/// # Errors
///
/// Returns an error if configuration is missing, sign-in fails or the
/// reviews cannot be loaded.
#[allow(clippy::print_stdout)]
pub async fn list(filter: ReviewFilter) -> Result<(), ReviewsError> {
    let moderator = Moderator::sign_in().await?;
    let result = moderator
        .reviews
        .moderation_list(Some(&moderator.token), filter)
        .await;
    moderator.sign_out().await;
    let list = result?;

    println!(
        "{} total, {} pending, {} approved",
        list.stats.total, list.stats.pending, list.stats.approved
    );
    for review in &list.reviews {
        let status = if review.approved { "approved" } else { "pending" };
        println!(
            "#{:<6} {:<9} {} ({}, {}) {}",
            review.id,
            status,
            review.name,
            review.event_type,
            review.rating,
            review.created_at.format("%Y-%m-%d")
        );
        println!("        {}", review.text);
    }
    Ok(())
}

/// Approve review `id`.
///
/// # Errors
///
/// Returns an error if configuration is missing, sign-in fails or the review
/// cannot be approved.
pub async fn approve(id: i64) -> Result<(), ReviewsError> {
    let moderator = Moderator::sign_in().await?;
    let result = moderator
        .reviews
        .approve(Some(&moderator.token), ReviewId::new(id))
        .await;
    moderator.sign_out().await;

    let review = result?;
    tracing::info!(id = %review.id, name = %review.name, "Review approved");
    Ok(())
}

/// Delete review `id`. Nothing is sent unless `confirmed`.
///
/// # Errors
///
/// Returns an error if not confirmed, configuration is missing, sign-in fails
/// or the review cannot be deleted.
pub async fn reject(id: i64, confirmed: bool) -> Result<(), ReviewsError> {
    let id = ReviewId::new(id);
    if !confirmed {
        return Err(ReviewsError::NotConfirmed(id));
    }

    let moderator = Moderator::sign_in().await?;
    let result = moderator.reviews.reject(Some(&moderator.token), id).await;
    moderator.sign_out().await;

    result?;
    tracing::info!(id = %id, "Review deleted");
    Ok(())
}
