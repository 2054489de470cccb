//! Review persistence seam.

use async_trait::async_trait;
use thiserror::Error;

use bloom_haven_core::{NewReview, Review, ReviewId, ReviewQuery};

use super::auth::AccessToken;

/// Errors that can occur when reading or writing reviews.
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Store returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Token missing, expired or lacking permission.
    #[error("not authorized")]
    Unauthorized,

    /// No review with this id.
    #[error("review {0} not found")]
    NotFound(ReviewId),

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Where reviews live.
///
/// Reads without a token see what the public may see; moderator reads and
/// all mutations of existing reviews carry the moderator's token.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Reviews matching `query`, newest first.
    async fn list(
        &self,
        query: ReviewQuery,
        token: Option<&AccessToken>,
    ) -> Result<Vec<Review>, StoreError>;

    /// Store a new, unapproved review.
    async fn insert(&self, review: &NewReview) -> Result<(), StoreError>;

    /// Mark a review approved and return it.
    async fn approve(&self, id: ReviewId, token: &AccessToken) -> Result<Review, StoreError>;

    /// Permanently delete a review.
    async fn delete(&self, id: ReviewId, token: &AccessToken) -> Result<(), StoreError>;
}
