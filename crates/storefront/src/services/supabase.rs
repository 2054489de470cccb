//! Supabase client: reviews over PostgREST, moderator sign-in over GoTrue.
//!
//! # Endpoints
//!
//! ```text
//! GET    /rest/v1/reviews?select=*&order=created_at.desc[&approved=eq.X][&limit=N]
//! POST   /rest/v1/reviews                  Prefer: return=minimal
//! PATCH  /rest/v1/reviews?id=eq.{id}       Prefer: return=representation
//! DELETE /rest/v1/reviews?id=eq.{id}       Prefer: return=representation
//! POST   /auth/v1/token?grant_type=password
//! POST   /auth/v1/logout
//! ```
//!
//! Every request carries the anon key as `apikey`. The bearer token is the
//! moderator's access token when there is one, the anon key otherwise. Row
//! level security on the `reviews` table decides what each caller may see.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, InvalidHeaderValue};
use reqwest::{Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument, warn};
use url::Url;

use bloom_haven_core::{Email, NewReview, Review, ReviewId, ReviewQuery};

use crate::config::SupabaseConfig;

use super::auth::{AccessToken, AuthError, AuthProvider};
use super::store::{ReviewStore, StoreError};

/// Errors building the client from configuration.
#[derive(Debug, Error)]
pub enum SupabaseSetupError {
    #[error("invalid anon key: {0}")]
    InvalidKey(#[from] InvalidHeaderValue),
    #[error("invalid project URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

// =============================================================================
// SupabaseClient
// =============================================================================

/// Client for one Supabase project.
#[derive(Clone)]
pub struct SupabaseClient {
    inner: Arc<SupabaseClientInner>,
}

struct SupabaseClientInner {
    client: reqwest::Client,
    reviews_url: Url,
    token_url: Url,
    logout_url: Url,
    anon_key: SecretString,
}

impl SupabaseClient {
    /// Create a client for the configured project.
    ///
    /// # Errors
    ///
    /// Returns an error if the anon key is not a valid header value or the
    /// HTTP client fails to build.
    pub fn new(config: &SupabaseConfig) -> Result<Self, SupabaseSetupError> {
        let mut headers = HeaderMap::new();
        let mut apikey = HeaderValue::from_str(config.anon_key())?;
        apikey.set_sensitive(true);
        headers.insert("apikey", apikey);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        let mut token_url = config.url.join("auth/v1/token")?;
        token_url
            .query_pairs_mut()
            .append_pair("grant_type", "password");

        Ok(Self {
            inner: Arc::new(SupabaseClientInner {
                client,
                reviews_url: config.url.join("rest/v1/reviews")?,
                token_url,
                logout_url: config.url.join("auth/v1/logout")?,
                anon_key: config.anon_key.clone(),
            }),
        })
    }

    fn bearer<'a>(&'a self, token: Option<&'a AccessToken>) -> &'a str {
        token.map_or_else(|| self.inner.anon_key.expose_secret(), AccessToken::expose)
    }

    /// `reviews` URL filtered to one row.
    fn review_url(&self, id: ReviewId) -> Url {
        let mut url = self.inner.reviews_url.clone();
        url.query_pairs_mut()
            .append_pair("id", &format!("eq.{id}"));
        url
    }

    /// Rows returned by a `return=representation` mutation on one id.
    async fn single_row(response: Response, id: ReviewId) -> Result<Review, StoreError> {
        let rows: Vec<Review> = check(response)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))?;
        rows.into_iter().next().ok_or(StoreError::NotFound(id))
    }
}

/// One `reviews` row, or `None` (logged) when it does not hold a valid review.
///
/// A bad row is skipped so the rest of the list still loads; it can be
/// removed by id from the command line.
fn parse_row(row: serde_json::Value) -> Option<Review> {
    let id = row.get("id").cloned();
    match serde_json::from_value(row) {
        Ok(review) => Some(review),
        Err(e) => {
            warn!(id = ?id, error = %e, "Skipping malformed review row");
            None
        }
    }
}

/// Map a non-success response to a [`StoreError`].
async fn check(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
        return Err(StoreError::Unauthorized);
    }
    let message = response.text().await.unwrap_or_default();
    Err(StoreError::Api {
        status: status.as_u16(),
        message,
    })
}

// =============================================================================
// Reviews
// =============================================================================

#[async_trait]
impl ReviewStore for SupabaseClient {
    #[instrument(skip(self, token), fields(filter = %query.filter))]
    async fn list(
        &self,
        query: ReviewQuery,
        token: Option<&AccessToken>,
    ) -> Result<Vec<Review>, StoreError> {
        let mut url = self.inner.reviews_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("select", "*")
                .append_pair("order", "created_at.desc");
            if let Some(approved) = query.filter.approved() {
                pairs.append_pair("approved", &format!("eq.{approved}"));
            }
            if let Some(limit) = query.limit {
                pairs.append_pair("limit", &limit.to_string());
            }
        }

        let response = self
            .inner
            .client
            .get(url)
            .bearer_auth(self.bearer(token))
            .send()
            .await?;

        let rows: Vec<serde_json::Value> = check(response)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))?;
        let reviews: Vec<Review> = rows.into_iter().filter_map(parse_row).collect();
        debug!(count = reviews.len(), "Fetched reviews");
        Ok(reviews)
    }

    #[instrument(skip(self, review), fields(event_type = %review.event_type()))]
    async fn insert(&self, review: &NewReview) -> Result<(), StoreError> {
        let response = self
            .inner
            .client
            .post(self.inner.reviews_url.clone())
            .bearer_auth(self.bearer(None))
            .header("Prefer", "return=minimal")
            .json(review)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    #[instrument(skip(self, token), fields(review_id = %id))]
    async fn approve(&self, id: ReviewId, token: &AccessToken) -> Result<Review, StoreError> {
        let response = self
            .inner
            .client
            .patch(self.review_url(id))
            .bearer_auth(token.expose())
            .header("Prefer", "return=representation")
            .json(&serde_json::json!({ "approved": true }))
            .send()
            .await?;
        Self::single_row(response, id).await
    }

    #[instrument(skip(self, token), fields(review_id = %id))]
    async fn delete(&self, id: ReviewId, token: &AccessToken) -> Result<(), StoreError> {
        let response = self
            .inner
            .client
            .delete(self.review_url(id))
            .bearer_auth(token.expose())
            .header("Prefer", "return=representation")
            .send()
            .await?;
        Self::single_row(response, id).await.map(|_| ())
    }
}

// =============================================================================
// Auth
// =============================================================================

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[async_trait]
impl AuthProvider for SupabaseClient {
    #[instrument(skip(self, password), fields(email = %email))]
    async fn sign_in(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<AccessToken, AuthError> {
        let response = self
            .inner
            .client
            .post(self.inner.token_url.clone())
            .json(&serde_json::json!({
                "email": email.as_str(),
                "password": password.expose_secret(),
            }))
            .send()
            .await?;

        let status = response.status();
        if matches!(status, StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED) {
            return Err(AuthError::InvalidCredentials);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AuthError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let token: TokenResponse = response.json().await?;
        Ok(AccessToken::new(token.access_token))
    }

    #[instrument(skip(self, token))]
    async fn sign_out(&self, token: &AccessToken) -> Result<(), AuthError> {
        let response = self
            .inner
            .client
            .post(self.inner.logout_url.clone())
            .bearer_auth(token.expose())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AuthError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }
}
