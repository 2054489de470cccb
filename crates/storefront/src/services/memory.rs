//! In-process collaborators.
//!
//! Used when no Supabase project is configured (local development) and by
//! tests. They honour the same contracts as the HTTP implementations:
//! reads are newest first, approval is idempotent, unknown ids are
//! `NotFound`, and a token must have been issued by [`MemoryAuth`] to be
//! accepted by a [`MemoryReviewStore`] sharing its token set.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use bloom_haven_core::inquiry::Inquiry;
use bloom_haven_core::review::Rating;
use bloom_haven_core::{Email, NewReview, Review, ReviewId, ReviewQuery};

use super::auth::{AccessToken, AuthError, AuthProvider};
use super::form_relay::{FormRelay, RelayError};
use super::store::{ReviewStore, StoreError};

/// Tokens issued by [`MemoryAuth`] and still valid.
pub type TokenSet = Arc<RwLock<HashSet<String>>>;

// =============================================================================
// Reviews
// =============================================================================

/// Review store kept in memory.
pub struct MemoryReviewStore {
    reviews: RwLock<Vec<Review>>,
    next_id: AtomicI64,
    calls: AtomicUsize,
    tokens: TokenSet,
}

impl MemoryReviewStore {
    /// Empty store accepting tokens from `tokens`.
    #[must_use]
    pub fn new(tokens: TokenSet) -> Self {
        Self::with_reviews(tokens, Vec::new())
    }

    /// Store pre-filled with `reviews`.
    #[must_use]
    pub fn with_reviews(tokens: TokenSet, reviews: Vec<Review>) -> Self {
        let next_id = reviews.iter().map(|r| r.id.as_i64()).max().unwrap_or(0) + 1;
        Self {
            reviews: RwLock::new(reviews),
            next_id: AtomicI64::new(next_id),
            calls: AtomicUsize::new(0),
            tokens,
        }
    }

    /// A few approved reviews so the local site has something to show.
    #[must_use]
    pub fn with_sample_reviews(tokens: TokenSet) -> Self {
        let now = Utc::now();
        let sample = |id: i64, name: &str, event_type: &str, text: &str, days: i64| Review {
            id: ReviewId::new(id),
            name: name.to_string(),
            event_type: event_type.to_string(),
            rating: Rating::FIVE_STARS,
            text: text.to_string(),
            approved: true,
            created_at: now - Duration::days(days),
        };
        Self::with_reviews(
            tokens,
            vec![
                sample(
                    1,
                    "Chioma",
                    "Birthday",
                    "The money bouquet was the highlight of the party!",
                    3,
                ),
                sample(
                    2,
                    "Tunde",
                    "Wedding",
                    "Beautiful decoration, everything was set up on time.",
                    10,
                ),
            ],
        )
    }

    /// Number of calls made to the store so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    async fn authorize(&self, token: &AccessToken) -> Result<(), StoreError> {
        if self.tokens.read().await.contains(token.expose()) {
            Ok(())
        } else {
            Err(StoreError::Unauthorized)
        }
    }
}

#[async_trait]
impl ReviewStore for MemoryReviewStore {
    async fn list(
        &self,
        query: ReviewQuery,
        token: Option<&AccessToken>,
    ) -> Result<Vec<Review>, StoreError> {
        self.record_call();
        // Anonymous readers only ever see approved reviews.
        let anonymous = match token {
            Some(token) => {
                self.authorize(token).await?;
                false
            }
            None => true,
        };

        let mut reviews: Vec<Review> = self
            .reviews
            .read()
            .await
            .iter()
            .filter(|r| query.filter.matches(r) && (!anonymous || r.approved))
            .cloned()
            .collect();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        if let Some(limit) = query.limit {
            reviews.truncate(limit);
        }
        Ok(reviews)
    }

    async fn insert(&self, review: &NewReview) -> Result<(), StoreError> {
        self.record_call();
        let id = ReviewId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let stored = review.clone().into_review(id, Utc::now());
        self.reviews.write().await.push(stored);
        Ok(())
    }

    async fn approve(&self, id: ReviewId, token: &AccessToken) -> Result<Review, StoreError> {
        self.record_call();
        self.authorize(token).await?;
        let mut reviews = self.reviews.write().await;
        let review = reviews
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound(id))?;
        *review = review.clone().approve();
        Ok(review.clone())
    }

    async fn delete(&self, id: ReviewId, token: &AccessToken) -> Result<(), StoreError> {
        self.record_call();
        self.authorize(token).await?;
        let mut reviews = self.reviews.write().await;
        let before = reviews.len();
        reviews.retain(|r| r.id != id);
        if reviews.len() == before {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}

// =============================================================================
// Auth
// =============================================================================

/// Identity service with a fixed set of accounts.
pub struct MemoryAuth {
    accounts: Vec<(Email, SecretString)>,
    tokens: TokenSet,
}

impl MemoryAuth {
    /// Accounts that may sign in. Issued tokens are added to `tokens`.
    #[must_use]
    pub const fn new(accounts: Vec<(Email, SecretString)>, tokens: TokenSet) -> Self {
        Self { accounts, tokens }
    }
}

#[async_trait]
impl AuthProvider for MemoryAuth {
    async fn sign_in(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<AccessToken, AuthError> {
        let known = self
            .accounts
            .iter()
            .any(|(e, p)| e == email && p.expose_secret() == password.expose_secret());
        if !known {
            return Err(AuthError::InvalidCredentials);
        }

        let token = Uuid::new_v4().to_string();
        self.tokens.write().await.insert(token.clone());
        Ok(AccessToken::new(token))
    }

    async fn sign_out(&self, token: &AccessToken) -> Result<(), AuthError> {
        self.tokens.write().await.remove(token.expose());
        Ok(())
    }
}

// =============================================================================
// Form relay
// =============================================================================

/// Relay that keeps inquiries instead of sending them.
#[derive(Default)]
pub struct MemoryRelay {
    sent: Mutex<Vec<Inquiry>>,
}

impl MemoryRelay {
    /// Inquiries received so far.
    pub async fn sent(&self) -> Vec<Inquiry> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl FormRelay for MemoryRelay {
    async fn submit(&self, inquiry: &Inquiry) -> Result<(), RelayError> {
        self.sent.lock().await.push(inquiry.clone());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use bloom_haven_core::ReviewFilter;
    use bloom_haven_core::review::ReviewSubmission;

    fn new_review(name: &str) -> NewReview {
        NewReview::parse(ReviewSubmission {
            name: name.to_string(),
            event_type: "Birthday".to_string(),
            rating: 4,
            review: "Nice".to_string(),
        })
        .unwrap()
    }

    async fn signed_in() -> (MemoryAuth, MemoryReviewStore, AccessToken) {
        let tokens = TokenSet::default();
        let email = Email::parse("mod@bloomhaven.ng").unwrap();
        let auth = MemoryAuth::new(
            vec![(email.clone(), SecretString::from("pw"))],
            tokens.clone(),
        );
        let store = MemoryReviewStore::new(tokens);
        let token = auth
            .sign_in(&email, &SecretString::from("pw"))
            .await
            .unwrap();
        (auth, store, token)
    }

    #[tokio::test]
    async fn test_inserted_reviews_are_pending_and_hidden() {
        let (_, store, token) = signed_in().await;
        store.insert(&new_review("Ada")).await.unwrap();

        let public = store.list(ReviewQuery::published(), None).await.unwrap();
        assert!(public.is_empty());

        let pending = store
            .list(ReviewQuery::moderation(ReviewFilter::Pending), Some(&token))
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);
        assert!(!pending[0].approved);
    }

    #[tokio::test]
    async fn test_approve_is_idempotent_and_delete_removes() {
        let (_, store, token) = signed_in().await;
        store.insert(&new_review("Ada")).await.unwrap();
        let id = ReviewId::new(1);

        let first = store.approve(id, &token).await.unwrap();
        let second = store.approve(id, &token).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(
            store.list(ReviewQuery::published(), None).await.unwrap().len(),
            1
        );

        store.delete(id, &token).await.unwrap();
        assert!(matches!(
            store.delete(id, &token).await.unwrap_err(),
            StoreError::NotFound(_)
        ));
        let all = store
            .list(ReviewQuery::moderation(ReviewFilter::All), Some(&token))
            .await
            .unwrap();
        assert!(all.iter().all(|r| r.id != id));
    }

    #[tokio::test]
    async fn test_unknown_or_revoked_token_is_rejected() {
        let (auth, store, token) = signed_in().await;
        store.insert(&new_review("Ada")).await.unwrap();

        let stranger = AccessToken::new("forged".to_string());
        assert!(matches!(
            store.approve(ReviewId::new(1), &stranger).await.unwrap_err(),
            StoreError::Unauthorized
        ));

        auth.sign_out(&token).await.unwrap();
        assert!(matches!(
            store.approve(ReviewId::new(1), &token).await.unwrap_err(),
            StoreError::Unauthorized
        ));
    }

    #[tokio::test]
    async fn test_wrong_password_is_invalid_credentials() {
        let (auth, _, _) = signed_in().await;
        let err = auth
            .sign_in(
                &Email::parse("mod@bloomhaven.ng").unwrap(),
                &SecretString::from("nope"),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_published_list_is_newest_first_and_limited() {
        let tokens = TokenSet::default();
        let store = MemoryReviewStore::with_sample_reviews(tokens);
        let reviews = store.list(ReviewQuery::published(), None).await.unwrap();
        assert_eq!(reviews.len(), 2);
        assert!(reviews[0].created_at > reviews[1].created_at);
        assert_eq!(store.calls(), 1);
    }
}
