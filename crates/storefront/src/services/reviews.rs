//! Review workflow: public listing, submission, and moderation.
//!
//! Published reviews are cached for a minute (`moka`). Approving or
//! rejecting a review drops the cached list so the change shows up on the
//! next page view. A list read from the store while a review was being
//! approved or rejected is returned but not cached.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use moka::future::Cache;
use thiserror::Error;
use tracing::{debug, info, instrument};

use bloom_haven_core::review::{ModerationStats, ReviewSubmission};
use bloom_haven_core::{NewReview, Review, ReviewError, ReviewFilter, ReviewId, ReviewQuery};

use super::auth::AccessToken;
use super::store::{ReviewStore, StoreError};

const PUBLISHED_KEY: &str = "published";

/// Errors from the moderation actions.
#[derive(Debug, Error)]
pub enum ModerationError {
    /// No moderator session.
    #[error("not signed in")]
    NotSignedIn,

    /// The store refused or failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors from a public submission.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The submission failed validation.
    #[error(transparent)]
    Invalid(#[from] ReviewError),

    /// The store refused or failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// One page of the moderation queue.
#[derive(Debug, Clone)]
pub struct ModerationList {
    pub reviews: Vec<Review>,
    pub stats: ModerationStats,
    pub filter: ReviewFilter,
}

/// Front door to the review store.
#[derive(Clone)]
pub struct ReviewService {
    inner: Arc<ReviewServiceInner>,
}

struct ReviewServiceInner {
    store: Arc<dyn ReviewStore>,
    cache: Cache<&'static str, Arc<Vec<Review>>>,
    /// Bumped on every invalidation.
    generation: AtomicU64,
}

impl ReviewService {
    /// Wrap `store`.
    #[must_use]
    pub fn new(store: Arc<dyn ReviewStore>) -> Self {
        let cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(Duration::from_secs(60))
            .build();
        Self {
            inner: Arc::new(ReviewServiceInner {
                store,
                cache,
                generation: AtomicU64::new(0),
            }),
        }
    }

    /// Approved reviews for the public site, newest first.
    ///
    /// # Errors
    ///
    /// Returns error if the store cannot be read.
    #[instrument(skip(self))]
    pub async fn published(&self) -> Result<Arc<Vec<Review>>, StoreError> {
        if let Some(reviews) = self.inner.cache.get(PUBLISHED_KEY).await {
            debug!("Cache hit for published reviews");
            return Ok(reviews);
        }

        let generation = self.inner.generation.load(Ordering::Acquire);
        let reviews = Arc::new(
            self.inner
                .store
                .list(ReviewQuery::published(), None)
                .await?,
        );
        self.inner
            .cache
            .insert(PUBLISHED_KEY, Arc::clone(&reviews))
            .await;
        if self.inner.generation.load(Ordering::Acquire) != generation {
            debug!("Published reviews changed during load, not caching");
            self.inner.cache.invalidate(PUBLISHED_KEY).await;
        }
        Ok(reviews)
    }

    /// Validate and store a visitor's review. It stays hidden until approved.
    ///
    /// # Errors
    ///
    /// Returns error if validation fails or the store refuses the insert.
    #[instrument(skip(self, submission))]
    pub async fn submit(&self, submission: ReviewSubmission) -> Result<NewReview, SubmitError> {
        let review = NewReview::parse(submission)?;
        self.inner.store.insert(&review).await?;
        info!(event_type = %review.event_type(), rating = %review.rating(), "Review submitted");
        Ok(review)
    }

    /// All reviews with counts, narrowed to `filter` for display.
    ///
    /// # Errors
    ///
    /// Returns `NotSignedIn` without touching the store when `token` is
    /// `None`.
    #[instrument(skip(self, token))]
    pub async fn moderation_list(
        &self,
        token: Option<&AccessToken>,
        filter: ReviewFilter,
    ) -> Result<ModerationList, ModerationError> {
        let token = token.ok_or(ModerationError::NotSignedIn)?;
        let all = self
            .inner
            .store
            .list(ReviewQuery::moderation(ReviewFilter::All), Some(token))
            .await?;
        let stats = ModerationStats::of(&all);
        let reviews = all.into_iter().filter(|r| filter.matches(r)).collect();
        Ok(ModerationList {
            reviews,
            stats,
            filter,
        })
    }

    /// Publish a review. Approving an approved review is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `NotSignedIn` without touching the store when `token` is
    /// `None`.
    #[instrument(skip(self, token))]
    pub async fn approve(
        &self,
        token: Option<&AccessToken>,
        id: ReviewId,
    ) -> Result<Review, ModerationError> {
        let token = token.ok_or(ModerationError::NotSignedIn)?;
        let review = self.inner.store.approve(id, token).await?;
        self.invalidate_published().await;
        info!(%id, "Review approved");
        Ok(review)
    }

    /// Delete a review for good.
    ///
    /// # Errors
    ///
    /// Returns `NotSignedIn` without touching the store when `token` is
    /// `None`.
    #[instrument(skip(self, token))]
    pub async fn reject(
        &self,
        token: Option<&AccessToken>,
        id: ReviewId,
    ) -> Result<(), ModerationError> {
        let token = token.ok_or(ModerationError::NotSignedIn)?;
        self.inner.store.delete(id, token).await?;
        self.invalidate_published().await;
        info!(%id, "Review rejected");
        Ok(())
    }

    /// Drop the cached public list.
    pub async fn invalidate_published(&self) {
        self.inner.generation.fetch_add(1, Ordering::AcqRel);
        self.inner.cache.invalidate(PUBLISHED_KEY).await;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::services::auth::AuthProvider;
    use crate::services::memory::{MemoryAuth, MemoryReviewStore, TokenSet};
    use bloom_haven_core::Email;
    use secrecy::SecretString;
    use tokio::sync::Notify;

    fn submission(name: &str) -> ReviewSubmission {
        ReviewSubmission {
            name: name.to_string(),
            event_type: "Wedding".to_string(),
            rating: 5,
            review: "Stunning work".to_string(),
        }
    }

    async fn setup() -> (Arc<MemoryReviewStore>, ReviewService, AccessToken) {
        let tokens = TokenSet::default();
        let email = Email::parse("mod@bloomhaven.ng").unwrap();
        let auth = MemoryAuth::new(
            vec![(email.clone(), SecretString::from("pw"))],
            tokens.clone(),
        );
        let store = Arc::new(MemoryReviewStore::new(tokens));
        let service = ReviewService::new(store.clone());
        let token = auth
            .sign_in(&email, &SecretString::from("pw"))
            .await
            .unwrap();
        (store, service, token)
    }

    #[tokio::test]
    async fn test_signed_out_moderation_never_reaches_store() {
        let (store, service, _) = setup().await;

        assert!(matches!(
            service.moderation_list(None, ReviewFilter::All).await,
            Err(ModerationError::NotSignedIn)
        ));
        assert!(matches!(
            service.approve(None, ReviewId::new(1)).await,
            Err(ModerationError::NotSignedIn)
        ));
        assert!(matches!(
            service.reject(None, ReviewId::new(1)).await,
            Err(ModerationError::NotSignedIn)
        ));
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_invalid_submission_is_not_stored() {
        let (store, service, _) = setup().await;
        let mut bad = submission("Ada");
        bad.rating = 9;

        assert!(matches!(
            service.submit(bad).await,
            Err(SubmitError::Invalid(ReviewError::RatingOutOfRange(9)))
        ));
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_published_list_is_cached_until_approval() {
        let (store, service, token) = setup().await;
        service.submit(submission("Ada")).await.unwrap();

        assert!(service.published().await.unwrap().is_empty());
        assert!(service.published().await.unwrap().is_empty());
        // insert + one list
        assert_eq!(store.calls(), 2);

        service
            .approve(Some(&token), ReviewId::new(1))
            .await
            .unwrap();
        let published = service.published().await.unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].name, "Ada");
    }

    /// Store whose public listing waits for a signal after reading.
    struct GatedStore {
        inner: Arc<MemoryReviewStore>,
        reading: Arc<Notify>,
        release: Arc<Notify>,
    }

    #[async_trait::async_trait]
    impl ReviewStore for GatedStore {
        async fn list(
            &self,
            query: ReviewQuery,
            token: Option<&AccessToken>,
        ) -> Result<Vec<Review>, StoreError> {
            let reviews = self.inner.list(query, token).await?;
            if token.is_none() {
                self.reading.notify_one();
                self.release.notified().await;
            }
            Ok(reviews)
        }

        async fn insert(&self, review: &NewReview) -> Result<(), StoreError> {
            self.inner.insert(review).await
        }

        async fn approve(&self, id: ReviewId, token: &AccessToken) -> Result<Review, StoreError> {
            self.inner.approve(id, token).await
        }

        async fn delete(&self, id: ReviewId, token: &AccessToken) -> Result<(), StoreError> {
            self.inner.delete(id, token).await
        }
    }

    #[tokio::test]
    async fn test_approval_during_load_is_not_hidden_by_cache() {
        let (memory, _, token) = setup().await;
        let reading = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let service = ReviewService::new(Arc::new(GatedStore {
            inner: memory,
            reading: Arc::clone(&reading),
            release: Arc::clone(&release),
        }));
        service.submit(submission("Ada")).await.unwrap();

        let loading = tokio::spawn({
            let service = service.clone();
            async move { service.published().await.unwrap() }
        });
        reading.notified().await;
        service
            .approve(Some(&token), ReviewId::new(1))
            .await
            .unwrap();
        release.notify_one();
        assert!(loading.await.unwrap().is_empty());

        let next = tokio::spawn({
            let service = service.clone();
            async move { service.published().await.unwrap() }
        });
        reading.notified().await;
        release.notify_one();
        let published = next.await.unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].name, "Ada");
    }

    #[tokio::test]
    async fn test_moderation_list_counts_everything_and_filters() {
        let (_, service, token) = setup().await;
        service.submit(submission("Ada")).await.unwrap();
        service.submit(submission("Bola")).await.unwrap();
        service
            .approve(Some(&token), ReviewId::new(1))
            .await
            .unwrap();

        let list = service
            .moderation_list(Some(&token), ReviewFilter::Pending)
            .await
            .unwrap();
        assert_eq!(list.stats.total, 2);
        assert_eq!(list.stats.approved, 1);
        assert_eq!(list.stats.pending, 1);
        assert_eq!(list.reviews.len(), 1);
        assert_eq!(list.reviews[0].name, "Bola");
    }

    #[tokio::test]
    async fn test_reject_removes_review() {
        let (_, service, token) = setup().await;
        service.submit(submission("Ada")).await.unwrap();
        service
            .reject(Some(&token), ReviewId::new(1))
            .await
            .unwrap();

        let list = service
            .moderation_list(Some(&token), ReviewFilter::All)
            .await
            .unwrap();
        assert!(list.reviews.is_empty());
        assert!(matches!(
            service.reject(Some(&token), ReviewId::new(1)).await,
            Err(ModerationError::Store(StoreError::NotFound(_)))
        ));
    }
}
