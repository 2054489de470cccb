//! Client reviews and their moderation states.
//!
//! A review enters the system through a public submission and is always
//! stored pending. A moderator either approves it (it becomes public) or
//! deletes it. There is no way back from approved to pending.
//!
//! ```text
//! submit ──► Pending ──approve──► Approved ──approve──► Approved
//!               │                     │
//!               └──────reject─────────┴──► (deleted)
//! ```

use core::fmt;
use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::types::ReviewId;

/// Event types a reviewer can pick from.
pub const EVENT_TYPES: [&str; 7] = [
    "Wedding",
    "Birthday",
    "Anniversary",
    "Corporate Event",
    "Baby Shower",
    "Engagement",
    "Other Celebration",
];

/// Longest accepted reviewer name, in characters.
pub const MAX_NAME_CHARS: usize = 100;
/// Longest accepted review text, in characters.
pub const MAX_TEXT_CHARS: usize = 2_000;
/// Number of approved reviews shown publicly.
pub const PUBLISHED_LIMIT: usize = 10;

/// Reasons a review submission is refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReviewError {
    #[error("please tell us your name")]
    NameRequired,
    #[error("name must be at most {max} characters")]
    NameTooLong { max: usize },
    #[error("unknown event type: {0}")]
    UnknownEventType(String),
    #[error("rating must be between 1 and 5 (got {0})")]
    RatingOutOfRange(i64),
    #[error("please write a few words about your experience")]
    TextRequired,
    #[error("review must be at most {max} characters")]
    TextTooLong { max: usize },
}

/// A star rating from 1 to 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Rating(u8);

impl Rating {
    pub const MAX: u8 = 5;
    pub const FIVE_STARS: Self = Self(Self::MAX);

    /// Number of stars.
    #[must_use]
    pub const fn stars(self) -> u8 {
        self.0
    }

    /// Stars left unfilled when drawing five.
    #[must_use]
    pub const fn missing(self) -> u8 {
        Self::MAX - self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = ReviewError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .filter(|v| (1..=Self::MAX).contains(v))
            .map(Self)
            .ok_or(ReviewError::RatingOutOfRange(value))
    }
}

impl From<Rating> for i64 {
    fn from(rating: Rating) -> Self {
        Self::from(rating.0)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/5", self.0)
    }
}

/// Whether a stored review is visible to the public.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    Pending,
    Approved,
}

/// A stored review.
///
/// Field names on the wire follow the `reviews` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub name: String,
    pub event_type: String,
    pub rating: Rating,
    #[serde(rename = "review")]
    pub text: String,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
}

impl Review {
    /// Current moderation state.
    #[must_use]
    pub const fn status(&self) -> ReviewStatus {
        if self.approved {
            ReviewStatus::Approved
        } else {
            ReviewStatus::Pending
        }
    }

    /// The review after moderator approval. Approving twice is a no-op.
    #[must_use]
    pub fn approve(self) -> Self {
        Self {
            approved: true,
            ..self
        }
    }
}

/// Raw submission as posted by the review form.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewSubmission {
    pub name: String,
    #[serde(alias = "eventType")]
    pub event_type: String,
    pub rating: i64,
    #[serde(alias = "text")]
    pub review: String,
}

/// A validated review waiting to be stored.
///
/// Serializes as a `reviews` row with `approved = false`; a new review can
/// never be created approved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    name: String,
    event_type: String,
    rating: Rating,
    text: String,
}

impl NewReview {
    /// Validate a submission.
    ///
    /// Name and text are trimmed. The event type must be one of
    /// [`EVENT_TYPES`] (matched case-insensitively).
    ///
    /// # Errors
    ///
    /// Returns the first [`ReviewError`] found.
    pub fn parse(submission: ReviewSubmission) -> Result<Self, ReviewError> {
        let name = submission.name.trim();
        if name.is_empty() {
            return Err(ReviewError::NameRequired);
        }
        if name.chars().count() > MAX_NAME_CHARS {
            return Err(ReviewError::NameTooLong {
                max: MAX_NAME_CHARS,
            });
        }

        let event_type = EVENT_TYPES
            .iter()
            .find(|e| e.eq_ignore_ascii_case(submission.event_type.trim()))
            .ok_or_else(|| ReviewError::UnknownEventType(submission.event_type.clone()))?;

        let rating = Rating::try_from(submission.rating)?;

        let text = submission.review.trim();
        if text.is_empty() {
            return Err(ReviewError::TextRequired);
        }
        if text.chars().count() > MAX_TEXT_CHARS {
            return Err(ReviewError::TextTooLong {
                max: MAX_TEXT_CHARS,
            });
        }

        Ok(Self {
            name: name.to_string(),
            event_type: (*event_type).to_string(),
            rating,
            text: text.to_string(),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    #[must_use]
    pub const fn rating(&self) -> Rating {
        self.rating
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The stored form of this review, pending approval.
    #[must_use]
    pub fn into_review(self, id: ReviewId, created_at: DateTime<Utc>) -> Review {
        Review {
            id,
            name: self.name,
            event_type: self.event_type,
            rating: self.rating,
            text: self.text,
            approved: false,
            created_at,
        }
    }
}

impl Serialize for NewReview {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut row = serializer.serialize_struct("NewReview", 5)?;
        row.serialize_field("name", &self.name)?;
        row.serialize_field("event_type", &self.event_type)?;
        row.serialize_field("rating", &self.rating)?;
        row.serialize_field("review", &self.text)?;
        row.serialize_field("approved", &false)?;
        row.end()
    }
}

/// Which reviews the moderation panel lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewFilter {
    All,
    #[default]
    Pending,
    Approved,
}

impl ReviewFilter {
    pub const ALL: [Self; 3] = [Self::Pending, Self::Approved, Self::All];

    /// Required value of `approved`, if any.
    #[must_use]
    pub const fn approved(self) -> Option<bool> {
        match self {
            Self::All => None,
            Self::Pending => Some(false),
            Self::Approved => Some(true),
        }
    }

    /// Whether `review` passes the filter.
    #[must_use]
    pub fn matches(self, review: &Review) -> bool {
        self.approved().is_none_or(|a| a == review.approved)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Pending => "pending",
            Self::Approved => "approved",
        }
    }
}

impl fmt::Display for ReviewFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            other => Err(format!("invalid review filter: {other}")),
        }
    }
}

/// A read of the `reviews` collection. Results are always newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReviewQuery {
    pub filter: ReviewFilter,
    pub limit: Option<usize>,
}

impl ReviewQuery {
    /// The approved reviews shown on the public site.
    #[must_use]
    pub const fn published() -> Self {
        Self {
            filter: ReviewFilter::Approved,
            limit: Some(PUBLISHED_LIMIT),
        }
    }

    /// Everything matching `filter`, for moderators.
    #[must_use]
    pub const fn moderation(filter: ReviewFilter) -> Self {
        Self {
            filter,
            limit: None,
        }
    }
}

/// Counts shown above the moderation list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ModerationStats {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
}

impl ModerationStats {
    /// Count a batch of reviews.
    #[must_use]
    pub fn of(reviews: &[Review]) -> Self {
        let approved = reviews.iter().filter(|r| r.approved).count();
        Self {
            total: reviews.len(),
            pending: reviews.len() - approved,
            approved,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn submission() -> ReviewSubmission {
        ReviewSubmission {
            name: "  Ada  ".to_string(),
            event_type: "birthday".to_string(),
            rating: 5,
            review: " Lovely bouquet! ".to_string(),
        }
    }

    fn stored(id: i64, approved: bool) -> Review {
        let mut review = NewReview::parse(submission())
            .unwrap()
            .into_review(ReviewId::new(id), Utc::now());
        review.approved = approved;
        review
    }

    #[test]
    fn test_parse_trims_and_normalizes() {
        let review = NewReview::parse(submission()).unwrap();
        assert_eq!(review.name(), "Ada");
        assert_eq!(review.event_type(), "Birthday");
        assert_eq!(review.text(), "Lovely bouquet!");
        assert_eq!(review.rating().stars(), 5);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        let mut s = submission();
        s.rating = 0;
        assert_eq!(
            NewReview::parse(s).unwrap_err(),
            ReviewError::RatingOutOfRange(0)
        );

        let mut s = submission();
        s.rating = 6;
        assert!(NewReview::parse(s).is_err());

        let mut s = submission();
        s.name = "   ".to_string();
        assert_eq!(NewReview::parse(s).unwrap_err(), ReviewError::NameRequired);

        let mut s = submission();
        s.review = String::new();
        assert_eq!(NewReview::parse(s).unwrap_err(), ReviewError::TextRequired);

        let mut s = submission();
        s.event_type = "Funeral".to_string();
        assert!(matches!(
            NewReview::parse(s).unwrap_err(),
            ReviewError::UnknownEventType(_)
        ));

        let mut s = submission();
        s.review = "x".repeat(MAX_TEXT_CHARS + 1);
        assert!(matches!(
            NewReview::parse(s).unwrap_err(),
            ReviewError::TextTooLong { .. }
        ));
    }

    #[test]
    fn test_new_review_serializes_unapproved() {
        let row = serde_json::to_value(NewReview::parse(submission()).unwrap()).unwrap();
        assert_eq!(row["approved"], serde_json::Value::Bool(false));
        assert_eq!(row["review"], "Lovely bouquet!");
        assert_eq!(row["event_type"], "Birthday");
        assert_eq!(row["rating"], 5);
    }

    #[test]
    fn test_into_review_starts_pending() {
        let review = stored(1, false);
        assert_eq!(review.status(), ReviewStatus::Pending);
    }

    #[test]
    fn test_approve_is_idempotent() {
        let once = stored(1, false).approve();
        let twice = once.clone().approve();
        assert_eq!(once, twice);
        assert_eq!(twice.status(), ReviewStatus::Approved);
    }

    #[test]
    fn test_review_row_deserializes() {
        let review: Review = serde_json::from_str(
            r#"{"id": 3, "name": "Tobi", "event_type": "Wedding", "rating": 4,
                "review": "Beautiful", "approved": true,
                "created_at": "2025-01-02T10:00:00.123456+00:00"}"#,
        )
        .unwrap();
        assert_eq!(review.id, ReviewId::new(3));
        assert_eq!(review.text, "Beautiful");
        assert_eq!(review.rating.missing(), 1);

        let bad: Result<Review, _> = serde_json::from_str(
            r#"{"id": 3, "name": "x", "event_type": "Wedding", "rating": 9,
                "review": "x", "approved": true, "created_at": "2025-01-02T10:00:00Z"}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn test_filter_and_stats() {
        let reviews = vec![stored(1, false), stored(2, true), stored(3, true)];
        let pending: Vec<_> = reviews
            .iter()
            .filter(|r| ReviewFilter::Pending.matches(r))
            .collect();
        assert_eq!(pending.len(), 1);
        assert!(reviews.iter().all(|r| ReviewFilter::All.matches(r)));

        let stats = ModerationStats::of(&reviews);
        assert_eq!(
            stats,
            ModerationStats {
                total: 3,
                pending: 1,
                approved: 2
            }
        );
        assert_eq!("Approved".parse::<ReviewFilter>().unwrap(), ReviewFilter::Approved);
    }
}
