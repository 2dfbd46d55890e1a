// src/models/review.rs
use crate::models::target::{ContentId, ContentTypeId, TargetRef};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who wrote a review. A review belongs to exactly one of the two.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", content = "key", rename_all = "snake_case")]
pub enum ReviewerIdentity {
    User(i64),       // Authenticated account id
    Session(String), // Anonymous session key
}

impl ReviewerIdentity {
    pub fn user_id(&self) -> Option<i64> {
        match self {
            ReviewerIdentity::User(id) => Some(*id),
            ReviewerIdentity::Session(_) => None,
        }
    }

    pub fn session_key(&self) -> Option<&str> {
        match self {
            ReviewerIdentity::User(_) => None,
            ReviewerIdentity::Session(key) => Some(key.as_str()),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Review {
    pub id: i64,
    pub target: TargetRef,              // Object the review is about
    pub reviewer: ReviewerIdentity,     // Account or anonymous session that submitted it
    pub user_name: String,
    pub user_email: String,
    pub comment: String,
    pub score: f64,
    pub active: bool,                   // Only active reviews are listed and averaged
    pub ip_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A validated review that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub target: TargetRef,
    pub reviewer: ReviewerIdentity,
    pub user_name: String,
    pub user_email: String,
    pub comment: String,
    pub score: f64,
    pub ip_address: Option<String>,
}

/// Mean score and number of active reviews for one target.
/// `average` is `None` when there are no active reviews.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ReviewAverage {
    pub average: Option<f64>,
    pub count: i64,
}

/// Data behind the embeddable "reviews for this object" unit.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ReviewsForInstance {
    pub reviews: Vec<Review>,
    pub has_rated: bool,
    pub content_type_id: ContentTypeId,
    pub content_id: ContentId,
    pub average: ReviewAverage,
}

/// What the public JSON endpoint exposes about a review. Reviewer identity,
/// e-mail and IP address stay on the server.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PublicReview {
    pub id: i64,
    pub target: TargetRef,
    pub user_name: String,
    pub comment: String,
    pub score: f64,
    pub created_at: DateTime<Utc>,
}

impl From<&Review> for PublicReview {
    fn from(review: &Review) -> Self {
        Self {
            id: review.id,
            target: review.target,
            user_name: review.user_name.clone(),
            comment: review.comment.clone(),
            score: review.score,
            created_at: review.created_at,
        }
    }
}

/// `ReviewsForInstance` reduced to `PublicReview`s.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PublicReviews {
    pub reviews: Vec<PublicReview>,
    pub has_rated: bool,
    pub content_type_id: ContentTypeId,
    pub content_id: ContentId,
    pub average: ReviewAverage,
}

impl From<&ReviewsForInstance> for PublicReviews {
    fn from(unit: &ReviewsForInstance) -> Self {
        Self {
            reviews: unit.reviews.iter().map(PublicReview::from).collect(),
            has_rated: unit.has_rated,
            content_type_id: unit.content_type_id,
            content_id: unit.content_id,
            average: unit.average,
        }
    }
}
