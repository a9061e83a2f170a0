//! Repository port traits for review storage.

use async_trait::async_trait;
use kindness_domain::{Like, Profile, Rating, Review, ReviewContent, ReviewId, ReviewView, UserId};

use super::error::RepoError;

// =============================================================================
// Reviews
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepo: Send + Sync {
    /// All reviews, newest first, joined with author profile and the like set
    /// as seen by `viewer`. A snapshot; not linearized with concurrent writers.
    async fn list_reviews(&self, viewer: Option<UserId>) -> Result<Vec<ReviewView>, RepoError>;

    /// Store a new review. The store assigns the id and `created_at` and
    /// re-checks content and rating before writing.
    async fn insert_review(
        &self,
        author_id: UserId,
        content: &ReviewContent,
        rating: Rating,
    ) -> Result<Review, RepoError>;

    async fn get_review(&self, id: ReviewId) -> Result<Option<Review>, RepoError>;
}

// =============================================================================
// Likes
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LikeRepo: Send + Sync {
    async fn find_like(
        &self,
        user_id: UserId,
        review_id: ReviewId,
    ) -> Result<Option<Like>, RepoError>;

    /// Fails with `RepoError::Conflict` if the pair already exists and
    /// `RepoError::NotFound` if the review does not.
    async fn insert_like(&self, user_id: UserId, review_id: ReviewId) -> Result<(), RepoError>;

    /// Idempotent: succeeds when no row exists.
    async fn delete_like(&self, user_id: UserId, review_id: ReviewId) -> Result<(), RepoError>;

    /// Authoritative like count for a review.
    async fn count_likes(&self, review_id: ReviewId) -> Result<u32, RepoError>;
}

// =============================================================================
// Profiles
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepo: Send + Sync {
    async fn get(&self, id: UserId) -> Result<Option<Profile>, RepoError>;

    /// Upsert, used when accounts are provisioned.
    async fn save(&self, profile: &Profile) -> Result<(), RepoError>;
}
