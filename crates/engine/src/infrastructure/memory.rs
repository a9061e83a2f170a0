//! In-memory review store for development and testing
//!
//! Keeps profiles, reviews and likes behind a single `RwLock`, so every
//! mutation is atomic with respect to the uniqueness checks. Data is not
//! persisted.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use kindness_domain::{
    Like, Profile, Rating, Review, ReviewContent, ReviewId, ReviewView, UserId,
};
use tokio::sync::RwLock;

use crate::infrastructure::helpers::recheck_review_fields;
use crate::infrastructure::ports::{ClockPort, LikeRepo, ProfileRepo, RepoError, ReviewRepo};

#[derive(Default)]
struct MemoryState {
    profiles: HashMap<UserId, Profile>,
    /// Insertion order; the newest review is last
    reviews: Vec<Review>,
    likes: Vec<Like>,
}

impl MemoryState {
    fn like_count(&self, review_id: ReviewId) -> u32 {
        let count = self
            .likes
            .iter()
            .filter(|like| like.review_id == review_id)
            .count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }
}

pub struct InMemoryReviewStore {
    state: RwLock<MemoryState>,
    clock: Arc<dyn ClockPort>,
}

impl InMemoryReviewStore {
    pub fn new(clock: Arc<dyn ClockPort>) -> Self {
        Self {
            state: RwLock::new(MemoryState::default()),
            clock,
        }
    }

    /// Number of stored like rows for a `(user, review)` pair (tests only).
    #[cfg(test)]
    pub async fn like_rows(&self, user_id: UserId, review_id: ReviewId) -> usize {
        self.state
            .read()
            .await
            .likes
            .iter()
            .filter(|like| like.is_pair(user_id, review_id))
            .count()
    }

    /// Number of stored reviews (tests only).
    #[cfg(test)]
    pub async fn review_rows(&self) -> usize {
        self.state.read().await.reviews.len()
    }
}

#[async_trait]
impl ReviewRepo for InMemoryReviewStore {
    async fn list_reviews(&self, viewer: Option<UserId>) -> Result<Vec<ReviewView>, RepoError> {
        let state = self.state.read().await;

        // Newest insertion first, then a stable sort keeps that order on ties.
        let mut ordered: Vec<&Review> = state.reviews.iter().rev().collect();
        ordered.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(ordered
            .into_iter()
            .map(|review| ReviewView {
                review: review.clone(),
                author: state.profiles.get(&review.author_id).cloned(),
                like_count: state.like_count(review.id),
                liked_by_viewer: viewer.is_some_and(|viewer| {
                    state
                        .likes
                        .iter()
                        .any(|like| like.is_pair(viewer, review.id))
                }),
            })
            .collect())
    }

    async fn insert_review(
        &self,
        author_id: UserId,
        content: &ReviewContent,
        rating: Rating,
    ) -> Result<Review, RepoError> {
        recheck_review_fields(content, rating)?;

        let review = Review::new(author_id, content.clone(), rating, self.clock.now());
        self.state.write().await.reviews.push(review.clone());
        Ok(review)
    }

    async fn get_review(&self, id: ReviewId) -> Result<Option<Review>, RepoError> {
        let state = self.state.read().await;
        Ok(state.reviews.iter().find(|review| review.id == id).cloned())
    }
}

#[async_trait]
impl LikeRepo for InMemoryReviewStore {
    async fn find_like(
        &self,
        user_id: UserId,
        review_id: ReviewId,
    ) -> Result<Option<Like>, RepoError> {
        let state = self.state.read().await;
        Ok(state
            .likes
            .iter()
            .find(|like| like.is_pair(user_id, review_id))
            .cloned())
    }

    async fn insert_like(&self, user_id: UserId, review_id: ReviewId) -> Result<(), RepoError> {
        let mut state = self.state.write().await;

        if !state.reviews.iter().any(|review| review.id == review_id) {
            return Err(RepoError::not_found("Review", review_id));
        }
        if state.likes.iter().any(|like| like.is_pair(user_id, review_id)) {
            return Err(RepoError::conflict(
                "Like",
                format!("{}:{}", user_id, review_id),
            ));
        }

        let like = Like::new(user_id, review_id, self.clock.now());
        state.likes.push(like);
        Ok(())
    }

    async fn delete_like(&self, user_id: UserId, review_id: ReviewId) -> Result<(), RepoError> {
        self.state
            .write()
            .await
            .likes
            .retain(|like| !like.is_pair(user_id, review_id));
        Ok(())
    }

    async fn count_likes(&self, review_id: ReviewId) -> Result<u32, RepoError> {
        Ok(self.state.read().await.like_count(review_id))
    }
}

#[async_trait]
impl ProfileRepo for InMemoryReviewStore {
    async fn get(&self, id: UserId) -> Result<Option<Profile>, RepoError> {
        Ok(self.state.read().await.profiles.get(&id).cloned())
    }

    async fn save(&self, profile: &Profile) -> Result<(), RepoError> {
        self.state
            .write()
            .await
            .profiles
            .insert(profile.id, profile.clone());
        Ok(())
    }
}
