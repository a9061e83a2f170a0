//! Toggle like use case.

use std::sync::Arc;

use kindness_domain::{LikeToggle, ReviewId, UserId};

use crate::infrastructure::ports::{LikeRepo, RepoError};
use crate::stores::ReviewListStore;

use super::error::EngagementError;

/// Toggle like use case.
///
/// Flips the caller's like on a review and reports the resulting state with
/// the count read back from the store. A concurrent toggle by the same caller
/// that wins the insert race is treated as this call having liked.
pub struct ToggleLike {
    likes: Arc<dyn LikeRepo>,
    review_list: Arc<ReviewListStore>,
}

impl ToggleLike {
    pub fn new(likes: Arc<dyn LikeRepo>, review_list: Arc<ReviewListStore>) -> Self {
        Self { likes, review_list }
    }

    pub async fn execute(
        &self,
        caller: Option<UserId>,
        review_id: ReviewId,
    ) -> Result<LikeToggle, EngagementError> {
        let user_id = caller.ok_or(EngagementError::AuthRequired)?;

        let result = self.toggle(user_id, review_id).await;
        if let Err(e) = &result {
            if e.is_backend_unavailable() {
                tracing::warn!(
                    error = %e,
                    user_id = %user_id,
                    review_id = %review_id,
                    "Like toggle failed"
                );
            }
        }
        result
    }

    async fn toggle(
        &self,
        user_id: UserId,
        review_id: ReviewId,
    ) -> Result<LikeToggle, EngagementError> {
        let liked = match self.likes.find_like(user_id, review_id).await? {
            Some(_) => {
                self.likes.delete_like(user_id, review_id).await?;
                false
            }
            None => match self.likes.insert_like(user_id, review_id).await {
                Ok(()) => true,
                Err(RepoError::Conflict { .. }) => {
                    tracing::debug!(
                        user_id = %user_id,
                        review_id = %review_id,
                        "Like already present; reconciling to liked"
                    );
                    true
                }
                Err(RepoError::NotFound { .. }) => {
                    return Err(EngagementError::ReviewNotFound(review_id));
                }
                Err(e) => return Err(e.into()),
            },
        };

        self.review_list.invalidate().await;

        let total_likes = self.likes.count_likes(review_id).await?;

        tracing::info!(
            user_id = %user_id,
            review_id = %review_id,
            liked,
            total_likes,
            "Like toggled"
        );
        Ok(LikeToggle { liked, total_likes })
    }
}
