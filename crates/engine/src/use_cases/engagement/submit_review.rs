//! Submit review use case.

use std::sync::Arc;

use kindness_domain::{Review, ReviewDraft, UserId};

use crate::infrastructure::ports::ReviewRepo;
use crate::stores::ReviewListStore;

use super::error::EngagementError;

/// Submit review use case.
///
/// Orchestrates: caller check, draft validation, storage, review list
/// invalidation.
pub struct SubmitReview {
    reviews: Arc<dyn ReviewRepo>,
    review_list: Arc<ReviewListStore>,
}

impl SubmitReview {
    pub fn new(reviews: Arc<dyn ReviewRepo>, review_list: Arc<ReviewListStore>) -> Self {
        Self {
            reviews,
            review_list,
        }
    }

    /// Execute the submit review use case.
    ///
    /// # Arguments
    /// * `caller` - Signed-in reader, `None` when anonymous
    /// * `draft` - Review text and star rating as entered
    ///
    /// # Returns
    /// * `Ok(Review)` - The stored review
    /// * `Err(EngagementError)` - Nothing was stored
    pub async fn execute(
        &self,
        caller: Option<UserId>,
        draft: ReviewDraft,
    ) -> Result<Review, EngagementError> {
        let author_id = caller.ok_or(EngagementError::AuthRequired)?;
        let (content, rating) = draft.validate()?;

        let review = self
            .reviews
            .insert_review(author_id, &content, rating)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, user_id = %author_id, "Failed to store review");
                EngagementError::from(e)
            })?;

        self.review_list.invalidate().await;

        tracing::info!(
            review_id = %review.id,
            user_id = %author_id,
            rating = rating.value(),
            "Review submitted"
        );
        Ok(review)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockReviewRepo, RepoError};
    use chrono::{TimeZone, Utc};
    use kindness_domain::{Rating, ReviewContent};
    use mockall::predicate::*;
    use std::time::Duration;

    fn review_list() -> Arc<ReviewListStore> {
        Arc::new(ReviewListStore::new(Duration::from_secs(60)))
    }

    #[tokio::test]
    async fn anonymous_caller_is_rejected_before_storage() {
        // No expectations: any repository call fails the test.
        let reviews = MockReviewRepo::new();
        let use_case = SubmitReview::new(Arc::new(reviews), review_list());

        let err = use_case
            .execute(None, ReviewDraft::new("Beautiful ending", 5))
            .await
            .unwrap_err();

        assert!(err.is_auth_required());
    }

    #[tokio::test]
    async fn blank_content_is_rejected_without_a_write() {
        let reviews = MockReviewRepo::new();
        let use_case = SubmitReview::new(Arc::new(reviews), review_list());

        let err = use_case
            .execute(Some(UserId::new()), ReviewDraft::new("   \n", 4))
            .await
            .unwrap_err();

        assert!(matches!(err, EngagementError::Validation(_)));
    }

    #[tokio::test]
    async fn out_of_range_rating_is_rejected_without_a_write() {
        let reviews = MockReviewRepo::new();
        let use_case = SubmitReview::new(Arc::new(reviews), review_list());

        for rating in [0, 6, 255] {
            let err = use_case
                .execute(Some(UserId::new()), ReviewDraft::new("Lovely", rating))
                .await
                .unwrap_err();
            assert!(matches!(err, EngagementError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn stores_trimmed_content_and_invalidates_list() {
        let mut reviews = MockReviewRepo::new();
        let author = UserId::new();
        let expected_content = ReviewContent::new("Beautiful ending").unwrap();
        let rating = Rating::new(5).unwrap();
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();

        reviews
            .expect_insert_review()
            .with(eq(author), eq(expected_content.clone()), eq(rating))
            .times(1)
            .returning(move |author_id, content, rating| {
                Ok(Review::new(author_id, content.clone(), rating, now))
            });

        let list = review_list();
        list.get_or_fetch(Some(author), || async { Ok(Vec::new()) })
            .await
            .unwrap();
        assert!(list.cached(Some(author)).await.is_some());

        let use_case = SubmitReview::new(Arc::new(reviews), list.clone());
        let review = use_case
            .execute(Some(author), ReviewDraft::new("  Beautiful ending  ", 5))
            .await
            .unwrap();

        assert_eq!(review.content, expected_content);
        assert_eq!(review.author_id, author);
        assert!(list.cached(Some(author)).await.is_none());
    }

    #[tokio::test]
    async fn backend_failure_propagates_and_keeps_cache() {
        let mut reviews = MockReviewRepo::new();
        reviews
            .expect_insert_review()
            .returning(|_, _, _| Err(RepoError::database("insert_review", "database is locked")));

        let list = review_list();
        list.get_or_fetch(None, || async { Ok(Vec::new()) })
            .await
            .unwrap();

        let use_case = SubmitReview::new(Arc::new(reviews), list.clone());
        let err = use_case
            .execute(Some(UserId::new()), ReviewDraft::new("Lovely", 3))
            .await
            .unwrap_err();

        assert!(err.is_backend_unavailable());
        assert!(list.cached(None).await.is_some());
    }
}
