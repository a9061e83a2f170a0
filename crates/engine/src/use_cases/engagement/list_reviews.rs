//! List reviews use case.

use std::sync::Arc;

use kindness_domain::UserId;

use crate::infrastructure::ports::ReviewRepo;
use crate::stores::review_list::ReviewList;
use crate::stores::ReviewListStore;

use super::error::EngagementError;

/// Reads the review list through the read-model cache.
pub struct ListReviews {
    reviews: Arc<dyn ReviewRepo>,
    review_list: Arc<ReviewListStore>,
}

impl ListReviews {
    pub fn new(reviews: Arc<dyn ReviewRepo>, review_list: Arc<ReviewListStore>) -> Self {
        Self {
            reviews,
            review_list,
        }
    }

    /// Reviews newest first, with like state computed for `viewer`.
    pub async fn execute(&self, viewer: Option<UserId>) -> Result<ReviewList, EngagementError> {
        let reviews = Arc::clone(&self.reviews);
        let list = self
            .review_list
            .get_or_fetch(viewer, || async move { reviews.list_reviews(viewer).await })
            .await?;
        Ok(list)
    }
}
