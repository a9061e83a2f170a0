//! Engagement use cases.
//!
//! Review submission, like toggling, profile lookup and the cached review
//! list. Every command takes the caller explicitly; mutations invalidate the
//! review list once the store has accepted the write.

use std::sync::Arc;

mod error;
mod list_reviews;
mod load_profile;
mod submit_review;
mod toggle_like;

#[cfg(test)]
mod engagement_flow_tests;

pub use error::EngagementError;
pub use list_reviews::ListReviews;
pub use load_profile::LoadProfile;
pub use submit_review::SubmitReview;
pub use toggle_like::ToggleLike;

/// Container for engagement use cases.
pub struct EngagementUseCases {
    pub submit_review: Arc<SubmitReview>,
    pub toggle_like: Arc<ToggleLike>,
    pub load_profile: Arc<LoadProfile>,
    pub list_reviews: Arc<ListReviews>,
}

impl EngagementUseCases {
    pub fn new(
        submit_review: Arc<SubmitReview>,
        toggle_like: Arc<ToggleLike>,
        load_profile: Arc<LoadProfile>,
        list_reviews: Arc<ListReviews>,
    ) -> Self {
        Self {
            submit_review,
            toggle_like,
            load_profile,
            list_reviews,
        }
    }
}
