//! Like relation - a reader's endorsement of a review
//!
//! A like is identified by its `(user_id, review_id)` pair; at most one row
//! exists per pair. It is created and removed by toggling, never updated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{ReviewId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    pub user_id: UserId,
    pub review_id: ReviewId,
    pub created_at: DateTime<Utc>,
}

impl Like {
    pub fn new(user_id: UserId, review_id: ReviewId, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            review_id,
            created_at: now,
        }
    }

    /// Whether this row is the given `(user, review)` pair.
    pub fn is_pair(&self, user_id: UserId, review_id: ReviewId) -> bool {
        self.user_id == user_id && self.review_id == review_id
    }
}

/// Outcome of toggling a like: the caller's new state and the review's
/// authoritative like count after the mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeToggle {
    pub liked: bool,
    pub total_likes: u32,
}
