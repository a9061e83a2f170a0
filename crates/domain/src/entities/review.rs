//! Review entity - a rated, authored text entry about the novel
//!
//! Reviews are immutable once stored. Like counts are never kept on the
//! review itself; `ReviewView` carries a count derived at read time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::profile::{Profile, PROFILE_FALLBACK_LABEL};
use crate::ids::{ReviewId, UserId};
use crate::value_objects::{Rating, ReviewContent};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub author_id: UserId,
    pub content: ReviewContent,
    pub rating: Rating,
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn new(
        author_id: UserId,
        content: ReviewContent,
        rating: Rating,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ReviewId::new(),
            author_id,
            content,
            rating,
            created_at: now,
        }
    }

    /// Reconstruct a stored review.
    pub fn from_parts(
        id: ReviewId,
        author_id: UserId,
        content: ReviewContent,
        rating: Rating,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            author_id,
            content,
            rating,
            created_at,
        }
    }
}

/// A review as listed for one viewer: the review, its author's profile and
/// the like state derived from the like set at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewView {
    pub review: Review,
    /// `None` when the author has no profile row
    pub author: Option<Profile>,
    pub like_count: u32,
    /// Always `false` for anonymous viewers
    pub liked_by_viewer: bool,
}

impl ReviewView {
    pub fn author_name(&self) -> &str {
        self.author
            .as_ref()
            .map_or(PROFILE_FALLBACK_LABEL, Profile::display_name)
    }

    pub fn author_initial(&self) -> char {
        self.author.as_ref().map_or('U', Profile::initial)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_review() -> Review {
        Review::new(
            UserId::new(),
            ReviewContent::new("Beautiful ending").unwrap(),
            Rating::new(5).unwrap(),
            Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap(),
        )
    }

    #[test]
    fn view_without_profile_uses_fallback_label() {
        let view = ReviewView {
            review: sample_review(),
            author: None,
            like_count: 0,
            liked_by_viewer: false,
        };
        assert_eq!(view.author_name(), PROFILE_FALLBACK_LABEL);
        assert_eq!(view.author_initial(), 'U');
    }

    #[test]
    fn view_serializes_in_camel_case() {
        let review = sample_review();
        let author = Profile::new(review.author_id).with_username("quinn");
        let view = ReviewView {
            review,
            author: Some(author),
            like_count: 2,
            liked_by_viewer: true,
        };

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["likeCount"], 2);
        assert_eq!(json["likedByViewer"], true);
        assert_eq!(json["review"]["rating"], 5);
        assert_eq!(json["review"]["content"], "Beautiful ending");
        assert_eq!(view.author_name(), "quinn");
    }
}
