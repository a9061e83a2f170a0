//! Unsubmitted review form state, passed explicitly into `submit_review`.

use serde::{Deserialize, Serialize};

use super::rating::{Rating, DEFAULT_RATING};
use super::review_content::ReviewContent;
use crate::error::DomainError;

/// Raw review input as typed by a reader.
///
/// Holds unvalidated values; `validate` turns it into the value objects a
/// stored review is made of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDraft {
    pub content: String,
    pub rating: u8,
}

impl ReviewDraft {
    pub fn new(content: impl Into<String>, rating: u8) -> Self {
        Self {
            content: content.into(),
            rating,
        }
    }

    /// Whether the submit control should be enabled for this draft.
    pub fn is_submittable(&self) -> bool {
        !self.content.trim().is_empty()
    }

    /// Validate both fields. Content is checked first.
    pub fn validate(&self) -> Result<(ReviewContent, Rating), DomainError> {
        let content = ReviewContent::new(self.content.as_str())?;
        let rating = Rating::new(self.rating)?;
        Ok((content, rating))
    }
}

impl Default for ReviewDraft {
    fn default() -> Self {
        Self {
            content: String::new(),
            rating: DEFAULT_RATING,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn default_draft_is_empty_with_five_stars() {
        let draft = ReviewDraft::default();
        assert_eq!(draft.content, "");
        assert_eq!(draft.rating, 5);
        assert!(!draft.is_submittable());
    }

    #[test]
    fn validate_returns_trimmed_content_and_rating() {
        let (content, rating) = ReviewDraft::new(" Loved it ", 4).validate().unwrap();
        assert_eq!(content.as_str(), "Loved it");
        assert_eq!(rating.value(), 4);
    }

    #[test]
    fn validate_rejects_bad_rating_even_with_good_content() {
        let err = ReviewDraft::new("Loved it", 0).validate().unwrap_err();
        assert!(err.to_string().contains("Rating"));
    }

    #[test]
    fn accepted_drafts_always_satisfy_invariants() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let pieces = ["", " ", "\t", "\n", "a", "Kind", "ending", "★"];

        for _ in 0..2_000 {
            let len = rng.gen_range(0..6);
            let content: String = (0..len)
                .map(|_| pieces[rng.gen_range(0..pieces.len())])
                .collect();
            let rating: u8 = rng.gen_range(0..=8);
            let draft = ReviewDraft::new(content.clone(), rating);

            match draft.validate() {
                Ok((accepted, stars)) => {
                    assert!(!accepted.as_str().trim().is_empty());
                    assert!((1..=5).contains(&stars.value()));
                    assert!(draft.is_submittable());
                }
                Err(_) => {
                    assert!(content.trim().is_empty() || !(1..=5).contains(&rating));
                }
            }
        }
    }
}
