//! End-to-end engagement flows against the in-memory store.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use kindness_domain::{Like, Profile, ReviewDraft, ReviewId, UserId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::Barrier;

use super::*;
use crate::infrastructure::clock::SteppingClock;
use crate::infrastructure::memory::InMemoryReviewStore;
use crate::infrastructure::ports::{LikeRepo, ProfileRepo, RepoError};
use crate::stores::ReviewListStore;

struct Harness {
    store: Arc<InMemoryReviewStore>,
    engagement: EngagementUseCases,
}

impl Harness {
    fn new() -> Self {
        let start = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        let store = Arc::new(InMemoryReviewStore::new(Arc::new(
            SteppingClock::starting_at(start),
        )));
        let likes: Arc<dyn LikeRepo> = store.clone();
        Self::with_likes(store, likes)
    }

    fn with_likes(store: Arc<InMemoryReviewStore>, likes: Arc<dyn LikeRepo>) -> Self {
        let review_list = Arc::new(ReviewListStore::new(Duration::from_secs(60)));
        let engagement = EngagementUseCases::new(
            Arc::new(SubmitReview::new(store.clone(), review_list.clone())),
            Arc::new(ToggleLike::new(likes, review_list.clone())),
            Arc::new(LoadProfile::new(store.clone())),
            Arc::new(ListReviews::new(store.clone(), review_list)),
        );
        Self { store, engagement }
    }

    async fn submit(&self, caller: UserId, text: &str, rating: u8) -> ReviewId {
        self.engagement
            .submit_review
            .execute(Some(caller), ReviewDraft::new(text, rating))
            .await
            .unwrap()
            .id
    }
}

/// Holds every `find_like` until both toggles have looked, so both see no like.
struct RacingLikes {
    inner: Arc<InMemoryReviewStore>,
    barrier: Barrier,
}

#[async_trait]
impl LikeRepo for RacingLikes {
    async fn find_like(
        &self,
        user_id: UserId,
        review_id: ReviewId,
    ) -> Result<Option<Like>, RepoError> {
        let found = self.inner.find_like(user_id, review_id).await;
        self.barrier.wait().await;
        found
    }

    async fn insert_like(&self, user_id: UserId, review_id: ReviewId) -> Result<(), RepoError> {
        self.inner.insert_like(user_id, review_id).await
    }

    async fn delete_like(&self, user_id: UserId, review_id: ReviewId) -> Result<(), RepoError> {
        self.inner.delete_like(user_id, review_id).await
    }

    async fn count_likes(&self, review_id: ReviewId) -> Result<u32, RepoError> {
        self.inner.count_likes(review_id).await
    }
}

#[tokio::test]
async fn submitted_review_appears_first_with_author_and_no_likes() {
    let harness = Harness::new();
    let reader = UserId::new();
    harness
        .store
        .save(&Profile::new(reader).with_username("ada"))
        .await
        .unwrap();

    // Prime the cache so the submission has something to invalidate.
    let before = harness
        .engagement
        .list_reviews
        .execute(Some(reader))
        .await
        .unwrap();
    assert!(before.is_empty());

    harness.submit(UserId::new(), "An older note", 4).await;
    let id = harness.submit(reader, "Beautiful ending", 5).await;

    let listed = harness
        .engagement
        .list_reviews
        .execute(Some(reader))
        .await
        .unwrap();

    assert_eq!(listed.len(), 2);
    let first = &listed[0];
    assert_eq!(first.review.id, id);
    assert_eq!(first.review.content.as_str(), "Beautiful ending");
    assert_eq!(first.review.rating.value(), 5);
    assert_eq!(first.author_name(), "ada");
    assert_eq!(first.like_count, 0);
    assert!(!first.liked_by_viewer);
}

#[tokio::test]
async fn anonymous_submission_changes_nothing() {
    let harness = Harness::new();
    harness.submit(UserId::new(), "Already here", 5).await;

    let err = harness
        .engagement
        .submit_review
        .execute(None, ReviewDraft::new("Sneaky", 5))
        .await
        .unwrap_err();

    assert!(err.is_auth_required());
    assert_eq!(harness.store.review_rows().await, 1);
    let listed = harness.engagement.list_reviews.execute(None).await.unwrap();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn whitespace_only_content_is_never_stored() {
    let harness = Harness::new();
    for text in ["", " ", "\n\t  \r\n"] {
        let err = harness
            .engagement
            .submit_review
            .execute(Some(UserId::new()), ReviewDraft::new(text, 5))
            .await
            .unwrap_err();
        assert!(matches!(err, EngagementError::Validation(_)));
    }
    assert_eq!(harness.store.review_rows().await, 0);
}

#[tokio::test]
async fn toggling_twice_restores_the_original_state() {
    let harness = Harness::new();
    let reader = UserId::new();
    let review = harness.submit(UserId::new(), "Kind words", 5).await;
    let toggle = &harness.engagement.toggle_like;

    let on = toggle.execute(Some(reader), review).await.unwrap();
    assert!(on.liked);
    assert_eq!(on.total_likes, 1);

    let off = toggle.execute(Some(reader), review).await.unwrap();
    assert!(!off.liked);
    assert_eq!(off.total_likes, 0);
    assert_eq!(harness.store.like_rows(reader, review).await, 0);
}

#[tokio::test]
async fn total_likes_matches_rows_under_random_toggles() {
    let harness = Harness::new();
    let review = harness.submit(UserId::new(), "Counted", 5).await;
    let readers: Vec<UserId> = (0..6).map(|_| UserId::new()).collect();
    let mut rng = StdRng::seed_from_u64(0x6b696e64);

    for _ in 0..200 {
        let reader = readers[rng.gen_range(0..readers.len())];
        let result = harness
            .engagement
            .toggle_like
            .execute(Some(reader), review)
            .await
            .unwrap();

        let mut rows = 0;
        for r in &readers {
            rows += harness.store.like_rows(*r, review).await;
        }
        assert_eq!(result.total_likes as usize, rows);
        assert_eq!(result.liked, harness.store.like_rows(reader, review).await == 1);
    }
}

#[tokio::test]
async fn concurrent_toggles_by_one_reader_leave_one_like() {
    let start = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
    let store = Arc::new(InMemoryReviewStore::new(Arc::new(
        SteppingClock::starting_at(start),
    )));
    let racing = Arc::new(RacingLikes {
        inner: store.clone(),
        barrier: Barrier::new(2),
    });
    let harness = Harness::with_likes(store, racing);
    let reader = UserId::new();
    let review = harness.submit(UserId::new(), "Race me", 5).await;

    let toggle = &harness.engagement.toggle_like;
    let (a, b) = tokio::join!(
        toggle.execute(Some(reader), review),
        toggle.execute(Some(reader), review),
    );
    let (a, b) = (a.unwrap(), b.unwrap());

    assert!(a.liked && b.liked);
    assert_eq!(a.total_likes, 1);
    assert_eq!(b.total_likes, 1);
    assert_eq!(harness.store.like_rows(reader, review).await, 1);
}

#[tokio::test]
async fn own_like_is_visible_on_next_cached_read() {
    let harness = Harness::new();
    let reader = UserId::new();
    let review = harness.submit(UserId::new(), "Visible", 5).await;

    let before = harness
        .engagement
        .list_reviews
        .execute(Some(reader))
        .await
        .unwrap();
    assert!(!before[0].liked_by_viewer);

    harness
        .engagement
        .toggle_like
        .execute(Some(reader), review)
        .await
        .unwrap();

    let after = harness
        .engagement
        .list_reviews
        .execute(Some(reader))
        .await
        .unwrap();
    assert!(after[0].liked_by_viewer);
    assert_eq!(after[0].like_count, 1);
}

#[tokio::test]
async fn liking_an_unknown_review_reports_not_found() {
    let harness = Harness::new();
    let missing = ReviewId::new();

    let err = harness
        .engagement
        .toggle_like
        .execute(Some(UserId::new()), missing)
        .await
        .unwrap_err();

    assert!(matches!(err, EngagementError::ReviewNotFound(id) if id == missing));
}

#[tokio::test]
async fn profile_is_loaded_for_signed_in_reader_only() {
    let harness = Harness::new();
    let reader = UserId::new();
    harness
        .store
        .save(&Profile::new(reader).with_full_name("grace hopper"))
        .await
        .unwrap();

    let profile = harness
        .engagement
        .load_profile
        .execute(Some(reader))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(profile.initial(), 'G');
    assert!(harness
        .engagement
        .load_profile
        .execute(None)
        .await
        .unwrap()
        .is_none());
}
