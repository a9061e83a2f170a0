//! Application state and composition.

use std::sync::Arc;
use std::time::Duration;

use kindness_domain::UserId;
use tokio::task::JoinHandle;

use crate::infrastructure::ports::{LikeRepo, ProfileRepo, ReviewRepo, SessionPort};
use crate::stores::ReviewListStore;
use crate::use_cases::engagement::{
    EngagementUseCases, ListReviews, LoadProfile, SubmitReview, ToggleLike,
};

/// Lower bound on how often expired review lists are swept.
const MIN_SWEEP_INTERVAL: Duration = Duration::from_secs(1);

/// Main application state.
///
/// Holds the repository ports, the review list read model, the session
/// provider and the use cases built on them.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
    pub review_list: Arc<ReviewListStore>,
    pub session: Arc<dyn SessionPort>,
    session_watch: JoinHandle<()>,
    cache_sweep: JoinHandle<()>,
}

/// Container for all repository ports.
pub struct Repositories {
    pub review: Arc<dyn ReviewRepo>,
    pub like: Arc<dyn LikeRepo>,
    pub profile: Arc<dyn ProfileRepo>,
}

/// Container for all use cases.
pub struct UseCases {
    pub engagement: EngagementUseCases,
}

impl App {
    /// Wire the use cases over one store that serves all three repository
    /// ports. Must be called inside a tokio runtime: the review list follows
    /// session changes and sweeps expired entries from spawned tasks.
    pub fn new<S>(store: Arc<S>, session: Arc<dyn SessionPort>, review_cache_ttl: Duration) -> Self
    where
        S: ReviewRepo + LikeRepo + ProfileRepo + 'static,
    {
        let review_repo: Arc<dyn ReviewRepo> = store.clone();
        let like_repo: Arc<dyn LikeRepo> = store.clone();
        let profile_repo: Arc<dyn ProfileRepo> = store;

        let review_list = Arc::new(ReviewListStore::new(review_cache_ttl));
        let session_watch = review_list.watch_session(session.subscribe());
        let cache_sweep = review_list.sweep_expired(review_cache_ttl.max(MIN_SWEEP_INTERVAL));

        let engagement = EngagementUseCases::new(
            Arc::new(SubmitReview::new(review_repo.clone(), review_list.clone())),
            Arc::new(ToggleLike::new(like_repo.clone(), review_list.clone())),
            Arc::new(LoadProfile::new(profile_repo.clone())),
            Arc::new(ListReviews::new(review_repo.clone(), review_list.clone())),
        );

        Self {
            repositories: Repositories {
                review: review_repo,
                like: like_repo,
                profile: profile_repo,
            },
            use_cases: UseCases { engagement },
            review_list,
            session,
            session_watch,
            cache_sweep,
        }
    }

    /// Caller identity for the next command, as the session provider sees it.
    pub fn current_caller(&self) -> Option<UserId> {
        self.session.current_caller()
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.session_watch.abort();
        self.cache_sweep.abort();
    }
}
