//! Review list read model.
//!
//! Caches `list_reviews` results per viewer under one logical query, the
//! current review list. Mutations call `invalidate`; a fetch that raced with
//! an invalidation is returned to its caller but never cached.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use kindness_domain::{ReviewView, UserId};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::infrastructure::cache::TtlCache;
use crate::infrastructure::ports::RepoError;

/// Query identity of the review list. Like state differs per viewer, so the
/// viewer is part of the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReviewListKey {
    pub viewer: Option<UserId>,
}

impl ReviewListKey {
    pub fn for_viewer(viewer: Option<UserId>) -> Self {
        Self { viewer }
    }
}

pub type ReviewList = Arc<Vec<ReviewView>>;

pub struct ReviewListStore {
    cache: TtlCache<ReviewListKey, ReviewList>,
}

impl ReviewListStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: TtlCache::new(ttl),
        }
    }

    /// Serve the cached list for `viewer`, or run `fetch` and cache its
    /// result unless the list was invalidated while the fetch was running.
    pub async fn get_or_fetch<F, Fut>(
        &self,
        viewer: Option<UserId>,
        fetch: F,
    ) -> Result<ReviewList, RepoError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<ReviewView>, RepoError>>,
    {
        let key = ReviewListKey::for_viewer(viewer);
        if let Some(list) = self.cache.get(&key).await {
            return Ok(list);
        }

        // Capture before fetching so an invalidation during the fetch wins.
        let generation = self.cache.generation().await;
        tracing::debug!(viewer = ?viewer, generation, "Review list cache miss");

        let list: ReviewList = Arc::new(fetch().await?);
        if !self
            .cache
            .insert_if_current(key, list.clone(), generation)
            .await
        {
            tracing::debug!(
                viewer = ?viewer,
                generation,
                "Review list changed during fetch; result not cached"
            );
        }
        Ok(list)
    }

    /// Cached list for `viewer`, if fresh. Never fetches.
    pub async fn cached(&self, viewer: Option<UserId>) -> Option<ReviewList> {
        self.cache.get(&ReviewListKey::for_viewer(viewer)).await
    }

    /// Mark every cached list stale; the next read refetches.
    pub async fn invalidate(&self) {
        let dropped = self.cache.invalidate().await;
        tracing::debug!(dropped, "Review list invalidated");
    }

    /// Drop expired lists; returns how many were removed.
    pub async fn cleanup_expired(&self) -> usize {
        self.cache.cleanup_expired().await
    }

    /// Sweep expired lists every `every` until aborted.
    pub fn sweep_expired(self: &Arc<Self>, every: Duration) -> JoinHandle<()> {
        let store = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(every).await;
                let removed = store.cleanup_expired().await;
                if removed > 0 {
                    tracing::debug!(removed, "Swept expired review lists");
                }
            }
        })
    }

    /// Invalidate on every session identity change until the session
    /// provider goes away.
    pub fn watch_session(
        self: &Arc<Self>,
        mut changes: watch::Receiver<Option<UserId>>,
    ) -> JoinHandle<()> {
        let store = Arc::clone(self);
        tokio::spawn(async move {
            while changes.changed().await.is_ok() {
                let caller = *changes.borrow_and_update();
                tracing::debug!(user_id = ?caller, "Session changed; invalidating review list");
                store.invalidate().await;
            }
        })
    }
}
