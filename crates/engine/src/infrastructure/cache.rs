//! TTL-based cache for read models.
//!
//! Provides a thread-safe cache with automatic expiration and explicit
//! invalidation. Every invalidation bumps a generation counter so a fetch
//! that started before the invalidation cannot repopulate the cache with
//! the stale result.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

/// A thread-safe cache with time-to-live expiration.
///
/// Entries are automatically considered expired after the configured TTL,
/// but are not removed until `cleanup_expired()` or `invalidate()` is called.
pub struct TtlCache<K, V> {
    state: RwLock<CacheState<K, V>>,
    ttl: Duration,
}

struct CacheState<K, V> {
    entries: HashMap<K, TtlEntry<V>>,
    generation: u64,
}

struct TtlEntry<V> {
    value: V,
    inserted_at: Instant,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Clone + Send + Sync,
{
    /// Create a new cache with the specified TTL.
    pub fn new(ttl: Duration) -> Self {
        Self {
            state: RwLock::new(CacheState {
                entries: HashMap::new(),
                generation: 0,
            }),
            ttl,
        }
    }

    /// Current invalidation generation. Capture it before fetching a value
    /// and pass it to `insert_if_current`.
    pub async fn generation(&self) -> u64 {
        self.state.read().await.generation
    }

    /// Insert a value, replacing any existing entry and resetting the TTL.
    pub async fn insert(&self, key: K, value: V) {
        let entry = TtlEntry {
            value,
            inserted_at: Instant::now(),
        };
        self.state.write().await.entries.insert(key, entry);
    }

    /// Insert only if no invalidation happened since `generation` was read.
    ///
    /// Returns `false` (and stores nothing) when the value is stale.
    pub async fn insert_if_current(&self, key: K, value: V, generation: u64) -> bool {
        let mut guard = self.state.write().await;
        if guard.generation != generation {
            return false;
        }
        guard.entries.insert(
            key,
            TtlEntry {
                value,
                inserted_at: Instant::now(),
            },
        );
        true
    }

    /// Insert a value with an explicit timestamp (tests only).
    #[cfg(test)]
    pub async fn insert_at(&self, key: K, value: V, inserted_at: Instant) {
        let entry = TtlEntry { value, inserted_at };
        self.state.write().await.entries.insert(key, entry);
    }

    /// Get a value if it exists and hasn't expired.
    pub async fn get(&self, key: &K) -> Option<V> {
        let guard = self.state.read().await;
        guard.entries.get(key).and_then(|entry| {
            if entry.inserted_at.elapsed() < self.ttl {
                Some(entry.value.clone())
            } else {
                None
            }
        })
    }

    /// Remove and return a value if it exists (regardless of expiration).
    pub async fn remove(&self, key: &K) -> Option<V> {
        self.state.write().await.entries.remove(key).map(|e| e.value)
    }

    /// Check if a key exists and hasn't expired.
    pub async fn contains(&self, key: &K) -> bool {
        let guard = self.state.read().await;
        guard
            .entries
            .get(key)
            .is_some_and(|entry| entry.inserted_at.elapsed() < self.ttl)
    }

    /// Drop every entry and start a new generation.
    ///
    /// Returns the number of entries dropped.
    pub async fn invalidate(&self) -> usize {
        let mut guard = self.state.write().await;
        guard.generation += 1;
        let dropped = guard.entries.len();
        guard.entries.clear();
        dropped
    }

    /// Remove all expired entries and return the count of removed entries.
    pub async fn cleanup_expired(&self) -> usize {
        let mut guard = self.state.write().await;
        let before_count = guard.entries.len();
        let ttl = self.ttl;
        guard
            .entries
            .retain(|_, entry| entry.inserted_at.elapsed() < ttl);
        before_count - guard.entries.len()
    }

    /// Get the current number of entries (including expired ones not yet cleaned).
    pub async fn len(&self) -> usize {
        self.state.read().await.entries.len()
    }

    /// Check if the cache is empty.
    pub async fn is_empty(&self) -> bool {
        self.state.read().await.entries.is_empty()
    }
}
