//! Expiring key-value store
//!
//! In-memory map from string keys to values, each stamped with an
//! expiration instant:
//! - `get` never returns an entry whose expiration has passed
//! - `set` inserts or overwrites and resets the expiration
//! - expired entries are reclaimed lazily by `purge_expired`, usually
//!   from a background janitor task on a longer interval
//!
//! Time is read from `tokio::time::Instant` so tests can drive expiry
//! with a paused clock.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use log::debug;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::defaults::MAX_DURATION;

/// A stored value and the instant it stops being served
#[derive(Debug, Clone)]
pub struct StoreEntry<V> {
    /// Stored value
    pub value: V,
    /// Entry is a miss once `now > expires_at`
    pub expires_at: Instant,
}

impl<V> StoreEntry<V> {
    fn new(value: V, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl.min(MAX_DURATION),
        }
    }

    /// Check if this entry is still fresh
    pub fn is_fresh(&self) -> bool {
        Instant::now() <= self.expires_at
    }
}

/// Thread-safe store with a default time-to-live.
///
/// Cloning is cheap and every clone shares the same entries.
pub struct ExpiringStore<V> {
    entries: Arc<RwLock<HashMap<String, StoreEntry<V>>>>,
    default_ttl: Duration,
}

impl<V> Clone for ExpiringStore<V> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            default_ttl: self.default_ttl,
        }
    }
}

impl<V: Clone> ExpiringStore<V> {
    /// Create an empty store whose `set` uses `default_ttl`
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            default_ttl,
        }
    }

    /// TTL applied by `set`
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Get a value if present and not expired
    pub fn get(&self, key: &str) -> Option<V> {
        let entries = self.read();
        let entry = entries.get(key)?;

        if entry.is_fresh() {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    /// Insert or overwrite with the default TTL
    pub fn set(&self, key: impl Into<String>, value: V) {
        self.set_with_ttl(key, value, self.default_ttl);
    }

    /// Insert or overwrite, expiring `ttl` from now (capped at `MAX_DURATION`)
    pub fn set_with_ttl(&self, key: impl Into<String>, value: V, ttl: Duration) {
        self.write().insert(key.into(), StoreEntry::new(value, ttl));
    }

    /// Remove an entry, returning its value if it was still fresh
    pub fn remove(&self, key: &str) -> Option<V> {
        self.write()
            .remove(key)
            .filter(StoreEntry::is_fresh)
            .map(|entry| entry.value)
    }

    /// Clear all entries
    pub fn clear(&self) {
        self.write().clear();
    }

    /// Drop every expired entry and return how many were removed
    pub fn purge_expired(&self) -> usize {
        let mut entries = self.write();
        let before = entries.len();
        entries.retain(|_, entry| entry.is_fresh());
        before - entries.len()
    }

    /// Get store statistics
    pub fn stats(&self) -> StoreStats {
        let entries = self.read();
        let live = entries.values().filter(|e| e.is_fresh()).count();

        StoreStats {
            entries: entries.len(),
            live,
            expired: entries.len() - live,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, StoreEntry<V>>> {
        // Writers never leave the map half-updated
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, StoreEntry<V>>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<V: Clone + Send + Sync + 'static> ExpiringStore<V> {
    /// Spawn a task that purges expired entries every `interval`.
    ///
    /// Must be called from within a tokio runtime. Abort the returned
    /// handle to stop sweeping.
    pub fn spawn_janitor(&self, interval: Duration) -> JoinHandle<()> {
        let store = self.clone();
        let interval = interval.min(MAX_DURATION);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                let removed = store.purge_expired();
                if removed > 0 {
                    debug!("Store sweep removed {} expired entries", removed);
                }
            }
        })
    }
}

/// Store statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    /// Entries held in memory, expired or not
    pub entries: usize,
    /// Entries `get` would still return
    pub live: usize,
    /// Entries waiting for the next sweep
    pub expired: usize,
}
