//! Time-to-live cache with an injectable clock.

use crate::utils::current_time_millis;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

/// Source of the current time in milliseconds since the Unix epoch.
pub trait Clock: Send + Sync {
    /// Current timestamp in milliseconds.
    fn now_ms(&self) -> u64;
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        current_time_millis()
    }
}

/// Clock that only moves when told to. Used to drive expiry in tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    /// Creates a clock frozen at `now_ms`.
    #[must_use]
    pub fn new(now_ms: u64) -> Self {
        Self {
            now: AtomicU64::new(now_ms),
        }
    }

    /// Moves the clock forward by `millis`.
    pub fn advance(&self, millis: u64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }

    /// Sets the clock to `now_ms`.
    pub fn set(&self, now_ms: u64) {
        self.now.store(now_ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Expiry settings for the index proxy caches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Lifetime of a volatility index quote.
    pub index_ttl_ms: u64,
    /// Lifetime of a beta estimate.
    pub beta_ttl_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            index_ttl_ms: 5 * 60 * 1000,
            beta_ttl_ms: 60 * 60 * 1000,
        }
    }
}

impl CacheConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the index quote lifetime.
    #[must_use]
    pub fn with_index_ttl_ms(mut self, index_ttl_ms: u64) -> Self {
        self.index_ttl_ms = index_ttl_ms;
        self
    }

    /// Sets the beta estimate lifetime.
    #[must_use]
    pub fn with_beta_ttl_ms(mut self, beta_ttl_ms: u64) -> Self {
        self.beta_ttl_ms = beta_ttl_ms;
        self
    }
}

struct Entry<V> {
    value: V,
    stored_at: u64,
}

/// Concurrent key/value cache whose entries expire `ttl_ms` after insertion.
///
/// Expired entries are dropped lazily on [`TtlCache::get`] or in bulk by
/// [`TtlCache::purge_expired`].
pub struct TtlCache<V> {
    entries: DashMap<String, Entry<V>>,
    ttl_ms: u64,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> TtlCache<V> {
    /// Creates an empty cache on the wall clock.
    #[must_use]
    pub fn new(ttl_ms: u64) -> Self {
        Self::with_clock(ttl_ms, Arc::new(SystemClock))
    }

    /// Creates an empty cache on the given clock.
    #[must_use]
    pub fn with_clock(ttl_ms: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            ttl_ms,
            clock,
        }
    }

    fn is_fresh(&self, stored_at: u64, now: u64) -> bool {
        now.saturating_sub(stored_at) < self.ttl_ms
    }

    /// Returns a clone of the value if present and not expired.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now_ms();
        let expired = match self.entries.get(key) {
            Some(entry) if self.is_fresh(entry.stored_at, now) => {
                trace!(key, "cache hit");
                return Some(entry.value.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            trace!(key, "cache entry expired");
            self.entries
                .remove_if(key, |_, entry| !self.is_fresh(entry.stored_at, now));
        }
        None
    }

    /// Stores `value` under `key`, replacing any previous entry.
    pub fn insert(&self, key: impl Into<String>, value: V) {
        let stored_at = self.clock.now_ms();
        self.entries.insert(key.into(), Entry { value, stored_at });
    }

    /// Removes `key`, returning its value whether or not it had expired.
    pub fn evict(&self, key: &str) -> Option<V> {
        self.entries.remove(key).map(|(_, entry)| entry.value)
    }

    /// Drops every expired entry and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now_ms();
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| self.is_fresh(entry.stored_at, now));
        before.saturating_sub(self.entries.len())
    }

    /// Number of stored entries, including expired ones not yet purged.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lifetime of an entry in milliseconds.
    #[must_use]
    pub fn ttl_ms(&self) -> u64 {
        self.ttl_ms
    }
}
