//! Time-bounded cache over a [`Storage`] backend
//!
//! Every value is wrapped with the time it was written and the time it expires.
//! Expired entries are deleted the next time they are read; there is no
//! background sweep. Storage failures never reach the caller: they are logged
//! and read back as a miss.

use chrono::Duration;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use super::clock::{Clock, SystemClock};
use super::storage::{Storage, StorageError};

/// How long an entry stays fresh after it is written
pub const CACHE_TTL: Duration = Duration::minutes(30);

/// Record persisted under each key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    /// The cached data
    pub data: T,
    /// When the entry was written (Unix milliseconds)
    #[serde(rename = "timestamp")]
    pub written_at: i64,
    /// When the entry expires (Unix milliseconds)
    #[serde(rename = "expiry")]
    pub expires_at: i64,
}

/// Borrowed form of [`CacheEntry`] so `set` can serialize without cloning
#[derive(Serialize)]
struct CacheEntryRef<'a, T> {
    data: &'a T,
    timestamp: i64,
    expiry: i64,
}

/// Cache whose entries expire a fixed time after they are written
#[derive(Debug, Clone)]
pub struct ExpiringCache<S, C = SystemClock> {
    storage: S,
    clock: C,
    ttl: Duration,
}

impl<S: Storage> ExpiringCache<S> {
    /// Creates a cache over `storage` using wall-clock time and [`CACHE_TTL`]
    pub fn new(storage: S) -> Self {
        Self::with_clock(storage, SystemClock)
    }
}

impl<S: Storage, C: Clock> ExpiringCache<S, C> {
    pub fn with_clock(storage: S, clock: C) -> Self {
        Self {
            storage,
            clock,
            ttl: CACHE_TTL,
        }
    }

    /// Overrides the entry lifetime
    ///
    /// A non-positive TTL is raised to one millisecond so that every stored
    /// entry expires strictly after it was written.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl.max(Duration::milliseconds(1));
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Stores `value` under `key`
    ///
    /// A failed write is logged and dropped; the next read is a miss.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) {
        let now = self.clock.now_millis();
        let entry = CacheEntryRef {
            data: value,
            timestamp: now,
            expiry: now + self.ttl.num_milliseconds(),
        };

        let result = serde_json::to_string(&entry)
            .map_err(StorageError::from)
            .and_then(|json| self.storage.set_item(key, &json));

        if let Err(e) = result {
            warn!(key, error = %e, "failed to write cache entry");
        }
    }

    /// Returns the value under `key` if present and not expired
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.get_entry(key).map(|entry| entry.data)
    }

    /// Returns the full record under `key` if present and not expired
    ///
    /// Reading an expired record deletes it.
    pub fn get_entry<T: DeserializeOwned>(&self, key: &str) -> Option<CacheEntry<T>> {
        let raw = match self.storage.get_item(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key, error = %e, "failed to read cache entry");
                return None;
            }
        };

        let entry: CacheEntry<T> = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(key, error = %e, "failed to parse cache entry");
                return None;
            }
        };

        if self.clock.now_millis() > entry.expires_at {
            debug!(key, expired_at = entry.expires_at, "evicting expired cache entry");
            self.remove(key);
            return None;
        }

        Some(entry)
    }

    /// Deletes the entry under `key`
    pub fn remove(&self, key: &str) {
        if let Err(e) = self.storage.remove_item(key) {
            warn!(key, error = %e, "failed to remove cache entry");
        }
    }

    /// Whether `get(key)` would return a value
    ///
    /// Shares `get`'s eviction of expired entries.
    pub fn is_valid(&self, key: &str) -> bool {
        self.get::<serde_json::Value>(key).is_some()
    }
}
