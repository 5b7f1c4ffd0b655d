//! Cache module for storing API responses with an expiry time
//!
//! This module provides an expiring cache over a pluggable key/value storage.
//! Entries live for a fixed TTL after they are written; reads of expired
//! entries delete them and report a miss. Storage failures are logged and
//! treated as misses so the cache never fails its caller.

mod clock;
mod expiring;
mod storage;

pub use clock::{Clock, ManualClock, SystemClock};
pub use expiring::{CacheEntry, ExpiringCache, CACHE_TTL};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
