use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::Mutex;
use tracing::debug;

use crate::model::fixture::{Round, SourceTag};

/// Default validity window for a cached round, in hours.
pub const DEFAULT_TTL_HOURS: i64 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub season: i32,
    pub round: u32,
}

impl CacheKey {
    pub fn new(season: i32, round: u32) -> Self {
        CacheKey { season, round }
    }
}

/// A complete, normalized round plus where and when it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub round: Round,
    pub fetched_at: DateTime<Utc>,
    pub source: SourceTag,
}

#[derive(Debug, Clone)]
pub struct CacheLookup {
    pub entry: CacheEntry,
    /// False once the entry is older than the TTL; it may still serve as a last resort.
    pub fresh: bool,
}

/// Resolved rounds keyed by (season, round).
///
/// One lock guards the whole map; the key space is a few dozen rounds at most.
/// Entries expire only by age, checked on read.
#[derive(Debug)]
pub struct FixtureCache {
    ttl: TimeDelta,
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
}

impl Default for FixtureCache {
    fn default() -> Self {
        Self::new(TimeDelta::hours(DEFAULT_TTL_HOURS))
    }
}

impl FixtureCache {
    pub fn new(ttl: TimeDelta) -> Self {
        FixtureCache { ttl, entries: Mutex::new(HashMap::new()) }
    }

    pub fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    pub fn get(&self, key: CacheKey, now: DateTime<Utc>) -> Option<CacheLookup> {
        let entries = self.entries.lock();
        entries.get(&key).map(|entry| CacheLookup {
            fresh: now.signed_duration_since(entry.fetched_at) < self.ttl,
            entry: entry.clone(),
        })
    }

    /// Store a round for `key`, replacing whatever is there unless the stored entry is newer.
    ///
    /// Returns false when the write lost to a newer entry and was discarded.
    pub fn put(&self, key: CacheKey, round: Round, source: SourceTag, fetched_at: DateTime<Utc>) -> bool {
        let mut entries = self.entries.lock();
        if let Some(existing) = entries.get(&key) {
            if existing.fetched_at > fetched_at {
                debug!(
                    season = key.season,
                    round = key.round,
                    existing = %existing.fetched_at,
                    discarded = %fetched_at,
                    "Discarding cache write older than stored entry"
                );
                return false;
            }
        }
        entries.insert(key, CacheEntry { round, fetched_at, source });
        true
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
