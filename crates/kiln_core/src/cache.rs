//! Content-addressed render cache
//!
//! Maps a [`Fingerprint`] to a previously produced artifact. Artifacts are
//! held behind an [`Arc`], so a hit hands back the very object that was
//! stored and callers can compare results with [`Arc::ptr_eq`].
//!
//! Each artifact kind (paints, shaders, paragraphs, textures) gets its own
//! cache; they never reference each other.

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::fingerprint::Fingerprint;

/// How a cache bounds its growth
///
/// `Unbounded` keeps every artifact until an explicit clear. Long-running
/// hosts that see many distinct configurations should either clear
/// periodically or pick an `Lru` capacity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CachePolicy {
    #[default]
    Unbounded,
    /// Keep at most this many artifacts, evicting the least recently used
    Lru(NonZeroUsize),
}

/// Hit/miss/store counters for a cache
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub stores: u64,
}

enum Store<A> {
    Unbounded(FxHashMap<Fingerprint, Arc<A>>),
    Lru(LruCache<Fingerprint, Arc<A>>),
}

impl<A> Store<A> {
    fn new(policy: CachePolicy) -> Self {
        match policy {
            CachePolicy::Unbounded => Store::Unbounded(FxHashMap::default()),
            CachePolicy::Lru(capacity) => Store::Lru(LruCache::new(capacity)),
        }
    }
}

/// A flat fingerprint-to-artifact store for one artifact kind
pub struct RenderCache<A> {
    name: &'static str,
    enabled: bool,
    policy: CachePolicy,
    store: Store<A>,
    stats: CacheStats,
}

impl<A> RenderCache<A> {
    /// Create a cache
    ///
    /// `name` only labels log output. A disabled cache treats every lookup
    /// as a miss and never stores anything.
    pub fn new(name: &'static str, policy: CachePolicy, enabled: bool) -> Self {
        Self {
            name,
            enabled,
            policy,
            store: Store::new(policy),
            stats: CacheStats::default(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Look up an artifact
    pub fn get(&mut self, key: &Fingerprint) -> Option<Arc<A>> {
        if !self.enabled {
            self.stats.misses += 1;
            return None;
        }

        let found = match &mut self.store {
            Store::Unbounded(map) => map.get(key).cloned(),
            Store::Lru(lru) => lru.get(key).cloned(),
        };

        if found.is_some() {
            self.stats.hits += 1;
            tracing::debug!(cache = self.name, key = %key, "cache hit");
        } else {
            self.stats.misses += 1;
            tracing::debug!(cache = self.name, key = %key, "cache miss");
        }
        found
    }

    /// Store an artifact, replacing any previous entry for `key`
    pub fn put(&mut self, key: Fingerprint, artifact: Arc<A>) {
        if !self.enabled {
            return;
        }
        tracing::debug!(cache = self.name, key = %key, "cache store");
        self.stats.stores += 1;
        match &mut self.store {
            Store::Unbounded(map) => {
                map.insert(key, artifact);
            }
            Store::Lru(lru) => {
                // LruCache::put evicts the oldest entry if at capacity
                lru.put(key, artifact);
            }
        }
    }

    /// Return the cached artifact for `key`, producing and storing it on a miss
    ///
    /// A failed production stores nothing and propagates the error.
    pub fn get_or_try_insert_with<F>(&mut self, key: &Fingerprint, produce: F) -> Result<Arc<A>>
    where
        F: FnOnce() -> Result<A>,
    {
        if let Some(artifact) = self.get(key) {
            return Ok(artifact);
        }
        let artifact = Arc::new(produce()?);
        self.put(key.clone(), Arc::clone(&artifact));
        Ok(artifact)
    }

    /// Drop every artifact of this kind
    pub fn clear(&mut self) {
        tracing::debug!(cache = self.name, entries = self.len(), "cache cleared");
        match &mut self.store {
            Store::Unbounded(map) => map.clear(),
            Store::Lru(lru) => lru.clear(),
        }
    }

    pub fn len(&self) -> usize {
        match &self.store {
            Store::Unbounded(map) => map.len(),
            Store::Lru(lru) => lru.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, key: &Fingerprint) -> bool {
        match &self.store {
            Store::Unbounded(map) => map.contains_key(key),
            Store::Lru(lru) => lru.contains(key),
        }
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

impl<A> std::fmt::Debug for RenderCache<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderCache")
            .field("name", &self.name)
            .field("enabled", &self.enabled)
            .field("policy", &self.policy)
            .field("len", &self.len())
            .field("stats", &self.stats)
            .finish()
    }
}
