//! Memoization of resolved decisions.
//!
//! The cache maps canonical context keys to previously computed decisions
//! with true LRU eviction: both reads and writes refresh an entry's recency,
//! and a miss leaves the recency order untouched. It is a pure memoization
//! layer — whatever decision is stored is the full resolved verdict exactly
//! as the evaluators computed it; the cache never arbitrates policy
//! precedence itself.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};

use lru::LruCache;
use parking_lot::Mutex;

use verdex_core::context::CanonicalKey;
use verdex_core::decision::Decision;
use verdex_core::error::{Result, VerdexError};

/// Bounded LRU store of resolved decisions, shared across evaluate calls.
#[derive(Debug)]
pub struct DecisionCache {
    inner: Mutex<LruCache<CanonicalKey, Decision>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl DecisionCache {
    /// Create a cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Result<Self> {
        let capacity = NonZeroUsize::new(capacity)
            .ok_or_else(|| VerdexError::InvalidConfig("cache_size must be greater than 0".into()))?;
        Ok(Self {
            inner: Mutex::new(LruCache::new(capacity)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        })
    }

    /// Look up a decision. A hit refreshes the entry's recency.
    pub fn get(&self, key: &CanonicalKey) -> Option<Decision> {
        let mut cache = self.inner.lock();
        match cache.get(key) {
            Some(decision) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(decision.clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Insert a resolved decision, evicting the least-recently-used entry
    /// when over capacity.
    pub fn put(&self, key: CanonicalKey, decision: Decision) {
        self.inner.lock().put(key, decision);
    }

    /// Drop all entries. Counters are kept; see [`reset_counters`].
    ///
    /// [`reset_counters`]: DecisionCache::reset_counters
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().cap().get()
    }

    pub fn hit_count(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn miss_count(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn reset_counters(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}
